//! Database operations for billboards.
//!
//! Every query is scoped to a store, a billboard ID from another store is
//! treated the same as a missing billboard.

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    billboard::{Billboard, BillboardLabel, ImageUrl},
    database_id::DatabaseId,
    error::is_foreign_key_violation,
};

/// Create a billboard and return it with its generated ID.
pub fn create_billboard(
    store_id: DatabaseId,
    label: BillboardLabel,
    image_url: ImageUrl,
    connection: &Connection,
) -> Result<Billboard, Error> {
    let created_at = OffsetDateTime::now_utc();

    connection.execute(
        "INSERT INTO billboard (store_id, label, image_url, created_at) VALUES (?1, ?2, ?3, ?4);",
        (store_id, label.as_ref(), image_url.as_ref(), created_at),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Billboard {
        id,
        store_id,
        label,
        image_url,
        created_at,
    })
}

/// Retrieve a single billboard by ID.
///
/// # Errors
/// Returns [Error::NotFound] if the store has no billboard with `billboard_id`.
pub fn get_billboard(
    store_id: DatabaseId,
    billboard_id: DatabaseId,
    connection: &Connection,
) -> Result<Billboard, Error> {
    connection
        .prepare(
            "SELECT id, store_id, label, image_url, created_at FROM billboard
            WHERE id = :id AND store_id = :store_id;",
        )?
        .query_row(
            &[(":id", &billboard_id), (":store_id", &store_id)],
            map_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve a store's billboards, newest first.
pub fn get_all_billboards(
    store_id: DatabaseId,
    connection: &Connection,
) -> Result<Vec<Billboard>, Error> {
    connection
        .prepare(
            "SELECT id, store_id, label, image_url, created_at FROM billboard
            WHERE store_id = :store_id
            ORDER BY created_at DESC, id DESC;",
        )?
        .query_map(&[(":store_id", &store_id)], map_row)?
        .map(|maybe_billboard| maybe_billboard.map_err(|error| error.into()))
        .collect()
}

/// Update a billboard's label and image.
///
/// # Errors
/// Returns [Error::UpdateMissingBillboard] if the billboard doesn't exist.
pub fn update_billboard(
    store_id: DatabaseId,
    billboard_id: DatabaseId,
    label: BillboardLabel,
    image_url: ImageUrl,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "UPDATE billboard SET label = ?1, image_url = ?2 WHERE id = ?3 AND store_id = ?4",
        (label.as_ref(), image_url.as_ref(), billboard_id, store_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingBillboard);
    }

    Ok(())
}

/// Delete a billboard by ID.
///
/// # Errors
/// Returns [Error::DeleteMissingBillboard] if the billboard doesn't exist, or
/// [Error::BillboardInUse] if a category still refers to it.
pub fn delete_billboard(
    store_id: DatabaseId,
    billboard_id: DatabaseId,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection
        .execute(
            "DELETE FROM billboard WHERE id = ?1 AND store_id = ?2",
            (billboard_id, store_id),
        )
        .map_err(|error| {
            if is_foreign_key_violation(&error) {
                Error::BillboardInUse
            } else {
                error.into()
            }
        })?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingBillboard);
    }

    Ok(())
}

/// Initialize the billboard table and indexes.
pub fn create_billboard_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS billboard (
            id INTEGER PRIMARY KEY,
            store_id INTEGER NOT NULL REFERENCES store(id) ON DELETE CASCADE,
            label TEXT NOT NULL,
            image_url TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_billboard_store_id ON billboard(store_id);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Billboard, rusqlite::Error> {
    let raw_label: String = row.get(2)?;
    let raw_image_url: String = row.get(3)?;

    Ok(Billboard {
        id: row.get(0)?,
        store_id: row.get(1)?,
        label: BillboardLabel::new_unchecked(&raw_label),
        image_url: ImageUrl::new_unchecked(&raw_image_url),
        created_at: row.get(4)?,
    })
}

#[cfg(test)]
mod billboard_query_tests {
    use crate::{
        Error,
        billboard::{
            BillboardLabel, ImageUrl, create_billboard, get_all_billboards, get_billboard,
            update_billboard,
        },
        test_utils::{create_test_store, get_test_connection},
    };

    use super::delete_billboard;

    fn label(text: &str) -> BillboardLabel {
        BillboardLabel::new_unchecked(text)
    }

    fn image(url: &str) -> ImageUrl {
        ImageUrl::new_unchecked(url)
    }

    #[test]
    fn create_and_get_billboard() {
        let connection = get_test_connection();
        let store = create_test_store(&connection);

        let billboard = create_billboard(
            store.id,
            label("Summer Sale"),
            image("https://example.com/summer.png"),
            &connection,
        )
        .expect("Could not create billboard");

        assert!(billboard.id > 0);
        assert_eq!(
            get_billboard(store.id, billboard.id, &connection),
            Ok(billboard)
        );
    }

    #[test]
    fn get_billboard_from_other_store_returns_not_found() {
        let connection = get_test_connection();
        let store = create_test_store(&connection);
        let other_store = create_test_store(&connection);
        let billboard = create_billboard(
            store.id,
            label("Summer Sale"),
            image("https://example.com/summer.png"),
            &connection,
        )
        .unwrap();

        assert_eq!(
            get_billboard(other_store.id, billboard.id, &connection),
            Err(Error::NotFound)
        );
    }

    #[test]
    fn get_all_billboards_only_returns_store_billboards() {
        let connection = get_test_connection();
        let store = create_test_store(&connection);
        let other_store = create_test_store(&connection);
        let first = create_billboard(store.id, label("First"), image("a"), &connection).unwrap();
        let second = create_billboard(store.id, label("Second"), image("b"), &connection).unwrap();
        create_billboard(other_store.id, label("Other"), image("c"), &connection).unwrap();

        let billboards = get_all_billboards(store.id, &connection).unwrap();

        assert_eq!(billboards, vec![second, first]);
    }

    #[test]
    fn update_billboard_succeeds() {
        let connection = get_test_connection();
        let store = create_test_store(&connection);
        let billboard = create_billboard(store.id, label("Old"), image("a"), &connection).unwrap();

        update_billboard(store.id, billboard.id, label("New"), image("b"), &connection)
            .expect("Could not update billboard");

        let updated = get_billboard(store.id, billboard.id, &connection).unwrap();
        assert_eq!(updated.label, label("New"));
        assert_eq!(updated.image_url, image("b"));
        assert_eq!(updated.created_at, billboard.created_at);
    }

    #[test]
    fn update_missing_billboard_fails() {
        let connection = get_test_connection();
        let store = create_test_store(&connection);

        assert_eq!(
            update_billboard(store.id, 999, label("New"), image("b"), &connection),
            Err(Error::UpdateMissingBillboard)
        );
    }

    #[test]
    fn delete_billboard_succeeds() {
        let connection = get_test_connection();
        let store = create_test_store(&connection);
        let billboard = create_billboard(store.id, label("Old"), image("a"), &connection).unwrap();

        delete_billboard(store.id, billboard.id, &connection).expect("Could not delete billboard");

        assert_eq!(
            get_billboard(store.id, billboard.id, &connection),
            Err(Error::NotFound)
        );
    }

    #[test]
    fn delete_missing_billboard_fails() {
        let connection = get_test_connection();
        let store = create_test_store(&connection);

        assert_eq!(
            delete_billboard(store.id, 999, &connection),
            Err(Error::DeleteMissingBillboard)
        );
    }

    #[test]
    fn delete_billboard_used_by_category_fails() {
        let connection = get_test_connection();
        let store = create_test_store(&connection);
        let billboard = create_billboard(store.id, label("Old"), image("a"), &connection).unwrap();
        connection
            .execute(
                "INSERT INTO category (store_id, billboard_id, name, created_at)
                VALUES (?1, ?2, 'Drinks', '2024-01-01 00:00:00.0 +00:00:00')",
                (store.id, billboard.id),
            )
            .unwrap();

        assert_eq!(
            delete_billboard(store.id, billboard.id, &connection),
            Err(Error::BillboardInUse)
        );
    }
}
