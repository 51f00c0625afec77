//! Database operations for categories.

use rusqlite::{Connection, Row};
use time::OffsetDateTime;

use crate::{
    Error,
    billboard::{Billboard, BillboardLabel, get_billboard},
    category::{Category, CategoryName},
    database_id::DatabaseId,
};

/// Create a category and return it with its generated ID.
///
/// # Errors
/// Returns [Error::InvalidBillboard] if `billboard_id` is not a billboard of
/// the store `store_id`.
pub fn create_category(
    store_id: DatabaseId,
    name: CategoryName,
    billboard_id: DatabaseId,
    connection: &Connection,
) -> Result<Category, Error> {
    let billboard = get_store_billboard(store_id, billboard_id, connection)?;
    let created_at = OffsetDateTime::now_utc();

    connection.execute(
        "INSERT INTO category (store_id, billboard_id, name, created_at) VALUES (?1, ?2, ?3, ?4);",
        (store_id, billboard_id, name.as_ref(), created_at),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Category {
        id,
        store_id,
        name,
        billboard_id,
        billboard_label: billboard.label,
        created_at,
    })
}

/// Retrieve a single category by ID.
///
/// # Errors
/// Returns [Error::NotFound] if the store has no category with `category_id`.
pub fn get_category(
    store_id: DatabaseId,
    category_id: DatabaseId,
    connection: &Connection,
) -> Result<Category, Error> {
    connection
        .prepare(
            "SELECT category.id, category.store_id, category.name, category.billboard_id,
                billboard.label, category.created_at
            FROM category
            INNER JOIN billboard ON billboard.id = category.billboard_id
            WHERE category.id = :id AND category.store_id = :store_id;",
        )?
        .query_row(
            &[(":id", &category_id), (":store_id", &store_id)],
            map_row,
        )
        .map_err(|error| error.into())
}

/// Retrieve a store's categories, newest first.
pub fn get_all_categories(
    store_id: DatabaseId,
    connection: &Connection,
) -> Result<Vec<Category>, Error> {
    connection
        .prepare(
            "SELECT category.id, category.store_id, category.name, category.billboard_id,
                billboard.label, category.created_at
            FROM category
            INNER JOIN billboard ON billboard.id = category.billboard_id
            WHERE category.store_id = :store_id
            ORDER BY category.created_at DESC, category.id DESC;",
        )?
        .query_map(&[(":store_id", &store_id)], map_row)?
        .map(|maybe_category| maybe_category.map_err(|error| error.into()))
        .collect()
}

/// Update a category's name and billboard.
///
/// # Errors
/// Returns [Error::InvalidBillboard] if `billboard_id` is not a billboard of
/// the store, or [Error::UpdateMissingCategory] if the category doesn't exist.
pub fn update_category(
    store_id: DatabaseId,
    category_id: DatabaseId,
    name: CategoryName,
    billboard_id: DatabaseId,
    connection: &Connection,
) -> Result<(), Error> {
    get_store_billboard(store_id, billboard_id, connection)?;

    let rows_affected = connection.execute(
        "UPDATE category SET name = ?1, billboard_id = ?2 WHERE id = ?3 AND store_id = ?4",
        (name.as_ref(), billboard_id, category_id, store_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingCategory);
    }

    Ok(())
}

/// Delete a category by ID.
///
/// # Errors
/// Returns [Error::DeleteMissingCategory] if the category doesn't exist.
pub fn delete_category(
    store_id: DatabaseId,
    category_id: DatabaseId,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM category WHERE id = ?1 AND store_id = ?2",
        (category_id, store_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingCategory);
    }

    Ok(())
}

/// Initialize the category table and indexes.
pub fn create_category_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS category (
            id INTEGER PRIMARY KEY,
            store_id INTEGER NOT NULL REFERENCES store(id) ON DELETE CASCADE,
            billboard_id INTEGER NOT NULL REFERENCES billboard(id) ON DELETE RESTRICT,
            name TEXT NOT NULL,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_category_store_id ON category(store_id);
        CREATE INDEX IF NOT EXISTS idx_category_billboard_id ON category(billboard_id);",
    )?;

    Ok(())
}

/// Get the billboard a category will point to, which must belong to the same store.
fn get_store_billboard(
    store_id: DatabaseId,
    billboard_id: DatabaseId,
    connection: &Connection,
) -> Result<Billboard, Error> {
    get_billboard(store_id, billboard_id, connection).map_err(|error| match error {
        Error::NotFound => Error::InvalidBillboard,
        error => error,
    })
}

fn map_row(row: &Row) -> Result<Category, rusqlite::Error> {
    let raw_name: String = row.get(2)?;
    let raw_billboard_label: String = row.get(4)?;

    Ok(Category {
        id: row.get(0)?,
        store_id: row.get(1)?,
        name: CategoryName::new_unchecked(&raw_name),
        billboard_id: row.get(3)?,
        billboard_label: BillboardLabel::new_unchecked(&raw_billboard_label),
        created_at: row.get(5)?,
    })
}
