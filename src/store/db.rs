//! Database operations for stores.

use rusqlite::{Connection, Row};

use crate::{
    Error,
    database_id::DatabaseId,
    store::{Store, StoreName},
};

/// Create a store and return it with its generated ID.
pub fn create_store(name: StoreName, connection: &Connection) -> Result<Store, Error> {
    connection.execute("INSERT INTO store (name) VALUES (?1);", (name.as_ref(),))?;

    let id = connection.last_insert_rowid();

    Ok(Store { id, name })
}

/// Retrieve a single store by ID.
///
/// # Errors
/// Returns [Error::NotFound] if there is no store with `store_id`.
pub fn get_store(store_id: DatabaseId, connection: &Connection) -> Result<Store, Error> {
    connection
        .prepare("SELECT id, name FROM store WHERE id = :id;")?
        .query_row(&[(":id", &store_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all stores ordered alphabetically by name.
pub fn get_all_stores(connection: &Connection) -> Result<Vec<Store>, Error> {
    connection
        .prepare("SELECT id, name FROM store ORDER BY name ASC;")?
        .query_map([], map_row)?
        .map(|maybe_store| maybe_store.map_err(|error| error.into()))
        .collect()
}

/// Initialize the store table.
pub fn create_store_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS store (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL
        );",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Store, rusqlite::Error> {
    let id = row.get(0)?;
    let raw_name: String = row.get(1)?;

    Ok(Store {
        id,
        name: StoreName::new_unchecked(&raw_name),
    })
}
