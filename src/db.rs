//! Database schema setup.

use rusqlite::{Connection, Transaction, TransactionBehavior};

use crate::{
    Error, billboard::create_billboard_table, category::create_category_table,
    order::create_order_table, product::create_product_table, store::create_store_table,
};

/// Create all of the database tables for the application.
///
/// Foreign key enforcement is enabled on `connection` so that a billboard
/// cannot be deleted while a category still uses it.
///
/// # Errors
/// This function may return an error if a table could not be created.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", "ON")?;

    let transaction = Transaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    create_store_table(&transaction)?;
    create_billboard_table(&transaction)?;
    create_category_table(&transaction)?;
    create_product_table(&transaction)?;
    create_order_table(&transaction)?;

    transaction.commit()?;

    Ok(())
}
