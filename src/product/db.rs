//! Database operations for products.
//!
//! Product images are stored as a JSON array of URLs.

use rusqlite::{Connection, Row, types::Type};
use time::OffsetDateTime;

use crate::{
    Error,
    category::CategoryName,
    database_id::DatabaseId,
    product::{Product, ProductFields, ProductName},
};

const PRODUCT_COLUMNS: &str = "id, store_id, name, price, category, images, is_featured, is_archived, created_at";

/// Create a product and return it with its generated ID.
pub fn create_product(
    store_id: DatabaseId,
    fields: ProductFields,
    connection: &Connection,
) -> Result<Product, Error> {
    let created_at = OffsetDateTime::now_utc();
    let images = serde_json::to_string(&fields.images)?;

    connection.execute(
        "INSERT INTO product (store_id, name, price, category, images, is_featured, is_archived, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
        (
            store_id,
            fields.name.as_ref(),
            fields.price,
            fields.category.as_ref(),
            images,
            fields.is_featured,
            fields.is_archived,
            created_at,
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Product {
        id,
        store_id,
        name: fields.name,
        price: fields.price,
        category: fields.category,
        images: fields.images,
        is_featured: fields.is_featured,
        is_archived: fields.is_archived,
        created_at,
    })
}

/// Retrieve a single product by ID.
///
/// # Errors
/// Returns [Error::NotFound] if the store has no product with `product_id`.
pub fn get_product(
    store_id: DatabaseId,
    product_id: DatabaseId,
    connection: &Connection,
) -> Result<Product, Error> {
    connection
        .prepare(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE id = :id AND store_id = :store_id;"
        ))?
        .query_row(&[(":id", &product_id), (":store_id", &store_id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve all of a store's products, including archived ones, newest first.
pub fn get_all_products(
    store_id: DatabaseId,
    connection: &Connection,
) -> Result<Vec<Product>, Error> {
    connection
        .prepare(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product WHERE store_id = :store_id
            ORDER BY created_at DESC, id DESC;"
        ))?
        .query_map(&[(":store_id", &store_id)], map_row)?
        .map(|maybe_product| maybe_product.map_err(|error| error.into()))
        .collect()
}

/// Filters for the products shown on the storefront.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AvailableProductsFilter<'a> {
    /// Only include products in the category with this name.
    pub category: Option<&'a str>,
    /// Only include products that are (or are not) featured.
    pub is_featured: Option<bool>,
}

/// Retrieve a store's products that are not archived, newest first.
pub fn get_available_products(
    store_id: DatabaseId,
    filter: AvailableProductsFilter<'_>,
    connection: &Connection,
) -> Result<Vec<Product>, Error> {
    connection
        .prepare(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM product
            WHERE store_id = :store_id
                AND is_archived = 0
                AND (:category IS NULL OR category = :category)
                AND (:is_featured IS NULL OR is_featured = :is_featured)
            ORDER BY created_at DESC, id DESC;"
        ))?
        .query_map(
            rusqlite::named_params! {
                ":store_id": store_id,
                ":category": filter.category,
                ":is_featured": filter.is_featured,
            },
            map_row,
        )?
        .map(|maybe_product| maybe_product.map_err(|error| error.into()))
        .collect()
}

/// Count the products of a store that are not archived.
pub fn count_available_products(
    store_id: DatabaseId,
    connection: &Connection,
) -> Result<usize, Error> {
    let count: i64 = connection.query_row(
        "SELECT COUNT(*) FROM product WHERE store_id = ?1 AND is_archived = 0",
        [store_id],
        |row| row.get(0),
    )?;

    Ok(count as usize)
}

/// Replace every editable field of a product.
///
/// # Errors
/// Returns [Error::UpdateMissingProduct] if the product doesn't exist.
pub fn update_product(
    store_id: DatabaseId,
    product_id: DatabaseId,
    fields: ProductFields,
    connection: &Connection,
) -> Result<(), Error> {
    let images = serde_json::to_string(&fields.images)?;

    let rows_affected = connection.execute(
        "UPDATE product
        SET name = ?1, price = ?2, category = ?3, images = ?4, is_featured = ?5, is_archived = ?6
        WHERE id = ?7 AND store_id = ?8",
        (
            fields.name.as_ref(),
            fields.price,
            fields.category.as_ref(),
            images,
            fields.is_featured,
            fields.is_archived,
            product_id,
            store_id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingProduct);
    }

    Ok(())
}

/// Delete a product by ID.
///
/// # Errors
/// Returns [Error::DeleteMissingProduct] if the product doesn't exist.
pub fn delete_product(
    store_id: DatabaseId,
    product_id: DatabaseId,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM product WHERE id = ?1 AND store_id = ?2",
        (product_id, store_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingProduct);
    }

    Ok(())
}

/// Initialize the product table and indexes.
pub fn create_product_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS product (
            id INTEGER PRIMARY KEY,
            store_id INTEGER NOT NULL REFERENCES store(id) ON DELETE CASCADE,
            name TEXT NOT NULL,
            price REAL NOT NULL CHECK (price > 0),
            category TEXT NOT NULL,
            images TEXT NOT NULL DEFAULT '[]',
            is_featured INTEGER NOT NULL DEFAULT 0,
            is_archived INTEGER NOT NULL DEFAULT 0,
            created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_product_store_id ON product(store_id);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<Product, rusqlite::Error> {
    let raw_name: String = row.get(2)?;
    let raw_category: String = row.get(4)?;
    let raw_images: String = row.get(5)?;
    let images = serde_json::from_str(&raw_images)
        .map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(error))
        })?;

    Ok(Product {
        id: row.get(0)?,
        store_id: row.get(1)?,
        name: ProductName::new_unchecked(&raw_name),
        price: row.get(3)?,
        category: CategoryName::new_unchecked(&raw_category),
        images,
        is_featured: row.get(6)?,
        is_archived: row.get(7)?,
        created_at: row.get(8)?,
    })
}
