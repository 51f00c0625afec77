//! Database operations for orders.
//!
//! Line items are kept as the JSON document the storefront sent at checkout.

use rusqlite::{Connection, Row, types::Type};
use time::OffsetDateTime;

use crate::{
    Error,
    database_id::DatabaseId,
    order::{OrderUpdate, RawOrder},
};

const ORDER_COLUMNS: &str = "id, order_items, is_paid, order_status, phone, address, user_id, \
    total_amount, created_at, updated_at";

/// Store a new order for `store_id`.
pub fn insert_order(
    store_id: DatabaseId,
    order: &RawOrder,
    connection: &Connection,
) -> Result<(), Error> {
    let order_items = serde_json::to_string(&order.order_items)?;

    connection.execute(
        "INSERT INTO customer_order (id, store_id, order_items, is_paid, order_status, phone,
            address, user_id, total_amount, created_at, updated_at)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11);",
        (
            &order.id,
            store_id,
            order_items,
            order.is_paid,
            order.order_status,
            &order.phone,
            &order.address,
            &order.user_id,
            order.total_amount,
            order.created_at,
            order.updated_at,
        ),
    )?;

    Ok(())
}

/// Retrieve every order of a store, newest first.
///
/// The read fails as a whole if any order cannot be decoded.
pub fn get_raw_orders(
    store_id: DatabaseId,
    connection: &Connection,
) -> Result<Vec<RawOrder>, Error> {
    connection
        .prepare(&format!(
            "SELECT {ORDER_COLUMNS} FROM customer_order WHERE store_id = :store_id
            ORDER BY created_at DESC, id;"
        ))?
        .query_map(&[(":store_id", &store_id)], map_row)?
        .map(|maybe_order| maybe_order.map_err(|error| error.into()))
        .collect()
}

/// Retrieve a single order by ID.
///
/// # Errors
/// Returns [Error::NotFound] if the store has no order with `order_id`.
pub fn get_raw_order(
    store_id: DatabaseId,
    order_id: &str,
    connection: &Connection,
) -> Result<RawOrder, Error> {
    connection
        .prepare(&format!(
            "SELECT {ORDER_COLUMNS} FROM customer_order WHERE id = ?1 AND store_id = ?2;"
        ))?
        .query_row((order_id, store_id), map_row)
        .map_err(|error| error.into())
}

/// Change an order's payment status, delivery status, or both, and stamp
/// `updated_at`.
///
/// # Errors
/// Returns [Error::EmptyOrderUpdate] if `update` sets neither field, or
/// [Error::UpdateMissingOrder] if the order doesn't exist.
pub fn update_order(
    store_id: DatabaseId,
    order_id: &str,
    update: OrderUpdate,
    connection: &Connection,
) -> Result<(), Error> {
    if update.is_empty() {
        return Err(Error::EmptyOrderUpdate);
    }

    let rows_affected = connection.execute(
        "UPDATE customer_order
        SET is_paid = COALESCE(?1, is_paid),
            order_status = COALESCE(?2, order_status),
            updated_at = ?3
        WHERE id = ?4 AND store_id = ?5",
        (
            update.is_paid,
            update.order_status,
            OffsetDateTime::now_utc(),
            order_id,
            store_id,
        ),
    )?;

    if rows_affected == 0 {
        return Err(Error::UpdateMissingOrder);
    }

    Ok(())
}

/// Delete an order by ID.
///
/// # Errors
/// Returns [Error::DeleteMissingOrder] if the order doesn't exist.
pub fn delete_order(
    store_id: DatabaseId,
    order_id: &str,
    connection: &Connection,
) -> Result<(), Error> {
    let rows_affected = connection.execute(
        "DELETE FROM customer_order WHERE id = ?1 AND store_id = ?2",
        (order_id, store_id),
    )?;

    if rows_affected == 0 {
        return Err(Error::DeleteMissingOrder);
    }

    Ok(())
}

/// Initialize the order table and indexes.
pub fn create_order_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS customer_order (
            id TEXT PRIMARY KEY,
            store_id INTEGER NOT NULL REFERENCES store(id) ON DELETE CASCADE,
            order_items TEXT NOT NULL DEFAULT '[]',
            is_paid INTEGER NOT NULL DEFAULT 0,
            order_status TEXT NOT NULL DEFAULT 'Processing'
                CHECK (order_status IN ('Processing', 'Delivering', 'Delivered', 'Canceled')),
            phone TEXT NOT NULL DEFAULT '',
            address TEXT NOT NULL DEFAULT '',
            user_id TEXT NOT NULL DEFAULT '',
            total_amount REAL NOT NULL DEFAULT 0,
            created_at TEXT,
            updated_at TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_customer_order_store_created
            ON customer_order(store_id, created_at);",
    )?;

    Ok(())
}

fn map_row(row: &Row) -> Result<RawOrder, rusqlite::Error> {
    let raw_items: String = row.get(1)?;
    let order_items = serde_json::from_str(&raw_items)
        .map_err(|error| {
            rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(error))
        })?;

    Ok(RawOrder {
        id: row.get(0)?,
        order_items,
        is_paid: row.get(2)?,
        order_status: row.get(3)?,
        phone: row.get(4)?,
        address: row.get(5)?,
        user_id: row.get(6)?,
        total_amount: row.get(7)?,
        created_at: row.get(8)?,
        updated_at: row.get(9)?,
    })
}

#[cfg(test)]
mod order_query_tests {
    use rusqlite::Connection;
    use time::macros::datetime;

    use crate::{
        Error,
        database_id::DatabaseId,
        order::{OrderStatus, OrderUpdate, RawLineItem, RawOrder},
        test_utils::{create_test_store, get_test_connection},
    };

    use super::{delete_order, get_raw_order, get_raw_orders, insert_order, update_order};

    fn test_order(id: &str) -> RawOrder {
        RawOrder {
            id: id.to_owned(),
            order_items: vec![RawLineItem {
                name: Some("Lemonade".to_owned()),
                category: Some("Drinks".to_owned()),
                price: Some(10.0),
                qty: Some(2),
                ..Default::default()
            }],
            is_paid: false,
            order_status: OrderStatus::Processing,
            phone: "050-0000000".to_owned(),
            address: "1 Test Street".to_owned(),
            user_id: "user-1".to_owned(),
            total_amount: 20.0,
            created_at: Some(datetime!(2025-03-14 12:00 UTC)),
            updated_at: Some(datetime!(2025-03-14 12:00 UTC)),
        }
    }

    fn get_connection_and_store() -> (Connection, DatabaseId) {
        let connection = get_test_connection();
        let store = create_test_store(&connection);
        (connection, store.id)
    }

    #[test]
    fn insert_and_get_order() {
        let (connection, store_id) = get_connection_and_store();
        let order = test_order("order-1");

        insert_order(store_id, &order, &connection).expect("Could not insert order");

        assert_eq!(get_raw_order(store_id, "order-1", &connection), Ok(order));
    }

    #[test]
    fn get_raw_orders_is_scoped_to_store_and_newest_first() {
        let (connection, store_id) = get_connection_and_store();
        let other_store = create_test_store(&connection);
        let older = test_order("older");
        let newer = RawOrder {
            created_at: Some(datetime!(2025-04-01 09:30 UTC)),
            ..test_order("newer")
        };
        insert_order(store_id, &older, &connection).unwrap();
        insert_order(store_id, &newer, &connection).unwrap();
        insert_order(other_store.id, &test_order("theirs"), &connection).unwrap();

        assert_eq!(
            get_raw_orders(store_id, &connection),
            Ok(vec![newer, older])
        );
    }

    #[test]
    fn get_raw_orders_fails_on_corrupt_line_items() {
        let (connection, store_id) = get_connection_and_store();
        insert_order(store_id, &test_order("good"), &connection).unwrap();
        connection
            .execute(
                "INSERT INTO customer_order (id, store_id, order_items) VALUES ('bad', ?1, 'oops')",
                [store_id],
            )
            .unwrap();

        assert!(matches!(
            get_raw_orders(store_id, &connection),
            Err(Error::SqlError(_))
        ));
    }

    #[test]
    fn unknown_status_is_rejected_by_storage() {
        let (connection, store_id) = get_connection_and_store();

        let result = connection.execute(
            "INSERT INTO customer_order (id, store_id, order_status) VALUES ('x', ?1, 'Lost')",
            [store_id],
        );

        assert!(result.is_err());
    }

    #[test]
    fn update_order_changes_only_given_fields() {
        let (connection, store_id) = get_connection_and_store();
        let order = test_order("order-1");
        insert_order(store_id, &order, &connection).unwrap();

        update_order(
            store_id,
            "order-1",
            OrderUpdate {
                is_paid: Some(true),
                order_status: None,
            },
            &connection,
        )
        .expect("Could not update order");

        let updated = get_raw_order(store_id, "order-1", &connection).unwrap();
        assert!(updated.is_paid);
        assert_eq!(updated.order_status, OrderStatus::Processing);
        assert_ne!(updated.updated_at, order.updated_at);
        assert_eq!(updated.order_items, order.order_items);

        update_order(
            store_id,
            "order-1",
            OrderUpdate {
                is_paid: None,
                order_status: Some(OrderStatus::Delivered),
            },
            &connection,
        )
        .unwrap();

        let updated = get_raw_order(store_id, "order-1", &connection).unwrap();
        assert!(updated.is_paid);
        assert_eq!(updated.order_status, OrderStatus::Delivered);
    }

    #[test]
    fn empty_update_is_rejected() {
        let (connection, store_id) = get_connection_and_store();
        insert_order(store_id, &test_order("order-1"), &connection).unwrap();

        assert_eq!(
            update_order(store_id, "order-1", OrderUpdate::default(), &connection),
            Err(Error::EmptyOrderUpdate)
        );
    }

    #[test]
    fn update_missing_order_fails() {
        let (connection, store_id) = get_connection_and_store();

        assert_eq!(
            update_order(
                store_id,
                "nope",
                OrderUpdate {
                    is_paid: Some(true),
                    order_status: None,
                },
                &connection,
            ),
            Err(Error::UpdateMissingOrder)
        );
    }

    #[test]
    fn delete_order_succeeds() {
        let (connection, store_id) = get_connection_and_store();
        insert_order(store_id, &test_order("order-1"), &connection).unwrap();

        delete_order(store_id, "order-1", &connection).expect("Could not delete order");

        assert_eq!(
            get_raw_order(store_id, "order-1", &connection),
            Err(Error::NotFound)
        );
    }

    #[test]
    fn delete_missing_order_fails() {
        let (connection, store_id) = get_connection_and_store();

        assert_eq!(
            delete_order(store_id, "nope", &connection),
            Err(Error::DeleteMissingOrder)
        );
    }
}
