use rusqlite::Connection;

use crate::{
    db::initialize,
    store::{Store, StoreName, create_store},
};

/// An in-memory database with every table created and foreign keys enforced.
pub(crate) fn get_test_connection() -> Connection {
    let connection =
        Connection::open_in_memory().expect("Could not open in-memory SQLite database");
    initialize(&connection).expect("Could not initialize database");

    connection
}

pub(crate) fn create_test_store(connection: &Connection) -> Store {
    create_store(StoreName::new_unchecked("Test Store"), connection)
        .expect("Could not create test store")
}
