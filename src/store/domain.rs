//! Core store domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::{Error, database_id::DatabaseId};

/// A validated, non-empty store name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct StoreName(String);

impl StoreName {
    /// Create a store name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyStoreName] if `name` is empty
    /// or only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyStoreName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a store name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for StoreName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for StoreName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A shop whose billboards, categories, products and orders are managed by the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: DatabaseId,
    pub name: StoreName,
}

/// Form data for creating a store.
#[derive(Debug, Serialize, Deserialize)]
pub struct StoreFormData {
    pub name: String,
}
