//! Database ID type definitions.

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseId = i64;

/// Orders are keyed by an opaque string rather than a row ID, since they are
/// created by clients outside the dashboard.
pub type OrderId = String;
