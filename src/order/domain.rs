//! Order documents as stored, and the normalized orders the dashboard reduces.

use std::fmt::Display;

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};
use time::OffsetDateTime;

use crate::{database_id::OrderId, product::ImageRef};

/// Where an order is in the delivery process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OrderStatus {
    Processing,
    Delivering,
    Delivered,
    Canceled,
}

impl OrderStatus {
    /// Every status, in display order.
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Processing,
        OrderStatus::Delivering,
        OrderStatus::Delivered,
        OrderStatus::Canceled,
    ];

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Processing => "Processing",
            OrderStatus::Delivering => "Delivering",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Canceled => "Canceled",
        }
    }

    fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.label() == label)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl ToSql for OrderStatus {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.label()))
    }
}

impl FromSql for OrderStatus {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let label = value.as_str()?;

        Self::from_label(label).ok_or_else(|| {
            FromSqlError::Other(format!("unknown order status \"{label}\"").into())
        })
    }
}

/// Whether an order has been paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PaymentStatus {
    Paid,
    NotPaid,
}

impl PaymentStatus {
    /// Every payment status, in display order.
    pub const ALL: [PaymentStatus; 2] = [PaymentStatus::Paid, PaymentStatus::NotPaid];

    pub fn label(self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::NotPaid => "Not Paid",
        }
    }
}

impl From<bool> for PaymentStatus {
    fn from(is_paid: bool) -> Self {
        if is_paid {
            PaymentStatus::Paid
        } else {
            PaymentStatus::NotPaid
        }
    }
}

/// A product snapshot inside an order, exactly as the storefront sent it.
///
/// Every field is optional because clients are not trusted to send complete
/// products. Fields this app does not read are kept in `extra` so the stored
/// document round trips unchanged.
///
/// A field with the wrong type, e.g. `"qty": 1.5`, is read as missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLineItem {
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub qty: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub images: Vec<ImageRef>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = serde_json::Value::deserialize(deserializer)?;

    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// An order document as it is stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawOrder {
    pub id: OrderId,
    pub order_items: Vec<RawLineItem>,
    pub is_paid: bool,
    #[serde(rename = "order_status")]
    pub order_status: OrderStatus,
    pub phone: String,
    pub address: String,
    pub user_id: String,
    /// The total computed at checkout. Aggregates recompute it from the line items.
    pub total_amount: f64,
    #[serde(with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

/// A line item with every default applied.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem {
    pub name: String,
    /// `None` for line items sent without a category.
    pub category: Option<String>,
    /// Never negative.
    pub price: f64,
    /// At least one.
    pub quantity: i64,
}

impl LineItem {
    pub fn subtotal(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

/// The normalized form of an order that the dashboard aggregates.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: OrderId,
    pub is_paid: bool,
    pub order_status: OrderStatus,
    /// `None` while the creation timestamp has not been written yet.
    pub created_at: Option<OffsetDateTime>,
    pub line_items: Vec<LineItem>,
}

impl Order {
    /// The order's revenue, recomputed from its line items.
    pub fn total(&self) -> f64 {
        self.line_items.iter().map(LineItem::subtotal).sum()
    }

    pub fn payment_status(&self) -> PaymentStatus {
        PaymentStatus::from(self.is_paid)
    }
}

/// A partial update to an order. At least one field must be set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct OrderUpdate {
    #[serde(rename = "isPaid", default)]
    pub is_paid: Option<bool>,
    #[serde(default)]
    pub order_status: Option<OrderStatus>,
}

impl OrderUpdate {
    pub fn is_empty(&self) -> bool {
        self.is_paid.is_none() && self.order_status.is_none()
    }
}
