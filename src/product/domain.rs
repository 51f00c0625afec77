//! Core product domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, category::CategoryName, database_id::DatabaseId};

/// A validated, non-empty product name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductName(String);

impl ProductName {
    /// Create a product name.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyProductName] if `name` is
    /// empty or only whitespace.
    pub fn new(name: &str) -> Result<Self, Error> {
        let name = name.trim();

        if name.is_empty() {
            Err(Error::EmptyProductName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a product name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for ProductName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ProductName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An image reference in the shape storefront clients send and receive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
}

/// A product listed by a store.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: DatabaseId,
    pub store_id: DatabaseId,
    pub name: ProductName,
    pub price: f64,
    /// The name of the product's category.
    pub category: CategoryName,
    /// The URLs of the product's images, in display order.
    pub images: Vec<String>,
    pub is_featured: bool,
    /// Archived products are hidden from the storefront.
    pub is_archived: bool,
    pub created_at: OffsetDateTime,
}

/// The validated, user editable fields of a product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductFields {
    pub name: ProductName,
    pub price: f64,
    pub category: CategoryName,
    pub images: Vec<String>,
    pub is_featured: bool,
    pub is_archived: bool,
}

/// Form data for product creation and editing.
///
/// Checkboxes are only sent when they are checked, so the flags default to `false`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ProductFormData {
    pub name: String,
    pub price: f64,
    pub category: String,
    /// Image URLs, one per line.
    #[serde(default)]
    pub images: String,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub is_archived: bool,
}

impl ProductFormData {
    /// Validate the submitted fields.
    ///
    /// # Errors
    /// Returns [Error::EmptyProductName], [Error::InvalidPrice] or
    /// [Error::EmptyProductCategory] for the first field that is invalid.
    pub fn validate(&self) -> Result<ProductFields, Error> {
        let name = ProductName::new(&self.name)?;

        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(Error::InvalidPrice(self.price));
        }

        let category = CategoryName::new(&self.category).map_err(|_| Error::EmptyProductCategory)?;

        Ok(ProductFields {
            name,
            price: self.price,
            category,
            images: parse_image_urls(&self.images),
            is_featured: self.is_featured,
            is_archived: self.is_archived,
        })
    }
}

/// Split newline separated image URLs, skipping blank lines.
pub(super) fn parse_image_urls(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod product_form_tests {
    use crate::{Error, category::CategoryName, product::ProductName};

    use super::{ProductFormData, parse_image_urls};

    fn form(name: &str, price: f64, category: &str) -> ProductFormData {
        ProductFormData {
            name: name.to_owned(),
            price,
            category: category.to_owned(),
            images: String::new(),
            is_featured: false,
            is_archived: false,
        }
    }

    #[test]
    fn validate_succeeds() {
        let fields = form(" Lemonade ", 12.5, "Drinks").validate().unwrap();

        assert_eq!(fields.name, ProductName::new_unchecked("Lemonade"));
        assert_eq!(fields.price, 12.5);
        assert_eq!(fields.category, CategoryName::new_unchecked("Drinks"));
    }

    #[test]
    fn validate_rejects_empty_name() {
        assert_eq!(
            form("", 12.5, "Drinks").validate(),
            Err(Error::EmptyProductName)
        );
    }

    #[test]
    fn validate_rejects_non_positive_price() {
        assert_eq!(
            form("Lemonade", 0.0, "Drinks").validate(),
            Err(Error::InvalidPrice(0.0))
        );
        assert_eq!(
            form("Lemonade", -3.0, "Drinks").validate(),
            Err(Error::InvalidPrice(-3.0))
        );
    }

    #[test]
    fn validate_rejects_empty_category() {
        assert_eq!(
            form("Lemonade", 12.5, " ").validate(),
            Err(Error::EmptyProductCategory)
        );
    }

    #[test]
    fn parse_image_urls_skips_blank_lines() {
        assert_eq!(
            parse_image_urls("https://a.png\n\n  https://b.png  \r\n"),
            vec!["https://a.png", "https://b.png"]
        );
    }

    #[test]
    fn decodes_form_with_unchecked_boxes() {
        let form: ProductFormData =
            serde_html_form::from_str("name=Lemonade&price=12.5&category=Drinks&is_featured=true")
                .unwrap();

        assert!(form.is_featured);
        assert!(!form.is_archived);
        assert_eq!(form.images, "");
    }
}
