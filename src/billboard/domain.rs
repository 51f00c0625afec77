//! Core billboard domain types.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{Error, database_id::DatabaseId};

/// A validated, non-empty billboard label.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillboardLabel(String);

impl BillboardLabel {
    /// Create a billboard label.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyBillboardLabel] if `label`
    /// is empty or only whitespace.
    pub fn new(label: &str) -> Result<Self, Error> {
        let label = label.trim();

        if label.is_empty() {
            Err(Error::EmptyBillboardLabel)
        } else {
            Ok(Self(label.to_string()))
        }
    }

    /// Create a billboard label without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(label: &str) -> Self {
        Self(label.to_string())
    }
}

impl AsRef<str> for BillboardLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for BillboardLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A non-empty URL pointing to an uploaded image.
///
/// The image itself lives in external object storage, only the URL is kept.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrl(String);

impl ImageUrl {
    /// Create an image URL.
    ///
    /// # Errors
    ///
    /// This function will return an [Error::EmptyBillboardImage] if `url` is
    /// empty or only whitespace.
    pub fn new(url: &str) -> Result<Self, Error> {
        let url = url.trim();

        if url.is_empty() {
            Err(Error::EmptyBillboardImage)
        } else {
            Ok(Self(url.to_string()))
        }
    }

    /// Create an image URL without validation.
    pub fn new_unchecked(url: &str) -> Self {
        Self(url.to_string())
    }
}

impl AsRef<str> for ImageUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for ImageUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A promotional banner belonging to a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Billboard {
    pub id: DatabaseId,
    pub store_id: DatabaseId,
    pub label: BillboardLabel,
    pub image_url: ImageUrl,
    pub created_at: OffsetDateTime,
}

/// Form data for billboard creation and editing.
#[derive(Debug, Serialize, Deserialize)]
pub struct BillboardFormData {
    pub label: String,
    pub image_url: String,
}

impl BillboardFormData {
    /// Validate the submitted fields.
    ///
    /// # Errors
    /// Returns [Error::EmptyBillboardLabel] or [Error::EmptyBillboardImage]
    /// if either field is blank.
    pub fn validate(&self) -> Result<(BillboardLabel, ImageUrl), Error> {
        let label = BillboardLabel::new(&self.label)?;
        let image_url = ImageUrl::new(&self.image_url)?;

        Ok((label, image_url))
    }
}
