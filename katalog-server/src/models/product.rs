//! Product domain types and defaults

use super::ValidationError;

/// Currency symbol applied when a create request omits one.
pub const DEFAULT_CURRENCY: &str = "Rp";

/// Validated product name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProductName(String);

impl ProductName {
    /// Create a new product name, rejecting empty input.
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "name" });
        }

        Ok(Self(s.to_owned()))
    }

    /// Get the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for ProductName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Fields for inserting a product, with request defaults already applied
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub currency: String,
    pub quantity: i32,
    pub active: bool,
    pub category_id: i32,
}

/// Wholesale replacement of a product row; every field is required
#[derive(Debug, Clone)]
pub struct ProductUpdate {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub currency: String,
    pub quantity: i32,
    pub active: bool,
    pub category_id: i32,
}
