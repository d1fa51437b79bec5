//! Category name validation

use super::ValidationError;

/// Validated category name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a new category name, rejecting empty input.
    ///
    /// Names are free text; the only rule is non-emptiness. Case matters:
    /// "Drinks" and "drinks" are distinct categories.
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

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_free_text() {
        assert!(CategoryName::new("Drinks").is_ok());
        assert!(CategoryName::new("Makanan Ringan").is_ok());
        assert!(CategoryName::new(" ").is_ok());
    }

    #[test]
    fn rejects_empty() {
        let err = CategoryName::new("").unwrap_err();
        assert!(matches!(err, ValidationError::Empty { field: "name" }));
    }
}
