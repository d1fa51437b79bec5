//! Repository implementations for database access
//!
//! Each repository borrows the shared pool and issues parameterized
//! queries only. Uniqueness and referential checks are pre-checked so
//! clients get stable messages; the matching database constraints back
//! the checks up, and a violation from the race window is translated
//! here rather than surfacing as an internal error.

pub mod categories;
pub mod products;

pub use categories::{Category, CategoryRepo};
pub use products::{CategoryRef, Product, ProductRepo, ProductWithCategory};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("{resource} '{id}' not found")]
    NotFound { resource: &'static str, id: String },

    #[error("{resource} '{name}' already exists")]
    DuplicateName { resource: &'static str, name: String },

    #[error("category is referenced by {count} product(s)")]
    CategoryInUse { count: i64 },

    #[error("category id {id} does not exist")]
    UnknownCategory { id: i32 },
}

/// Postgres SQLSTATE for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// Postgres SQLSTATE for foreign key violations.
const FOREIGN_KEY_VIOLATION: &str = "23503";

fn sqlstate(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db) => db.code().map(|code| code.into_owned()),
        _ => None,
    }
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    sqlstate(err).as_deref() == Some(UNIQUE_VIOLATION)
}

pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    sqlstate(err).as_deref() == Some(FOREIGN_KEY_VIOLATION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DbError::DuplicateName {
            resource: "category",
            name: "Drinks".into(),
        };
        assert_eq!(err.to_string(), "category 'Drinks' already exists");

        let err = DbError::CategoryInUse { count: 3 };
        assert_eq!(err.to_string(), "category is referenced by 3 product(s)");

        let err = DbError::NotFound {
            resource: "product",
            id: "42".into(),
        };
        assert_eq!(err.to_string(), "product '42' not found");
    }

    #[test]
    fn non_database_errors_have_no_sqlstate() {
        let err = sqlx::Error::RowNotFound;
        assert!(!is_unique_violation(&err));
        assert!(!is_foreign_key_violation(&err));
    }
}
