//! Category repository
//!
//! CRUD over the category table. Name uniqueness is pre-checked (the
//! check skips the row being renamed), and deletion is blocked while any
//! product still references the category.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use super::{is_foreign_key_violation, is_unique_violation, DbError};
use crate::models::CategoryName;

/// Category record from database
#[derive(Debug, Clone, FromRow)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

/// Category repository
pub struct CategoryRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all categories.
    pub async fn list(&self) -> Result<Vec<Category>, DbError> {
        let rows = sqlx::query_as(
            "SELECT id, name, created_date, updated_date FROM category ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// Insert a category with server-assigned timestamps.
    pub async fn create(&self, name: CategoryName) -> Result<Category, DbError> {
        let taken: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM category WHERE name = $1)")
                .bind(name.as_str())
                .fetch_one(self.pool)
                .await?;

        if taken.0 {
            return Err(DbError::DuplicateName {
                resource: "category",
                name: name.into_string(),
            });
        }

        sqlx::query_as(
            r#"
            INSERT INTO category (name)
            VALUES ($1)
            RETURNING id, name, created_date, updated_date
            "#,
        )
        .bind(name.as_str())
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            // A concurrent create can slip past the pre-check; the unique
            // constraint still holds the invariant.
            if is_unique_violation(&e) {
                DbError::DuplicateName {
                    resource: "category",
                    name: name.as_str().to_owned(),
                }
            } else {
                e.into()
            }
        })
    }

    /// Rename a category, refreshing its updated_date.
    ///
    /// The uniqueness check skips the row being renamed, so renaming a
    /// category to its current name succeeds rather than conflicting.
    pub async fn update(&self, id: i32, name: CategoryName) -> Result<Category, DbError> {
        let taken: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM category WHERE name = $1 AND id <> $2)")
                .bind(name.as_str())
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        if taken.0 {
            return Err(DbError::DuplicateName {
                resource: "category",
                name: name.into_string(),
            });
        }

        sqlx::query_as(
            r#"
            UPDATE category
            SET name = $1, updated_date = NOW()
            WHERE id = $2
            RETURNING id, name, created_date, updated_date
            "#,
        )
        .bind(name.as_str())
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DbError::DuplicateName {
                    resource: "category",
                    name: name.as_str().to_owned(),
                }
            } else {
                e.into()
            }
        })?
        .ok_or_else(|| DbError::NotFound {
            resource: "category",
            id: id.to_string(),
        })
    }

    /// Delete a category, unless products still reference it.
    ///
    /// Returns the deleted row.
    pub async fn delete(&self, id: i32) -> Result<Category, DbError> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM product WHERE category_id = $1")
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        if count > 0 {
            return Err(DbError::CategoryInUse { count });
        }

        let deleted: Result<Option<Category>, sqlx::Error> = sqlx::query_as(
            r#"
            DELETE FROM category
            WHERE id = $1
            RETURNING id, name, created_date, updated_date
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await;

        match deleted {
            Ok(Some(row)) => Ok(row),
            Ok(None) => Err(DbError::NotFound {
                resource: "category",
                id: id.to_string(),
            }),
            // A product was inserted between the count and the delete;
            // re-count so the message stays accurate.
            Err(e) if is_foreign_key_violation(&e) => {
                let (count,): (i64,) =
                    sqlx::query_as("SELECT COUNT(*) FROM product WHERE category_id = $1")
                        .bind(id)
                        .fetch_one(self.pool)
                        .await?;
                Err(DbError::CategoryInUse {
                    count: count.max(1),
                })
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    // Round-trips against a real database live in tests/api.rs.
    // Run with: DATABASE_URL=postgres://... cargo test -p katalog-server -- --ignored
}
