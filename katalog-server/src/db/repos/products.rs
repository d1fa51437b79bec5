//! Product repository
//!
//! CRUD over the product table. Read paths join the owning category so
//! responses can embed `{id, name}`; write paths verify the referenced
//! category and product-name uniqueness before touching the row.

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgPool, Row};

use super::{is_foreign_key_violation, is_unique_violation, DbError};
use crate::models::{NewProduct, ProductUpdate};

/// Product record from database
#[derive(Debug, Clone, FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub currency: String,
    pub quantity: i32,
    pub active: bool,
    pub category_id: i32,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

/// Owning category as embedded in product reads
#[derive(Debug, Clone)]
pub struct CategoryRef {
    pub id: i32,
    pub name: String,
}

/// Product joined with its owning category, for read endpoints
#[derive(Debug, Clone)]
pub struct ProductWithCategory {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub currency: String,
    pub quantity: i32,
    pub active: bool,
    pub category: Option<CategoryRef>,
    pub created_date: DateTime<Utc>,
    pub updated_date: DateTime<Utc>,
}

fn product_with_category(row: PgRow) -> ProductWithCategory {
    let category = row
        .get::<Option<i32>, _>("category_id")
        .map(|id| CategoryRef {
            id,
            name: row.get("category_name"),
        });

    ProductWithCategory {
        id: row.get("id"),
        name: row.get("name"),
        description: row.get("description"),
        price: row.get("price"),
        currency: row.get("currency"),
        quantity: row.get("quantity"),
        active: row.get("active"),
        category,
        created_date: row.get("created_date"),
        updated_date: row.get("updated_date"),
    }
}

/// Product repository
pub struct ProductRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List all products with their owning category embedded.
    pub async fn list(&self) -> Result<Vec<ProductWithCategory>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT p.id, p.name, p.description, p.price, p.currency, p.quantity,
                   p.active, p.created_date, p.updated_date,
                   c.id AS category_id, c.name AS category_name
            FROM product p
            LEFT JOIN category c ON c.id = p.category_id
            ORDER BY p.id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(product_with_category).collect())
    }

    /// Get a single product by id, with its owning category embedded.
    pub async fn get(&self, id: i32) -> Result<ProductWithCategory, DbError> {
        let row = sqlx::query(
            r#"
            SELECT p.id, p.name, p.description, p.price, p.currency, p.quantity,
                   p.active, p.created_date, p.updated_date,
                   c.id AS category_id, c.name AS category_name
            FROM product p
            LEFT JOIN category c ON c.id = p.category_id
            WHERE p.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::NotFound {
            resource: "product",
            id: id.to_string(),
        })?;

        Ok(product_with_category(row))
    }

    /// List a category's products, verifying the category exists first.
    ///
    /// An existing category with no products yields an empty list, not an
    /// error.
    pub async fn list_by_category(
        &self,
        category_id: i32,
    ) -> Result<Vec<ProductWithCategory>, DbError> {
        if !self.category_exists(category_id).await? {
            return Err(DbError::NotFound {
                resource: "category",
                id: category_id.to_string(),
            });
        }

        let rows = sqlx::query(
            r#"
            SELECT p.id, p.name, p.description, p.price, p.currency, p.quantity,
                   p.active, p.created_date, p.updated_date,
                   c.id AS category_id, c.name AS category_name
            FROM product p
            LEFT JOIN category c ON c.id = p.category_id
            WHERE p.category_id = $1
            ORDER BY p.id
            "#,
        )
        .bind(category_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(product_with_category).collect())
    }

    /// Insert a product after verifying the referenced category exists.
    pub async fn create(&self, new: NewProduct) -> Result<Product, DbError> {
        if !self.category_exists(new.category_id).await? {
            return Err(DbError::UnknownCategory {
                id: new.category_id,
            });
        }

        sqlx::query_as(
            r#"
            INSERT INTO product (name, description, price, currency, quantity, active, category_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, description, price, currency, quantity, active,
                      category_id, created_date, updated_date
            "#,
        )
        .bind(&new.name)
        .bind(&new.description)
        .bind(new.price)
        .bind(&new.currency)
        .bind(new.quantity)
        .bind(new.active)
        .bind(new.category_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| translate_write_error(e, &new.name, new.category_id))
    }

    /// Replace a product wholesale, refreshing its updated_date.
    ///
    /// The uniqueness check skips the row being updated, so keeping the
    /// current name succeeds rather than conflicting.
    pub async fn update(&self, id: i32, upd: ProductUpdate) -> Result<Product, DbError> {
        let taken: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM product WHERE name = $1 AND id <> $2)")
                .bind(&upd.name)
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        if taken.0 {
            return Err(DbError::DuplicateName {
                resource: "product",
                name: upd.name,
            });
        }

        sqlx::query_as(
            r#"
            UPDATE product
            SET name = $1, description = $2, price = $3, currency = $4,
                quantity = $5, active = $6, category_id = $7, updated_date = NOW()
            WHERE id = $8
            RETURNING id, name, description, price, currency, quantity, active,
                      category_id, created_date, updated_date
            "#,
        )
        .bind(&upd.name)
        .bind(&upd.description)
        .bind(upd.price)
        .bind(&upd.currency)
        .bind(upd.quantity)
        .bind(upd.active)
        .bind(upd.category_id)
        .bind(id)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| translate_write_error(e, &upd.name, upd.category_id))?
        .ok_or_else(|| DbError::NotFound {
            resource: "product",
            id: id.to_string(),
        })
    }

    /// Delete a product by id.
    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM product WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "product",
                id: id.to_string(),
            });
        }

        Ok(())
    }

    async fn category_exists(&self, id: i32) -> Result<bool, DbError> {
        let (exists,): (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM category WHERE id = $1)")
                .bind(id)
                .fetch_one(self.pool)
                .await?;

        Ok(exists)
    }
}

/// Map constraint violations from the write race window to their domain
/// errors: duplicate name on the unique constraint, unknown category on
/// the foreign key.
fn translate_write_error(e: sqlx::Error, name: &str, category_id: i32) -> DbError {
    if is_unique_violation(&e) {
        DbError::DuplicateName {
            resource: "product",
            name: name.to_owned(),
        }
    } else if is_foreign_key_violation(&e) {
        DbError::UnknownCategory { id: category_id }
    } else {
        e.into()
    }
}

#[cfg(test)]
mod tests {
    // Round-trips against a real database live in tests/api.rs.
    // Run with: DATABASE_URL=postgres://... cargo test -p katalog-server -- --ignored
}
