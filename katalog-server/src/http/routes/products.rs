//! Product endpoints
//!
//! Reads return products with their owning category embedded as
//! `{id, name}`; writes return the flat row with `category_id`. Create
//! fills defaults for omitted optional fields; update replaces the row
//! wholesale and rejects partial bodies.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::repos::{Product, ProductRepo, ProductWithCategory};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{
    format_display, NewProduct, ProductName, ProductUpdate, ValidationError, DEFAULT_CURRENCY,
};

/// Create request body; name, price and category_id are required
#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub quantity: Option<i32>,
    pub active: Option<bool>,
    pub category_id: Option<i32>,
}

/// Update request body; every field is required
#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub currency: Option<String>,
    pub quantity: Option<i32>,
    pub active: Option<bool>,
    pub category_id: Option<i32>,
}

/// Flat product response, as returned by writes
#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub currency: String,
    pub quantity: i32,
    pub active: bool,
    pub category_id: i32,
    pub created_date: String,
    pub updated_date: String,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
            currency: p.currency,
            quantity: p.quantity,
            active: p.active,
            category_id: p.category_id,
            created_date: format_display(p.created_date),
            updated_date: format_display(p.updated_date),
        }
    }
}

/// Embedded category in read responses
#[derive(Debug, Serialize)]
pub struct CategoryRefResponse {
    pub id: i32,
    pub name: String,
}

/// Product with embedded category, as returned by reads
#[derive(Debug, Serialize)]
pub struct ProductDetailResponse {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub currency: String,
    pub quantity: i32,
    pub active: bool,
    pub category: Option<CategoryRefResponse>,
    pub created_date: String,
    pub updated_date: String,
}

impl From<ProductWithCategory> for ProductDetailResponse {
    fn from(p: ProductWithCategory) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            price: p.price,
            currency: p.currency,
            quantity: p.quantity,
            active: p.active,
            category: p.category.map(|c| CategoryRefResponse {
                id: c.id,
                name: c.name,
            }),
            created_date: format_display(p.created_date),
            updated_date: format_display(p.updated_date),
        }
    }
}

fn validate_create(req: CreateProductRequest) -> Result<NewProduct, ValidationError> {
    let name = req.name.ok_or(ValidationError::Missing { field: "name" })?;
    let name = ProductName::new(&name)?;
    let price = req.price.ok_or(ValidationError::Missing { field: "price" })?;
    let category_id = req.category_id.ok_or(ValidationError::Missing {
        field: "category_id",
    })?;

    Ok(NewProduct {
        name: name.into_string(),
        description: req.description,
        price,
        currency: req.currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_owned()),
        quantity: req.quantity.unwrap_or(0),
        active: req.active.unwrap_or(true),
        category_id,
    })
}

fn validate_update(req: UpdateProductRequest) -> Result<ProductUpdate, ValidationError> {
    let name = req.name.ok_or(ValidationError::Missing { field: "name" })?;
    let name = ProductName::new(&name)?;

    Ok(ProductUpdate {
        name: name.into_string(),
        description: req.description.ok_or(ValidationError::Missing {
            field: "description",
        })?,
        price: req.price.ok_or(ValidationError::Missing { field: "price" })?,
        currency: req.currency.ok_or(ValidationError::Missing { field: "currency" })?,
        quantity: req.quantity.ok_or(ValidationError::Missing { field: "quantity" })?,
        active: req.active.ok_or(ValidationError::Missing { field: "active" })?,
        category_id: req.category_id.ok_or(ValidationError::Missing {
            field: "category_id",
        })?,
    })
}

/// GET /product - list all products with embedded category
async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ProductDetailResponse>>, ApiError> {
    let rows = ProductRepo::new(&state.pool).list().await?;

    Ok(Json(
        rows.into_iter().map(ProductDetailResponse::from).collect(),
    ))
}

/// GET /product/{id} - get a single product with embedded category
async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ProductDetailResponse>, ApiError> {
    let product = ProductRepo::new(&state.pool).get(id).await?;

    Ok(Json(ProductDetailResponse::from(product)))
}

/// GET /product/category/{category_id} - list one category's products
async fn list_products_by_category(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<i32>,
) -> Result<Json<Vec<ProductDetailResponse>>, ApiError> {
    let rows = ProductRepo::new(&state.pool)
        .list_by_category(category_id)
        .await?;

    Ok(Json(
        rows.into_iter().map(ProductDetailResponse::from).collect(),
    ))
}

/// POST /product - create a product
async fn create_product(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    let new = validate_create(req)?;
    let created = ProductRepo::new(&state.pool).create(new).await?;

    Ok((StatusCode::CREATED, Json(ProductResponse::from(created))))
}

/// PUT /product/{id} - replace a product wholesale, responds 201 with the
/// updated row
async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    let upd = validate_update(req)?;
    let updated = ProductRepo::new(&state.pool).update(id, upd).await?;

    Ok((StatusCode::CREATED, Json(ProductResponse::from(updated))))
}

/// DELETE /product/{id} - delete a product, responds 204 with no body
async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    ProductRepo::new(&state.pool).delete(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Product routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/product", get(list_products).post(create_product))
        .route(
            "/product/category/{category_id}",
            get(list_products_by_category),
        )
        .route(
            "/product/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_update() -> UpdateProductRequest {
        UpdateProductRequest {
            name: Some("Cola".into()),
            description: Some("330ml can".into()),
            price: Some(10.0),
            currency: Some("Rp".into()),
            quantity: Some(5),
            active: Some(true),
            category_id: Some(1),
        }
    }

    #[test]
    fn create_applies_defaults() {
        let new = validate_create(CreateProductRequest {
            name: Some("Cola".into()),
            description: None,
            price: Some(10.0),
            currency: None,
            quantity: None,
            active: None,
            category_id: Some(1),
        })
        .unwrap();

        assert_eq!(new.currency, "Rp");
        assert_eq!(new.quantity, 0);
        assert!(new.active);
        assert!(new.description.is_none());
    }

    #[test]
    fn create_keeps_explicit_values() {
        let new = validate_create(CreateProductRequest {
            name: Some("Cola".into()),
            description: Some("330ml can".into()),
            price: Some(10.0),
            currency: Some("USD".into()),
            quantity: Some(12),
            active: Some(false),
            category_id: Some(1),
        })
        .unwrap();

        assert_eq!(new.currency, "USD");
        assert_eq!(new.quantity, 12);
        assert!(!new.active);
        assert_eq!(new.description.as_deref(), Some("330ml can"));
    }

    #[test]
    fn create_requires_name_price_and_category() {
        let err = validate_create(CreateProductRequest {
            name: None,
            description: None,
            price: Some(10.0),
            currency: None,
            quantity: None,
            active: None,
            category_id: Some(1),
        })
        .unwrap_err();
        assert_eq!(err, ValidationError::Missing { field: "name" });

        let err = validate_create(CreateProductRequest {
            name: Some("Cola".into()),
            description: None,
            price: None,
            currency: None,
            quantity: None,
            active: None,
            category_id: Some(1),
        })
        .unwrap_err();
        assert_eq!(err, ValidationError::Missing { field: "price" });

        let err = validate_create(CreateProductRequest {
            name: Some("Cola".into()),
            description: None,
            price: Some(10.0),
            currency: None,
            quantity: None,
            active: None,
            category_id: None,
        })
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::Missing {
                field: "category_id"
            }
        );
    }

    #[test]
    fn create_rejects_empty_name() {
        let err = validate_create(CreateProductRequest {
            name: Some(String::new()),
            description: None,
            price: Some(10.0),
            currency: None,
            quantity: None,
            active: None,
            category_id: Some(1),
        })
        .unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "name" });
    }

    #[test]
    fn update_requires_every_field() {
        let mut req = full_update();
        req.active = None;
        let err = validate_update(req).unwrap_err();
        assert_eq!(err, ValidationError::Missing { field: "active" });

        let mut req = full_update();
        req.description = None;
        let err = validate_update(req).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Missing {
                field: "description"
            }
        );
    }

    #[test]
    fn update_accepts_false_and_zero_values() {
        let mut req = full_update();
        req.active = Some(false);
        req.quantity = Some(0);
        req.price = Some(0.0);

        let upd = validate_update(req).unwrap();
        assert!(!upd.active);
        assert_eq!(upd.quantity, 0);
        assert_eq!(upd.price, 0.0);
    }
}
