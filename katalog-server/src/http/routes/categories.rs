//! Category endpoints
//!
//! Writes respond 201 with the affected row, including deletes - the
//! deleted row is returned once more in the body.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::db::repos::{Category, CategoryRepo};
use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::{format_display, CategoryName, ValidationError};

/// Create/rename request body
#[derive(Debug, Deserialize)]
pub struct CategoryRequest {
    pub name: Option<String>,
}

/// Category response
#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub created_date: String,
    pub updated_date: String,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            created_date: format_display(c.created_date),
            updated_date: format_display(c.updated_date),
        }
    }
}

fn parse_name(req: CategoryRequest) -> Result<CategoryName, ValidationError> {
    let name = req.name.ok_or(ValidationError::Missing { field: "name" })?;
    CategoryName::new(&name)
}

/// GET /category - list all categories
async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let rows = CategoryRepo::new(&state.pool).list().await?;

    Ok(Json(rows.into_iter().map(CategoryResponse::from).collect()))
}

/// POST /category - create a category
async fn create_category(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    let name = parse_name(req)?;
    let created = CategoryRepo::new(&state.pool).create(name).await?;

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(created))))
}

/// PUT /category/{id} - rename a category, responds 201 with the updated row
async fn update_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Json(req): Json<CategoryRequest>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    let name = parse_name(req)?;
    let updated = CategoryRepo::new(&state.pool).update(id, name).await?;

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(updated))))
}

/// DELETE /category/{id} - delete an unreferenced category, responds 201
/// with the deleted row
async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, Json<CategoryResponse>), ApiError> {
    let deleted = CategoryRepo::new(&state.pool).delete(id).await?;

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(deleted))))
}

/// Category routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/category", get(list_categories).post(create_category))
        .route("/category/{id}", put(update_category).delete(delete_category))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_name_is_missing() {
        let err = parse_name(CategoryRequest { name: None }).unwrap_err();
        assert_eq!(err, ValidationError::Missing { field: "name" });
    }

    #[test]
    fn empty_name_is_rejected() {
        let err = parse_name(CategoryRequest {
            name: Some(String::new()),
        })
        .unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "name" });
    }

    #[test]
    fn valid_name_passes() {
        let name = parse_name(CategoryRequest {
            name: Some("Drinks".into()),
        })
        .unwrap();
        assert_eq!(name.as_str(), "Drinks");
    }
}
