//! katalog-server: HTTP CRUD service for a product catalog
//!
//! Two related resources - categories and products - exposed as REST
//! endpoints over a shared PostgreSQL pool. Categories own products:
//! a product must reference an existing category, and a category cannot
//! be deleted while products still reference it.

pub mod db;
pub mod http;
pub mod models;

pub use http::{build_router, run_server, AppState, ServerConfig};
