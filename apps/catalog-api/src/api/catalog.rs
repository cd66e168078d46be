//! Catalog API routes

use axum::Router;
use axum_helpers::JwtAuth;
use domain_catalog::{handlers, PgProductRepository, ProductService};

use crate::state::AppState;

/// Create the catalog routers with their dependencies injected
pub fn routes(state: &AppState) -> Router {
    let repository = PgProductRepository::new(state.db.clone());
    let service = ProductService::new(repository);
    let auth = JwtAuth::new(&state.config.jwt);

    Router::new()
        .nest("/products", handlers::router(service.clone(), auth))
        .nest("/categories", handlers::categories_router(service))
}
