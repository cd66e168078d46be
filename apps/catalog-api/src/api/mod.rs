//! API routes module

pub mod catalog;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    catalog::routes(state)
}
