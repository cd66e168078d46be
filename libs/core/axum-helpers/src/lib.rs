//! # Axum Helpers
//!
//! A collection of utilities, middleware, and helpers for building Axum web applications.
//!
//! ## Modules
//!
//! - **[`auth`]**: stateless JWT bearer authentication middleware
//! - **[`server`]**: router assembly, graceful shutdown
//! - **[`errors`]**: structured error responses with error codes
//! - **[`extractors`]**: custom extractors (UUID path, validated JSON)

// Domain modules
pub mod auth;
pub mod errors;
pub mod extractors;
pub mod server;

// Re-export auth types
pub use auth::{ACCESS_TOKEN_TTL, AuthUser, JwtAuth, JwtClaims, JwtConfig, bearer_auth_middleware};

// Re-export server types
pub use server::{create_app, create_router, shutdown_signal};

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorResponse};

// Re-export extractors
pub use extractors::{UuidPath, ValidatedJson};
