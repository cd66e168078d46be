//! Authentication module.
//!
//! This module provides:
//! - Stateless JWT token creation and verification
//! - Bearer authentication middleware for protected routes
//!
//! Token issuance is an external responsibility; `create_token` exists for
//! tests and tooling. The middleware attaches an [`AuthUser`] (user id plus
//! role name) to the request extensions, or rejects with 401 before the
//! handler runs.
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, bearer_auth_middleware};
//! use core_config::FromEnv;
//!
//! let config = JwtConfig::from_env()?;
//! let auth = JwtAuth::new(&config);
//!
//! let protected = Router::new()
//!     .route("/api/protected", get(handler))
//!     .layer(axum::middleware::from_fn_with_state(auth, bearer_auth_middleware));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;

// Re-export commonly used types
pub use config::JwtConfig;
pub use jwt::{ACCESS_TOKEN_TTL, AuthUser, JwtAuth, JwtClaims};
pub use middleware::bearer_auth_middleware;
