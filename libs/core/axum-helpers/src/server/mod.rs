//! Server infrastructure module.
//!
//! This module provides:
//! - Application setup with OpenAPI documentation
//! - Graceful shutdown on SIGINT/SIGTERM
//!
//! # Example
//!
//! ```ignore
//! use axum_helpers::server::{create_app, create_router};
//! use core_config::server::ServerConfig;
//!
//! // Create router with API documentation
//! let router = create_router::<ApiDoc>(api_routes);
//!
//! // Start server with graceful shutdown
//! create_app(router, &ServerConfig::default()).await?;
//! ```

pub mod app;
pub mod shutdown;

// Re-export commonly used types and functions
pub use app::{create_app, create_router};
pub use shutdown::shutdown_signal;
