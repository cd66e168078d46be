//! PostgreSQL support built on SeaORM.

pub mod config;
pub mod connector;

pub use config::PostgresConfig;
pub use connector::{
    connect, connect_from_config, connect_from_config_with_retry, connect_with_options,
    run_migrations,
};
