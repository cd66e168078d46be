use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// The `category` query value was missing or non-numeric. Reported as
    /// 404, matching the listing contract.
    #[error("Invalid category ID: '{0}'")]
    InvalidCategory(String),

    #[error("Product not found: {0}")]
    NotFound(Uuid),

    /// A write referenced a category id with no row behind it (foreign key
    /// violation).
    #[error("Unknown category: {0}")]
    UnknownCategory(i32),

    #[error("Invalid input: {0}")]
    Validation(String),

    /// Role gate or ownership gate failed.
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl CatalogError {
    /// Classify a SeaORM error for a statement where a foreign-key violation
    /// can only mean an unknown category reference.
    pub(crate) fn from_db_with_category(err: DbErr, category_id: Option<i32>) -> Self {
        if let (Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(_)), Some(id)) =
            (err.sql_err(), category_id)
        {
            tracing::info!(category_id = id, "rejected write referencing unknown category");
            return CatalogError::UnknownCategory(id);
        }
        Self::from_db(err)
    }

    /// Classify a SeaORM error. The full error is logged here; the client
    /// only ever sees the generic category.
    pub(crate) fn from_db(err: DbErr) -> Self {
        match &err {
            DbErr::ConnectionAcquire(_) => {
                tracing::warn!(error = %err, "database connection unavailable");
                CatalogError::Unavailable("Database is temporarily unavailable".to_string())
            }
            _ => {
                tracing::error!(error = %err, "database operation failed");
                CatalogError::Database(err.to_string())
            }
        }
    }
}

/// Convert CatalogError to AppError for standardized error responses
impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidCategory(_) => AppError::NotFound("Invalid category ID".to_string()),
            CatalogError::NotFound(_) => AppError::NotFound("Product not found".to_string()),
            CatalogError::UnknownCategory(id) => {
                AppError::BadRequest(format!("Unknown category: {}", id))
            }
            CatalogError::Validation(msg) => AppError::BadRequest(msg),
            CatalogError::Unauthorized => AppError::Unauthorized("Unauthorized".to_string()),
            CatalogError::Unavailable(msg) => AppError::ServiceUnavailable(msg),
            CatalogError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        // Convert to AppError for the standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
