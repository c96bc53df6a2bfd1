use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use shared_types::ErrorResponse;

/// Errors surfaced by the record-query layer and the lookup built on it.
///
/// Nothing here is retried; every variant maps onto a single failed request.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error("Malformed input: {0}")]
    MalformedInput(#[from] serde_json::Error),

    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    #[error("Unknown doctype: {0}")]
    UnknownDoctype(String),

    #[error("Unknown field '{field}' for doctype {doctype}")]
    UnknownField { doctype: String, field: String },

    #[error("{0} not found")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Failed to get DB connection from pool: {0}")]
    Pool(#[from] r2d2::Error),
}

pub type Result<T> = std::result::Result<T, LookupError>;

impl ResponseError for LookupError {
    fn status_code(&self) -> StatusCode {
        match self {
            LookupError::MalformedInput(_)
            | LookupError::InvalidFilter(_)
            | LookupError::UnknownDoctype(_)
            | LookupError::UnknownField { .. } => StatusCode::BAD_REQUEST,
            LookupError::NotFound(_) => StatusCode::NOT_FOUND,
            LookupError::Database(_) | LookupError::Pool(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}
