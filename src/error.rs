//! Error taxonomy and its mapping onto HTTP failure envelopes.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;
use tracing::{error, warn};

use crate::response::Failure;
use crate::store::StoreError;

pub type Result<T> = std::result::Result<T, ApiError>;

const PERSISTENCE_MESSAGE: &str = "Database operation failed";

/// Errors surfaced by the handlers.
///
/// Every variant renders as `{"success": false, "message": ...}`; only the
/// status code tells the kinds apart.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or malformed input, including duplicate unique values.
    #[error("{0}")]
    Validation(String),

    #[error("`{0}` is not a valid id")]
    InvalidId(String),

    #[error("Data not found")]
    NotFound,

    #[error("persistence failure: {0}")]
    Persistence(#[from] StoreError),

    #[error("store is not registered on the application")]
    MissingState,
}

impl ApiError {
    /// Text sent to the caller. Driver diagnostics stay in the logs.
    fn public_message(&self) -> String {
        match self {
            Self::Persistence(_) => PERSISTENCE_MESSAGE.to_owned(),
            Self::MissingState => "Internal server error".to_owned(),
            other => other.to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MissingState => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) | Self::InvalidId(_) | Self::Persistence(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::Persistence(_) | Self::MissingState => error!(error = %self, "request failed"),
            Self::NotFound => {}
            _ => warn!(error = %self, "request rejected"),
        }
        HttpResponse::build(self.status_code()).json(Failure::new(self.public_message()))
    }
}
