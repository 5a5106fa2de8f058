// errors.rs
use astra::Response;
use thiserror::Error;

/// Errors a request handler can end in. Each maps to one HTTP status and,
/// on the JSON API, one machine-readable code.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Not Found")]
    NotFound,
    #[error("Invalid car ID. Must be a number.")]
    InvalidId,
    #[error("No cars found in database")]
    NoCarsFound,
    #[error("Car with ID {0} not found")]
    CarNotFound(i64),
    #[error("Internal Server Error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status(&self) -> u16 {
        match self {
            ServerError::NotFound | ServerError::NoCarsFound | ServerError::CarNotFound(_) => 404,
            ServerError::InvalidId => 400,
            ServerError::Internal(_) => 500,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ServerError::NotFound => "NOT_FOUND",
            ServerError::InvalidId => "INVALID_ID",
            ServerError::NoCarsFound => "NO_CARS_FOUND",
            ServerError::CarNotFound(_) => "CAR_NOT_FOUND",
            ServerError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn is_internal(&self) -> bool {
        self.status() >= 500
    }
}

// Type alias commonly used by route handlers.
pub type ResultResp = Result<Response, ServerError>;
