use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::{database::repository::StoreError, model::validation::ValidationError};

#[derive(Error, Debug)]
pub enum ApiError {
    /// Missing / undecodable body, bad path parameter or failed field validation
    #[error("{0}")]
    InvalidInput(String),
    #[error("person not found")]
    NotFound,
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::InvalidInput(err.to_string())
    }
}

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub status: u16,
    pub error: String,
    pub message: String,
}

impl ErrorBody {
    fn new(status: StatusCode, message: String) -> Self {
        Self {
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Unknown").to_string(),
            message,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        match self {
            ApiError::InvalidInput(message) => {
                HttpResponse::build(status).json(ErrorBody::new(status, message.clone()))
            }
            ApiError::NotFound => HttpResponse::build(status).finish(),
            ApiError::Store(err) => {
                // Store details stay in the logs
                log::error!("Store failure: {}", err);

                HttpResponse::build(status).json(ErrorBody::new(
                    status,
                    "internal server error".to_string(),
                ))
            }
        }
    }
}
