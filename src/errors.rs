use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use thiserror::Error;

use crate::domain::errors::{DomainError, FieldError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    BadRequest {
        message: String,
        errors: Vec<FieldError>,
    },

    #[error("You must be logged in")]
    Unauthorized,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Admin access required")]
    Forbidden,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest {
            message: message.into(),
            errors: Vec::new(),
        }
    }

    pub fn invalid_field(message: impl Into<String>, field: &str, detail: impl Into<String>) -> Self {
        AppError::BadRequest {
            message: message.into(),
            errors: vec![FieldError::new(field, detail)],
        }
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound(entity) => AppError::NotFound(entity),
            DomainError::InvalidInput(msg) => AppError::bad_request(msg),
            DomainError::Validation { message, errors } => AppError::BadRequest { message, errors },
            DomainError::InvalidCredentials => AppError::InvalidCredentials,
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl actix_web::ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::BadRequest { message, errors } => serde_json::json!({
                "message": message,
                "errors": errors,
            }),
            AppError::Internal(detail) => {
                log::error!("Request failed: {}", detail);
                serde_json::json!({ "message": "Internal server error" })
            }
            _ => serde_json::json!({ "message": self.to_string() }),
        };
        HttpResponse::build(self.status_code()).json(body)
    }
}
