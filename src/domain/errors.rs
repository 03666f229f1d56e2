use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// A single failed check on an input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("{message}")]
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// Turns collected field errors into a result, `Ok` when nothing failed.
    pub fn check(message: &str, errors: Vec<FieldError>) -> Result<(), DomainError> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation {
                message: message.to_string(),
                errors,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_passes_without_errors() {
        assert!(DomainError::check("Invalid order data", vec![]).is_ok());
    }

    #[test]
    fn check_keeps_every_field_error() {
        let err = DomainError::check(
            "Invalid order data",
            vec![
                FieldError::new("customerEmail", "must be a valid email"),
                FieldError::new("items", "must not be empty"),
            ],
        )
        .unwrap_err();

        match err {
            DomainError::Validation { message, errors } => {
                assert_eq!(message, "Invalid order data");
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[1].field, "items");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn not_found_names_the_entity() {
        assert_eq!(DomainError::NotFound("Order").to_string(), "Order not found");
    }
}
