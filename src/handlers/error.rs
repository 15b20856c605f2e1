// src/handlers/error.rs
use std::fmt;
use warp::http::StatusCode;
use warp::reject::Reject;

use crate::services::store::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    NotFound,
    InvalidRequest,
    Conflict,
}

#[derive(Debug, Clone)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError {
            kind: ApiErrorKind::NotFound,
            message: message.into(),
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        ApiError {
            kind: ApiErrorKind::InvalidRequest,
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError {
            kind: ApiErrorKind::Conflict,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind {
            ApiErrorKind::NotFound => StatusCode::NOT_FOUND,
            ApiErrorKind::InvalidRequest => StatusCode::BAD_REQUEST,
            ApiErrorKind::Conflict => StatusCode::CONFLICT,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ApiError::not_found(err.to_string()),
            StoreError::InvalidTransition { .. } => ApiError::conflict(err.to_string()),
            StoreError::InvalidAmount(_) => ApiError::invalid_request(err.to_string()),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}
impl Reject for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::LoanStatus;

    #[test]
    fn every_store_error_maps_to_a_client_status() {
        let not_found = ApiError::from(StoreError::NotFound {
            entity: "member",
            id: 7,
        });
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(not_found.message, "member 7 not found");

        let conflict = ApiError::from(StoreError::InvalidTransition {
            action: "approve",
            from: LoanStatus::Paid,
        });
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let invalid = ApiError::from(StoreError::InvalidAmount(f64::NAN));
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    }
}
