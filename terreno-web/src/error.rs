//! Error handling for the web layer.
//!
//! Validation and bad-password cases are handled inline by the form handlers
//! (they re-render the form with a notice); `WebError` covers what is left:
//! storage faults and anything unexpected. Storage faults are logged and
//! surfaced as a server-error page - never flattened into an empty list.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use terreno_core::{StorageError, StoreError, ValidationError};

use crate::pages;

/// Errors a handler can bubble up to the framework.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WebError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(StorageError),

    #[error("internal error: {0}")]
    Internal(String),
}

impl WebError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WebError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            WebError::StorageUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
            WebError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StorageError> for WebError {
    fn from(err: StorageError) -> Self {
        WebError::StorageUnavailable(err)
    }
}

impl From<StoreError> for WebError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(e) => WebError::Validation(e),
            StoreError::Storage(e) => WebError::StorageUnavailable(e),
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            WebError::StorageUnavailable(e) => {
                tracing::error!(error = %e, "request failed: storage unavailable");
            }
            WebError::Internal(msg) => {
                tracing::error!(error = %msg, "request failed");
            }
            WebError::Validation(e) => {
                tracing::debug!(error = %e, "request rejected");
            }
        }
        (status, pages::error_page(status)).into_response()
    }
}

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, WebError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let err: WebError = StorageError::unavailable("disk gone").into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);

        let err: WebError = ValidationError::required("name").into();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_store_error_split() {
        let err: WebError = StoreError::Validation(ValidationError::required("phone")).into();
        assert!(matches!(err, WebError::Validation(_)));

        let err: WebError = StoreError::Storage(StorageError::corrupt("bad row")).into();
        assert!(matches!(err, WebError::StorageUnavailable(_)));
    }
}
