//! request-level errors and how they map onto http responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ApiError {
    /// the endpoint exists but not for this method
    #[error("Method not allowed")]
    MethodNotAllowed,
    /// simulated whole-device outage for the current tick
    #[error("Internal Server Error")]
    DeviceFailure,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::DeviceFailure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ApiError::MethodNotAllowed.into_response().status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(ApiError::DeviceFailure.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
