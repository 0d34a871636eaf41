use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::json;

use crate::error::Error;

/// Standard API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    #[must_use]
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }
}

/// API error that converts to a proper HTTP response
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::ReservedGroupName(_) => StatusCode::FORBIDDEN,
            Error::DuplicateGroup(_) | Error::GroupNotEmpty(_) => StatusCode::CONFLICT,
            Error::GroupNotFound(_)
            | Error::NotAMember { .. }
            | Error::NoPermissionsConfigured(_) => StatusCode::NOT_FOUND,
            Error::InvalidPrincipal(_) | Error::InvalidGroupName(_) => StatusCode::BAD_REQUEST,
            Error::StoreUnavailable(_) => {
                tracing::error!("{err}");
                StatusCode::SERVICE_UNAVAILABLE
            }
            Error::Io(_) | Error::Config(_) => {
                tracing::error!("{err}");
                return Self::internal("Internal server error");
            }
        };
        Self::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({ "data": null, "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (Error::ReservedGroupName("server_admins".into()), StatusCode::FORBIDDEN),
            (Error::DuplicateGroup("g".into()), StatusCode::CONFLICT),
            (Error::GroupNotEmpty("g".into()), StatusCode::CONFLICT),
            (Error::GroupNotFound("g".into()), StatusCode::NOT_FOUND),
            (Error::NoPermissionsConfigured("beta".into()), StatusCode::NOT_FOUND),
            (Error::InvalidPrincipal("".into()), StatusCode::BAD_REQUEST),
            (
                Error::StoreUnavailable(Box::new(std::io::Error::other("connection refused"))),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
            (Error::Config("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).status, status);
        }
    }

    #[test]
    fn test_message_names_offender() {
        let err = ApiError::from(Error::GroupNotFound("officers".into()));
        assert!(err.message.contains("officers"));
    }
}
