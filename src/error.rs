use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Failure taxonomy for the whole service.
///
/// Components raise these and never format a wire response themselves;
/// [`ErrorResponse`] is the single translation boundary.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bad credentials, opaque upstream failure from the authenticator.
    #[error("{0}")]
    Authentication(String),

    /// Post-authentication lookup miss, carries the username.
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("{0}")]
    AccessDenied(String),

    /// One or more field-level messages, kept in encounter order.
    #[error("{}", .0.join(", "))]
    Validation(Vec<String>),

    #[error("{0}")]
    DuplicateEmail(String),

    #[error("{0}")]
    MemberNotFound(String),

    /// Bad signature, wrong issuer or malformed token structure.
    #[error("{0}")]
    TokenInvalid(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("{0}")]
    Internal(String),
}

impl Error {
    /// Map a failure kind to its HTTP status and short machine-readable code.
    ///
    /// Ordered by specificity; the final arm is the catch-all for every kind
    /// without a named row (authentication and token failures included).
    #[must_use]
    pub fn classify(&self) -> (StatusCode, &'static str) {
        match self {
            Error::UserNotFound(_) => (StatusCode::NOT_FOUND, "USER_NOT_FOUND"),
            Error::AccessDenied(_) => (StatusCode::FORBIDDEN, "ACCESS_DENIED"),
            Error::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
            Error::DuplicateEmail(_) => (StatusCode::CONFLICT, "DUPLICATE_EMAIL"),
            Error::MemberNotFound(_) => (StatusCode::NOT_FOUND, "MEMBER_NOT_FOUND"),
            Error::Authentication(_)
            | Error::TokenInvalid(_)
            | Error::TokenExpired
            | Error::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_SERVER_ERROR"),
        }
    }
}

/// Wire shape for every failed request.
#[derive(ToSchema, Serialize, Debug)]
pub struct ErrorResponse {
    status: u16,
    error: String,
    message: String,
    path: String,
}

impl ErrorResponse {
    #[must_use]
    pub fn new(error: &Error, path: &str) -> Self {
        let (status, code) = error.classify();

        let mut message = error.to_string();
        if message.is_empty() {
            message = "Internal Server Error".to_string();
        }

        Self {
            status: status.as_u16(),
            error: code.to_string(),
            message,
            path: path.to_string(),
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self)).into_response()
    }
}
