use std::sync::Arc;

use axum::{
    extract::{Extension, OriginalUri},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::{debug, instrument};
use utoipa::ToSchema;

use crate::error::{Error, ErrorResponse};
use crate::pordego::AppState;

#[derive(ToSchema, Deserialize, Debug)]
pub struct VerifyRequest {
    token: String,
    username: String,
}

#[utoipa::path(
    post,
    path = "/verify",
    request_body = VerifyRequest,
    responses(
        (status = 202, description = "Token is valid for the given username"),
        (status = 400, description = "Missing request body", body = ErrorResponse),
        (status = 403, description = "Token expired or invalid", body = ErrorResponse),
    ),
    tag = "auth",
)]
#[instrument(skip(state, payload))]
pub async fn verify(
    Extension(state): Extension<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    payload: Option<Json<VerifyRequest>>,
) -> Result<StatusCode, ErrorResponse> {
    let path = uri.path();

    let Some(Json(request)) = payload else {
        let err = Error::Validation(vec!["request body is required".to_string()]);
        return Err(ErrorResponse::new(&err, path));
    };

    // Boolean gate: every failure kind collapses to a 403.
    if state.codec.validate(&request.token, &request.username) {
        Ok(StatusCode::ACCEPTED)
    } else {
        debug!("Token validation failed for {}", request.username);
        let err = Error::AccessDenied("Token expired or invalid".to_string());
        Err(ErrorResponse::new(&err, path))
    }
}
