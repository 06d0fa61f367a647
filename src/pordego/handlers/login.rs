use std::sync::Arc;

use axum::{
    extract::{Extension, OriginalUri},
    Json,
};
use regex::Regex;
use tracing::{debug, instrument};

use crate::auth::{AuthResult, Credentials};
use crate::error::{Error, ErrorResponse};
use crate::pordego::AppState;

#[utoipa::path(
    post,
    path = "/login",
    request_body = Credentials,
    responses(
        (status = 200, description = "Login successful", body = AuthResult, content_type = "application/json"),
        (status = 400, description = "Missing or malformed credential fields", body = ErrorResponse),
        (status = 404, description = "Authenticated user has no stored identity", body = ErrorResponse),
        (status = 500, description = "Bad credentials or internal failure", body = ErrorResponse),
    ),
    tag = "auth",
)]
#[instrument(skip(state, payload))]
pub async fn login(
    Extension(state): Extension<Arc<AppState>>,
    OriginalUri(uri): OriginalUri,
    payload: Option<Json<Credentials>>,
) -> Result<Json<AuthResult>, ErrorResponse> {
    let path = uri.path();

    let Some(Json(credentials)) = payload else {
        let err = Error::Validation(vec!["request body is required".to_string()]);
        return Err(ErrorResponse::new(&err, path));
    };

    validate_credentials(&credentials).map_err(|err| ErrorResponse::new(&err, path))?;

    let result = state.auth.login(&credentials).map_err(|err| {
        debug!("Login failed for {}: {}", credentials.username, err);
        ErrorResponse::new(&err, path)
    })?;

    Ok(Json(result))
}

fn validate_credentials(credentials: &Credentials) -> Result<(), Error> {
    let mut errors = Vec::new();

    if credentials.username.trim().is_empty() {
        errors.push("username must not be blank".to_string());
    } else if !valid_username(&credentials.username) {
        errors.push("username contains invalid characters".to_string());
    }

    if credentials.password.is_empty() {
        errors.push("password must not be blank".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation(errors))
    }
}

pub fn valid_username(username: &str) -> bool {
    Regex::new(r"^[A-Za-z0-9._@-]{1,64}$").map_or(false, |re| re.is_match(username))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn valid_username_accepts_common_shapes() {
        assert!(valid_username("alice"));
        assert!(valid_username("alice.smith@example.org"));
        assert!(valid_username("user_01-x"));
    }

    #[test]
    fn valid_username_rejects_spaces_and_controls() {
        assert!(!valid_username("alice smith"));
        assert!(!valid_username("alice\n"));
        assert!(!valid_username(""));
    }

    #[test]
    fn blank_fields_collect_in_encounter_order() {
        let result = validate_credentials(&credentials("  ", ""));

        match result {
            Err(Error::Validation(errors)) => assert_eq!(
                errors,
                vec![
                    "username must not be blank".to_string(),
                    "password must not be blank".to_string(),
                ]
            ),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn well_formed_credentials_pass() {
        assert!(validate_credentials(&credentials("alice", "pw1")).is_ok());
    }
}
