use axum::Json;
use utoipa::openapi::{InfoBuilder, License};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::pordego::handlers::health::health,
        crate::pordego::handlers::login::login,
        crate::pordego::handlers::verify::verify,
    ),
    components(schemas(
        crate::auth::Credentials,
        crate::auth::AuthResult,
        crate::pordego::handlers::verify::VerifyRequest,
        crate::error::ErrorResponse,
    )),
    tags(
        (name = "auth", description = "Session token issuance and verification"),
        (name = "health", description = "Service liveness"),
    )
)]
struct ApiDoc;

/// `OpenAPI` document with info taken from Cargo metadata.
///
/// Add new endpoints to `paths(...)` on [`ApiDoc`] so they stay documented.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();

    let mut info = InfoBuilder::new()
        .title(env!("CARGO_PKG_NAME"))
        .version(env!("CARGO_PKG_VERSION"))
        .description(optional_str(env!("CARGO_PKG_DESCRIPTION")))
        .build();
    info.license = optional_str(env!("CARGO_PKG_LICENSE")).map(License::new);

    doc.info = info;
    doc
}

fn optional_str(value: &'static str) -> Option<&'static str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

pub async fn serve() -> Json<utoipa::openapi::OpenApi> {
    Json(openapi())
}
