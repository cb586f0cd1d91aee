use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{services::documentation::ApiDoc, state::SharedState};

/// Swagger UI at `/docs`, raw document at `/api-doc/openapi.json`.
pub fn router() -> Router<SharedState> {
    let mut doc = ApiDoc::openapi();
    doc.info.title = "Sevens playtime tracker".into();
    doc.info.version = env!("CARGO_PKG_VERSION").into();

    SwaggerUi::new("/docs")
        .url("/api-doc/openapi.json", doc)
        .into()
}
