use axum::{
    extract::{Path, Request, State},
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::warn;

use crate::infra::{
    app_state::AppState,
    errors::{AppError, AppResult},
};

/// GET /images/{category}/{filename} - Bytes of a catalogued image.
pub async fn serve_image_handler(
    State(state): State<AppState>,
    Path((category, filename)): Path<(String, String)>,
    request: Request,
) -> AppResult<Response> {
    let lookup = (category.clone(), filename.clone());
    let path = state
        .blocking(move |engine| {
            engine.catalog().resolve_image(&lookup.0, &lookup.1)
        })
        .await?
        .ok_or_else(|| {
            warn!(%category, %filename, "image not found");
            AppError::not_found("Image not found")
        })?;

    let response = match ServeFile::new(path).oneshot(request).await {
        Ok(response) => response,
        Err(never) => match never {},
    };

    Ok(response.into_response())
}
