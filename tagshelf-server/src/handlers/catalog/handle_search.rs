use axum::{
    Json,
    extract::{RawQuery, State},
};
use tagshelf_core::ImageRecord;
use tracing::debug;

use crate::{
    handlers::catalog::query_params,
    infra::{app_state::AppState, base_url::BaseUrl, errors::AppResult},
};

/// GET /images-search - Tag search across every category.
///
/// `tag` is required (repeated or comma-separated, matched
/// case-insensitively); `limit` caps the total result count.
pub async fn search_images_handler(
    State(state): State<AppState>,
    BaseUrl(base): BaseUrl,
    RawQuery(query): RawQuery,
) -> AppResult<Json<Vec<ImageRecord>>> {
    let params = query_params(query.as_deref());
    debug!(?params, "image search request");

    let hits = state
        .run_query(move |engine| engine.search(&params, &base))
        .await?;

    Ok(Json(hits))
}
