use axum::{
    Json,
    extract::{Path, RawQuery, State},
};
use tagshelf_core::{CategoryBuckets, ImageRecord};
use tracing::debug;

use crate::{
    handlers::catalog::query_params,
    infra::{app_state::AppState, base_url::BaseUrl, errors::AppResult},
};

/// GET /images - Images across categories, bucketed by category.
///
/// Query keys: `categories` and `tag` (repeated or comma-separated) and
/// `limit`, a cap on the total number of images across all categories.
pub async fn list_images_handler(
    State(state): State<AppState>,
    BaseUrl(base): BaseUrl,
    RawQuery(query): RawQuery,
) -> AppResult<Json<CategoryBuckets>> {
    let params = query_params(query.as_deref());
    debug!(?params, "list images request");

    let buckets = state
        .run_query(move |engine| engine.list_all(&params, &base))
        .await?;

    Ok(Json(buckets))
}

/// GET /images/{category} - Images of one category.
///
/// Query keys: `tag` and `limit`, the latter local to this category.
pub async fn list_category_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
    BaseUrl(base): BaseUrl,
    RawQuery(query): RawQuery,
) -> AppResult<Json<Vec<ImageRecord>>> {
    let params = query_params(query.as_deref());
    debug!(%category, ?params, "list category request");

    let records = state
        .run_query(move |engine| {
            engine.list_category(&category, &params, &base)
        })
        .await?;

    Ok(Json(records))
}
