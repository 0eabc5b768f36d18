use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::get,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::{
    handlers::{
        catalog::{
            list_category_handler, list_images_handler, search_images_handler,
            serve_image_handler,
        },
        home_handler, not_found_handler,
    },
    infra::{app_state::AppState, config::Config},
};

/// Route paths served by Tagshelf.
pub mod paths {
    pub const HOME: &str = "/";
    pub const IMAGES: &str = "/images";
    pub const CATEGORY: &str = "/images/{category}";
    pub const IMAGE_FILE: &str = "/images/{category}/{filename}";
    pub const SEARCH: &str = "/images-search";
}

/// Build the application router with middleware and state attached.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(state.config());

    Router::new()
        .route(paths::HOME, get(home_handler))
        .route(paths::IMAGES, get(list_images_handler))
        .route(paths::CATEGORY, get(list_category_handler))
        .route(paths::IMAGE_FILE, get(serve_image_handler))
        .route(paths::SEARCH, get(search_images_handler))
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::HEAD, Method::OPTIONS])
}
