pub mod handle_image;
pub mod handle_listing;
pub mod handle_search;

pub use handle_image::serve_image_handler;
pub use handle_listing::{list_category_handler, list_images_handler};
pub use handle_search::search_images_handler;

use tagshelf_core::QueryParams;
use url::form_urlencoded;

/// Decode the raw query string keeping repeated keys (`?tag=a&tag=b`).
pub(crate) fn query_params(raw: Option<&str>) -> QueryParams {
    let raw = raw.unwrap_or_default();
    QueryParams::from_pairs(form_urlencoded::parse(raw.as_bytes()))
}
