//! # Tagshelf Server
//!
//! HTTP front end for the Tagshelf image catalog.
//!
//! ## Endpoints
//!
//! - `GET /images`: images across categories, bucketed by category
//! - `GET /images/{category}`: images of one category
//! - `GET /images-search`: tag search across all categories
//! - `GET /images/{category}/{filename}`: image bytes
//!
//! Filters (`categories`, `tag`) accept repeated keys or comma lists;
//! `limit` caps the number of returned images.

pub mod handlers;
pub mod infra;
pub mod routes;

pub use infra::app_state::AppState;
pub use routes::create_router;
