//! HTTP request handlers organized by functionality

pub mod catalog;

use crate::infra::errors::AppError;

/// GET / - Plain-text greeting.
pub async fn home_handler() -> &'static str {
    "Hello! This is the Tagshelf image API (serving /images folders with tag support)."
}

/// Fallback for unmatched routes.
pub async fn not_found_handler() -> AppError {
    AppError::not_found("Route not found")
}
