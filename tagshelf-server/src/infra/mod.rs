pub mod app_state;
pub mod base_url;
pub mod config;
pub mod errors;
