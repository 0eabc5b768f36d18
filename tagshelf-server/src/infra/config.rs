use std::path::PathBuf;

use clap::Args as ClapArgs;
use tagshelf_core::{CatalogConfig, catalog::default_image_extensions_vec};
use thiserror::Error;
use url::Url;

/// Command-line and environment settings for `serve`. Every flag can also
/// come from the environment (or a `.env` file loaded at startup).
#[derive(ClapArgs, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "SERVER_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Folder holding one subfolder per category
    #[arg(long, env = "IMAGE_ROOT", default_value = "./images")]
    pub image_root: PathBuf,

    /// JSON tag store (category -> filename -> tags)
    #[arg(long, env = "TAGS_PATH", default_value = "./tags.json")]
    pub tags_path: PathBuf,

    /// Fixed base address for image URLs. Defaults to the request's Host.
    #[arg(long = "public-url", env = "PUBLIC_BASE_URL")]
    pub public_base_url: Option<String>,

    /// Comma-separated image extensions (default: jpg,jpeg,png,webp,gif)
    #[arg(long, env = "IMAGE_EXTENSIONS", value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Comma-separated CORS origins; empty allows any origin
    #[arg(
        long = "cors-origins",
        env = "CORS_ALLOWED_ORIGINS",
        value_delimiter = ','
    )]
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid PUBLIC_BASE_URL {value:?}: {source}")]
    InvalidPublicUrl {
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("PUBLIC_BASE_URL must use http or https, got {0:?}")]
    UnsupportedScheme(String),
}

/// Validated server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub image_root: PathBuf,
    pub tags_path: PathBuf,
    /// Without trailing slash.
    pub public_base_url: Option<String>,
    pub image_extensions: Vec<String>,
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    /// Defaults for everything but the two data locations.
    pub fn new(image_root: impl Into<PathBuf>, tags_path: impl Into<PathBuf>) -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 5000,
            image_root: image_root.into(),
            tags_path: tags_path.into(),
            public_base_url: None,
            image_extensions: default_image_extensions_vec(),
            cors_allowed_origins: Vec::new(),
        }
    }

    pub fn from_args(args: ServeArgs) -> Result<Self, ConfigError> {
        let public_base_url = args
            .public_base_url
            .as_deref()
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .map(normalize_public_url)
            .transpose()?;

        let mut extensions: Vec<String> = args
            .extensions
            .iter()
            .map(|ext| ext.trim().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        if extensions.is_empty() {
            extensions = default_image_extensions_vec();
        }

        Ok(Self {
            server_host: args.host,
            server_port: args.port,
            image_root: args.image_root,
            tags_path: args.tags_path,
            public_base_url,
            image_extensions: extensions,
            cors_allowed_origins: args
                .cors_allowed_origins
                .into_iter()
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
        })
    }

    pub fn with_public_base_url(mut self, url: impl Into<String>) -> Self {
        self.public_base_url =
            Some(url.into().trim_end_matches('/').to_string());
        self
    }

    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig::new(&self.image_root)
            .with_extensions(&self.image_extensions)
    }

    /// `host:port`, bracketing IPv6 literals.
    pub fn bind_addr(&self) -> String {
        if self.server_host.contains(':') {
            format!("[{}]:{}", self.server_host, self.server_port)
        } else {
            format!("{}:{}", self.server_host, self.server_port)
        }
    }
}

fn normalize_public_url(raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw).map_err(|source| ConfigError::InvalidPublicUrl {
        value: raw.to_string(),
        source,
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
    }
    Ok(raw.trim_end_matches('/').to_string())
}
