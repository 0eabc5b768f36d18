//! # Tagshelf Server
//!
//! Serves a folder of categorised images as a JSON catalog with tag
//! filtering. See the library crate for the endpoint list.

use anyhow::Context;
use clap::Parser;
use tagshelf_server::{
    AppState, create_router,
    infra::config::{Config, ServeArgs},
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// CLI entry point
#[derive(Parser, Debug)]
#[command(name = "tagshelf-server")]
#[command(about = "Image catalog API with category folders and tag filtering")]
struct Cli {
    #[command(flatten)]
    serve: ServeArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_file_loaded = dotenvy::dotenv().is_ok();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if env_file_loaded {
        info!("loaded .env file");
    }

    let config =
        Config::from_args(cli.serve).context("invalid server configuration")?;
    run_server(config).await
}

async fn run_server(config: Config) -> anyhow::Result<()> {
    if !config.image_root.is_dir() {
        warn!(
            path = %config.image_root.display(),
            "image root is not a directory; listings will be empty until it exists"
        );
    }
    if !config.tags_path.exists() {
        info!(
            path = %config.tags_path.display(),
            "no tag store found; images will report no tags"
        );
    }

    let addr = config.bind_addr();
    info!(
        image_root = %config.image_root.display(),
        tags_path = %config.tags_path.display(),
        extensions = ?config.image_extensions,
        "catalog configured"
    );

    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
