use std::{fmt, sync::Arc};

use tagshelf_core::{ImageCatalog, QueryEngine, TagStore};

use crate::infra::{config::Config, errors::AppResult};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub engine: Arc<QueryEngine>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let engine = QueryEngine::new(
            ImageCatalog::new(config.catalog_config()),
            TagStore::new(&config.tags_path),
        );

        Self {
            config: Arc::new(config),
            engine: Arc::new(engine),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run `work` against the engine on the blocking pool; the catalog uses
    /// synchronous filesystem I/O.
    pub async fn blocking<T, F>(&self, work: F) -> AppResult<T>
    where
        F: FnOnce(&QueryEngine) -> T + Send + 'static,
        T: Send + 'static,
    {
        let engine = Arc::clone(&self.engine);
        Ok(tokio::task::spawn_blocking(move || work(engine.as_ref())).await?)
    }

    /// Like [`AppState::blocking`] for queries that can fail.
    pub async fn run_query<T, F>(&self, query: F) -> AppResult<T>
    where
        F: FnOnce(&QueryEngine) -> tagshelf_core::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        Ok(self.blocking(query).await??)
    }
}
