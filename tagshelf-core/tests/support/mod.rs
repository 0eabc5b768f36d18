//! Shared fixtures for catalog integration tests.

use std::{fs, path::PathBuf};

use serde_json::Value;
use tagshelf_core::{CatalogConfig, ImageCatalog, QueryEngine, TagStore};
use tempfile::TempDir;

pub const BASE: &str = "http://localhost:5000";

/// An image root plus tag store inside a temporary directory.
#[allow(unused)]
pub struct Fixture {
    pub engine: QueryEngine,
    dir: TempDir,
}

#[allow(unused)]
impl Fixture {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = dir.path().join("images");
        fs::create_dir_all(&root).expect("image root");
        let engine = QueryEngine::new(
            ImageCatalog::new(CatalogConfig::new(&root)),
            TagStore::new(dir.path().join("tags.json")),
        );
        Self { engine, dir }
    }

    pub fn image_root(&self) -> PathBuf {
        self.dir.path().join("images")
    }

    pub fn tags_path(&self) -> PathBuf {
        self.dir.path().join("tags.json")
    }

    pub fn with_files(self, category: &str, files: &[&str]) -> Self {
        let folder = self.image_root().join(category);
        fs::create_dir_all(&folder).expect("category dir");
        for file in files {
            fs::write(folder.join(file), b"fake image content")
                .expect("image file");
        }
        self
    }

    pub fn with_tags(self, tags: Value) -> Self {
        fs::write(self.tags_path(), tags.to_string()).expect("tag store");
        self
    }

    pub fn with_raw_tags(self, contents: &str) -> Self {
        fs::write(self.tags_path(), contents).expect("tag store");
        self
    }
}
