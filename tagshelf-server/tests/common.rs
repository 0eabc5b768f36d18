use std::{fs, path::PathBuf};

use axum_test::TestServer;
use serde_json::Value;
use tagshelf_server::{AppState, create_router, infra::config::Config};
use tempfile::TempDir;

pub const PUBLIC_BASE: &str = "http://images.test";

// Code is used by test modules, but not in this scope
#[allow(unused)]
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    tempdir: TempDir,
}

#[allow(unused)]
impl TestApp {
    pub fn image_root(&self) -> PathBuf {
        self.tempdir.path().join("images")
    }
}

/// Image fixtures: (category, filenames) plus an optional tag store.
#[allow(unused)]
#[derive(Debug, Default)]
pub struct Fixtures {
    pub files: Vec<(&'static str, Vec<&'static str>)>,
    pub tags: Option<Value>,
    pub public_base: Option<&'static str>,
}

#[allow(unused)]
impl Fixtures {
    pub fn new() -> Self {
        Self {
            public_base: Some(PUBLIC_BASE),
            ..Self::default()
        }
    }

    pub fn files(mut self, category: &'static str, names: &[&'static str]) -> Self {
        self.files.push((category, names.to_vec()));
        self
    }

    pub fn tags(mut self, tags: Value) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn without_public_base(mut self) -> Self {
        self.public_base = None;
        self
    }
}

#[allow(unused)]
pub fn build_test_app(fixtures: Fixtures) -> TestApp {
    let tempdir = TempDir::new().expect("tempdir");
    let image_root = tempdir.path().join("images");
    let tags_path = tempdir.path().join("tags.json");
    fs::create_dir_all(&image_root).expect("image root");

    for (category, names) in &fixtures.files {
        let folder = image_root.join(category);
        fs::create_dir_all(&folder).expect("category dir");
        for name in names {
            fs::write(folder.join(name), format!("bytes of {name}"))
                .expect("image file");
        }
    }
    if let Some(tags) = &fixtures.tags {
        fs::write(&tags_path, tags.to_string()).expect("tag store");
    }

    let mut config = Config::new(&image_root, &tags_path);
    if let Some(base) = fixtures.public_base {
        config = config.with_public_base_url(base);
    }

    let state = AppState::new(config);
    let server =
        TestServer::new(create_router(state.clone())).expect("test server");

    TestApp {
        server,
        state,
        tempdir,
    }
}

/// The catalog from the service documentation: two categories, one tagged
/// image.
#[allow(unused)]
pub fn sample_fixtures() -> Fixtures {
    Fixtures::new()
        .files("components", &["b.jpg", "a.png", "notes.txt"])
        .files("precedents", &["c.webp", "d.gif"])
        .tags(serde_json::json!({
            "components": { "a.png": ["joint"] },
            "precedents": {
                "c.webp": ["Hypar", "kinetic"],
                "d.gif": "scissor"
            }
        }))
}
