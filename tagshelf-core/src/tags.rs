//! Tag annotation store.
//!
//! The store is a JSON document shaped as
//! `{ "<category>": { "<filename>": ["tag", ...] | "tag" } }`. It is read
//! fresh for every query so concurrent edits show up immediately, and it is
//! normalised on load: downstream code only ever sees lists of strings.

use std::{
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
};

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::TagStoreError;

/// Normalised tag annotations: category -> filename -> tags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagIndex {
    categories: HashMap<String, HashMap<String, Vec<String>>>,
}

impl TagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags recorded for `filename` in `category`, empty when unannotated.
    pub fn tags_for(&self, category: &str, filename: &str) -> &[String] {
        self.categories
            .get(category)
            .and_then(|files| files.get(filename))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn category_count(&self) -> usize {
        self.categories.len()
    }

    /// Build an index from an already-parsed document. Anything but an
    /// object at the top level yields `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(root) = value else {
            return None;
        };

        let mut index = Self::new();
        for (category, files) in root {
            let Value::Object(files) = files else {
                debug!(%category, "dropping tag store category that is not an object");
                continue;
            };
            index
                .categories
                .insert(category, normalize_files(files));
        }
        Some(index)
    }
}

fn normalize_files(files: Map<String, Value>) -> HashMap<String, Vec<String>> {
    files
        .into_iter()
        .map(|(filename, tags)| {
            let tags = match tags {
                Value::Array(items) => {
                    items.iter().map(tag_to_string).collect()
                }
                other => vec![tag_to_string(&other)],
            };
            (filename, tags)
        })
        .collect()
}

/// Strings are taken verbatim; any other JSON value becomes its compact
/// JSON text.
fn tag_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Outcome of reading the tag store. Absence and failure both degrade to an
/// empty index, but stay distinguishable for logging and tests.
#[derive(Debug)]
pub enum TagLoad {
    Loaded(TagIndex),
    Absent,
    Failed(TagStoreError),
}

impl TagLoad {
    /// Collapse the outcome into an index, logging swallowed failures.
    pub fn into_index(self) -> TagIndex {
        match self {
            Self::Loaded(index) => index,
            Self::Absent => TagIndex::new(),
            Self::Failed(err) => {
                warn!(error = %err, "tag store unavailable; serving without tags");
                TagIndex::new()
            }
        }
    }
}

/// Handle to the persisted tag store. Holds no state beyond its location.
#[derive(Debug, Clone)]
pub struct TagStore {
    path: PathBuf,
}

impl TagStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and normalise the store from disk.
    pub fn load(&self) -> TagLoad {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return TagLoad::Absent;
            }
            Err(source) => {
                return TagLoad::Failed(TagStoreError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let value: Value = match serde_json::from_str(&contents) {
            Ok(value) => value,
            Err(source) => {
                return TagLoad::Failed(TagStoreError::Parse {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        match TagIndex::from_value(value) {
            Some(index) => {
                debug!(
                    path = %self.path.display(),
                    categories = index.category_count(),
                    "loaded tag store"
                );
                TagLoad::Loaded(index)
            }
            None => TagLoad::Failed(TagStoreError::Shape {
                path: self.path.clone(),
            }),
        }
    }

    /// Convenience for callers that only need the index.
    pub fn load_index(&self) -> TagIndex {
        self.load().into_index()
    }
}
