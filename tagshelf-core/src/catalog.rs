//! Filesystem catalog: category folders under an image root and the image
//! files inside each of them.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use tracing::warn;

/// Extensions recognised as images when none are configured.
pub const DEFAULT_IMAGE_EXTENSIONS: &[&str] =
    &["jpg", "jpeg", "png", "webp", "gif"];

pub fn default_image_extensions_vec() -> Vec<String> {
    DEFAULT_IMAGE_EXTENSIONS
        .iter()
        .map(|ext| ext.to_string())
        .collect()
}

/// Where the catalog lives and which files count as images.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub image_root: PathBuf,
    /// Lowercase extensions without the leading dot.
    pub extensions: Vec<String>,
}

impl CatalogConfig {
    pub fn new(image_root: impl Into<PathBuf>) -> Self {
        Self {
            image_root: image_root.into(),
            extensions: default_image_extensions_vec(),
        }
    }

    /// Replace the recognised extensions. Entries are lowercased and a
    /// leading dot is accepted.
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim().trim_start_matches('.').to_lowercase())
            .filter(|ext| !ext.is_empty())
            .collect();
        self
    }
}

/// Result of reading one directory. `Missing` is an expected, empty
/// outcome; `Unreadable` is a real failure that callers degrade to empty.
#[derive(Debug)]
pub enum Listing {
    Entries(Vec<String>),
    Missing,
    Unreadable(io::Error),
}

impl Listing {
    /// Entries in sorted order, empty for `Missing` and `Unreadable`.
    pub fn into_entries(self) -> Vec<String> {
        match self {
            Self::Entries(entries) => entries,
            Self::Missing => Vec::new(),
            Self::Unreadable(err) => {
                warn!(error = %err, "directory listing failed; treating as empty");
                Vec::new()
            }
        }
    }
}

/// Read-only view over the image root. Every call reads live filesystem
/// state.
#[derive(Debug, Clone)]
pub struct ImageCatalog {
    config: CatalogConfig,
}

impl ImageCatalog {
    pub fn new(config: CatalogConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn image_root(&self) -> &Path {
        &self.config.image_root
    }

    /// Check if a file name ends in a recognised image extension, ignoring
    /// case. A bare `.png` counts.
    pub fn is_image(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.config.extensions.iter().any(|ext| {
            name.strip_suffix(ext.as_str())
                .is_some_and(|stem| stem.ends_with('.'))
        })
    }

    /// Visible subdirectories of the image root, sorted ascending.
    pub fn list_categories(&self) -> Vec<String> {
        self.scan_categories().into_entries()
    }

    /// Image files directly inside `category`, sorted ascending.
    pub fn list_images(&self, category: &str) -> Vec<String> {
        self.scan_images(category).into_entries()
    }

    pub fn scan_categories(&self) -> Listing {
        let root = self.image_root();
        if !root.is_dir() {
            return Listing::Missing;
        }

        read_sorted(root, |path, name| {
            !name.starts_with('.') && path.is_dir()
        })
    }

    pub fn scan_images(&self, category: &str) -> Listing {
        let Some(dir) = self.category_dir(category) else {
            return Listing::Missing;
        };
        if !dir.is_dir() {
            return Listing::Missing;
        }

        read_sorted(&dir, |path, name| self.is_image(name) && path.is_file())
    }

    /// Path of a catalogued image, if `category/filename` names one.
    pub fn resolve_image(
        &self,
        category: &str,
        filename: &str,
    ) -> Option<PathBuf> {
        let dir = self.category_dir(category)?;
        if !is_plain_name(filename) || !self.is_image(filename) {
            return None;
        }

        let path = dir.join(filename);
        path.is_file().then_some(path)
    }

    fn category_dir(&self, category: &str) -> Option<PathBuf> {
        (is_plain_name(category) && !category.starts_with('.'))
            .then(|| self.image_root().join(category))
    }
}

/// A single path segment that cannot climb out of its parent.
fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.contains('\0')
}

fn read_sorted<F>(dir: &Path, keep: F) -> Listing
where
    F: Fn(&Path, &str) -> bool,
{
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Listing::Missing;
        }
        Err(err) => return Listing::Unreadable(err),
    };

    let mut names = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => return Listing::Unreadable(err),
        };
        // Names that are not valid UTF-8 cannot be addressed by URL.
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        if keep(&entry.path(), &name) {
            names.push(name);
        }
    }

    names.sort();
    Listing::Entries(names)
}
