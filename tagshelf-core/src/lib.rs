//! # Tagshelf Core
//!
//! Catalog query engine for a filesystem-backed image collection.
//!
//! Images live in category folders under an image root
//! (`<root>/<category>/<file>`). A JSON tag store annotates individual files,
//! and queries filter the catalog by category, tag and result limit.
//!
//! ## Architecture
//!
//! - [`tags`]: loads and normalises the tag store
//! - [`catalog`]: discovers categories and image files on disk
//! - [`filter`]: tokenises multi-valued filter parameters
//! - [`query`]: answers the three query shapes
//!
//! Nothing is cached: every query re-reads the filesystem and the tag store,
//! so concurrent queries need no coordination.
//!
//! ## Examples
//!
//! ```no_run
//! use tagshelf_core::{
//!     CatalogConfig, ImageCatalog, QueryEngine, QueryParams, TagStore,
//! };
//!
//! let engine = QueryEngine::new(
//!     ImageCatalog::new(CatalogConfig::new("./images")),
//!     TagStore::new("./tags.json"),
//! );
//!
//! let params = QueryParams::default().with_tag("hypar").with_limit(10);
//! let hits = engine.search(&params, "http://localhost:5000")?;
//! for hit in hits {
//!     println!("{} -> {}", hit.filename, hit.url);
//! }
//! # Ok::<(), tagshelf_core::CatalogError>(())
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(missing_docs)]

pub mod catalog;
pub mod error;
pub mod filter;
pub mod query;
pub mod tags;

pub use catalog::{CatalogConfig, DEFAULT_IMAGE_EXTENSIONS, ImageCatalog, Listing};
pub use error::{CatalogError, Result, TagStoreError};
pub use filter::{FilterSpec, QueryParams, parse_limit, parse_multi};
pub use query::{CategoryBuckets, ImageRecord, QueryEngine, image_url};
pub use tags::{TagIndex, TagLoad, TagStore};
