//! Catalog query engine.
//!
//! Three query shapes share the same primitives:
//!
//! - [`QueryEngine::list_all`]: every (or every requested) category,
//!   bucketed by category, with a limit shared across all buckets.
//! - [`QueryEngine::list_category`]: one category, flat, local limit.
//! - [`QueryEngine::search`]: tag search across all categories, flat,
//!   shared limit.
//!
//! Categories are visited in ascending name order and files in ascending
//! filename order; that order is the only ordering ever applied, so a limit
//! always truncates reproducibly.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    catalog::ImageCatalog,
    error::{CatalogError, Result},
    filter::{FilterSpec, QueryParams, matches_any, parse_limit},
    tags::{TagIndex, TagStore},
};

/// One image in a result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub url: String,
    pub filename: String,
    pub tags: Vec<String>,
    pub category: String,
}

impl ImageRecord {
    fn new(base: &str, category: &str, filename: &str, tags: &[String]) -> Self {
        Self {
            url: image_url(base, category, filename),
            filename: filename.to_owned(),
            tags: tags.to_vec(),
            category: category.to_owned(),
        }
    }
}

/// Results of the all-categories listing, keyed by category. Serialises as
/// a JSON object in ascending category order.
pub type CategoryBuckets = BTreeMap<String, Vec<ImageRecord>>;

/// Public address of an image: `<base>/images/<category>/<filename>`.
pub fn image_url(base: &str, category: &str, filename: &str) -> String {
    format!("{}/images/{}/{}", base.trim_end_matches('/'), category, filename)
}

/// Counts accepted records against an optional cap.
#[derive(Debug)]
struct LimitCounter {
    limit: Option<usize>,
    accepted: usize,
}

impl LimitCounter {
    fn new(limit: Option<usize>) -> Self {
        Self { limit, accepted: 0 }
    }

    /// Record one accepted item; true once the cap has been reached.
    fn accept(&mut self) -> bool {
        self.accepted += 1;
        self.limit.is_some_and(|limit| self.accepted >= limit)
    }
}

/// Answers catalog queries. Stateless between calls: every query re-reads
/// the filesystem and the tag store.
#[derive(Debug, Clone)]
pub struct QueryEngine {
    catalog: ImageCatalog,
    tag_store: TagStore,
}

impl QueryEngine {
    pub fn new(catalog: ImageCatalog, tag_store: TagStore) -> Self {
        Self { catalog, tag_store }
    }

    pub fn catalog(&self) -> &ImageCatalog {
        &self.catalog
    }

    /// All-categories listing. The limit is global: once it is reached the
    /// current category's partial bucket is kept and no further category is
    /// visited. Categories without accepted images are left out.
    pub fn list_all(
        &self,
        params: &QueryParams,
        base: &str,
    ) -> Result<CategoryBuckets> {
        let tags = self.tag_store.load_index();
        let filter = FilterSpec::parse(params)?;

        let categories: Vec<String> = if filter.categories.is_empty() {
            self.catalog.list_categories()
        } else {
            filter.categories.iter().cloned().collect()
        };

        let mut buckets = CategoryBuckets::new();
        let mut counter = LimitCounter::new(filter.limit);

        for category in &categories {
            let mut bucket = Vec::new();
            let mut exhausted = false;

            for filename in self.catalog.list_images(category) {
                let image_tags = tags.tags_for(category, &filename);
                if !filter.matches(image_tags) {
                    continue;
                }

                bucket.push(ImageRecord::new(
                    base, category, &filename, image_tags,
                ));
                if counter.accept() {
                    exhausted = true;
                    break;
                }
            }

            if !bucket.is_empty() {
                buckets.insert(category.clone(), bucket);
            }
            if exhausted {
                break;
            }
        }

        debug!(
            categories = categories.len(),
            tag_filter = filter.has_tag_filter(),
            returned = buckets.len(),
            records = counter.accepted,
            "listed all categories"
        );
        Ok(buckets)
    }

    /// Single-category listing with a limit local to the category. A
    /// category without images is reported as not found, before any filter
    /// is validated.
    pub fn list_category(
        &self,
        category: &str,
        params: &QueryParams,
        base: &str,
    ) -> Result<Vec<ImageRecord>> {
        let tags = self.tag_store.load_index();

        let files = self.catalog.list_images(category);
        if files.is_empty() {
            return Err(CatalogError::not_found("Category not found or empty"));
        }

        let filter = FilterSpec::parse(params)?;
        let records = collect_matching(
            category,
            files,
            &tags,
            &filter.tags,
            filter.limit,
            base,
        );

        debug!(%category, records = records.len(), "listed category");
        Ok(records)
    }

    /// Tag search across every discovered category. A tag filter is
    /// required; the limit is shared across categories.
    pub fn search(
        &self,
        params: &QueryParams,
        base: &str,
    ) -> Result<Vec<ImageRecord>> {
        let tags = self.tag_store.load_index();

        let tag_filter = params.tag_filter();
        if tag_filter.is_empty() {
            return Err(CatalogError::invalid_argument(
                "tag query parameter is required",
            ));
        }
        let limit = parse_limit(params.limit.as_deref())?;

        let mut results = Vec::new();
        let mut counter = LimitCounter::new(limit);

        'categories: for category in self.catalog.list_categories() {
            for filename in self.catalog.list_images(&category) {
                let image_tags = tags.tags_for(&category, &filename);
                if !matches_any(&tag_filter, image_tags) {
                    continue;
                }

                results.push(ImageRecord::new(
                    base, &category, &filename, image_tags,
                ));
                if counter.accept() {
                    break 'categories;
                }
            }
        }

        debug!(records = results.len(), "searched by tag");
        Ok(results)
    }
}

fn collect_matching(
    category: &str,
    files: Vec<String>,
    tags: &TagIndex,
    tag_filter: &BTreeSet<String>,
    limit: Option<usize>,
    base: &str,
) -> Vec<ImageRecord> {
    let mut records = Vec::new();
    let mut counter = LimitCounter::new(limit);

    for filename in files {
        let image_tags = tags.tags_for(category, &filename);
        if !matches_any(tag_filter, image_tags) {
            continue;
        }

        records.push(ImageRecord::new(base, category, &filename, image_tags));
        if counter.accept() {
            break;
        }
    }

    records
}
