//! Query filter parsing.
//!
//! Filters arrive as repeated parameters (`?tag=a&tag=b`), comma lists
//! (`?tag=a,b`), or any mix of the two.

use std::{collections::BTreeSet, num::IntErrorKind};

use crate::error::{CatalogError, Result};

/// Query key carrying the category filter.
pub const CATEGORIES_PARAM: &str = "categories";
/// Query key carrying the tag filter.
pub const TAG_PARAM: &str = "tag";
/// Query key carrying the result limit.
pub const LIMIT_PARAM: &str = "limit";

/// Split every raw value on commas, trim each token and drop empty ones.
/// Encounter order and duplicates are preserved.
pub fn parse_multi<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .flat_map(|value| {
            value
                .as_ref()
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_owned)
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Parse an optional limit. Values that are not integers are ignored like
/// an absent limit; integers below 1 are rejected, however large.
pub fn parse_limit(raw: Option<&str>) -> Result<Option<usize>> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    let value = match raw.trim().parse::<i64>() {
        Ok(value) => value,
        Err(err) => {
            return match err.kind() {
                IntErrorKind::NegOverflow => Err(below_one()),
                IntErrorKind::PosOverflow => Ok(Some(usize::MAX)),
                _ => Ok(None),
            };
        }
    };

    if value < 1 {
        return Err(below_one());
    }

    Ok(Some(usize::try_from(value).unwrap_or(usize::MAX)))
}

fn below_one() -> CatalogError {
    CatalogError::invalid_argument("limit must be >= 1")
}

/// Raw, multi-valued parameter bag as handed over by the transport layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    /// First `limit` value seen, unparsed.
    pub limit: Option<String>,
}

impl QueryParams {
    /// Collect the recognised keys from decoded query pairs; unknown keys
    /// are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_ref() {
                CATEGORIES_PARAM => params.categories.push(value.into()),
                TAG_PARAM => params.tags.push(value.into()),
                LIMIT_PARAM if params.limit.is_none() => {
                    params.limit = Some(value.into())
                }
                _ => {}
            }
        }
        params
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_limit(mut self, limit: impl ToString) -> Self {
        self.limit = Some(limit.to_string());
        self
    }

    /// Tokenised tag filter, lowercased for matching.
    pub fn tag_filter(&self) -> BTreeSet<String> {
        parse_multi(&self.tags)
            .into_iter()
            .map(|tag| tag.to_lowercase())
            .collect()
    }

    pub fn category_filter(&self) -> BTreeSet<String> {
        parse_multi(&self.categories).into_iter().collect()
    }

    pub fn limit(&self) -> Result<Option<usize>> {
        parse_limit(self.limit.as_deref())
    }
}

/// Canonical filters for one query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    /// Empty means every discovered category.
    pub categories: BTreeSet<String>,
    /// Lowercased. Empty means no tag filter.
    pub tags: BTreeSet<String>,
    pub limit: Option<usize>,
}

impl FilterSpec {
    pub fn parse(params: &QueryParams) -> Result<Self> {
        Ok(Self {
            categories: params.category_filter(),
            tags: params.tag_filter(),
            limit: params.limit()?,
        })
    }

    pub fn has_tag_filter(&self) -> bool {
        !self.tags.is_empty()
    }

    /// True when any of `tags` matches any requested tag, ignoring case.
    /// Always true without a tag filter.
    pub fn matches(&self, tags: &[String]) -> bool {
        matches_any(&self.tags, tags)
    }
}

pub(crate) fn matches_any(filter: &BTreeSet<String>, tags: &[String]) -> bool {
    filter.is_empty()
        || tags.iter().any(|tag| filter.contains(&tag.to_lowercase()))
}
