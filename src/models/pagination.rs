//! Offset/limit pagination over in-memory collections

use serde::{Deserialize, Deserializer};
use utoipa::IntoParams;

use crate::config::PaginationConfig;

/// Pagination query parameters
///
/// Unparsable values are treated as absent rather than rejected.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Page number, starting at 1
    #[serde(default, alias = "pagina", deserialize_with = "lenient_number")]
    pub page: Option<i64>,
    /// Items per page (aliases: `limit`, `limite`)
    #[serde(default, alias = "limit", alias = "limite", deserialize_with = "lenient_number")]
    pub per_page: Option<i64>,
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|value| value.trim().parse().ok()))
}

/// A resolved, always-valid page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub per_page: usize,
}

impl PageRequest {
    /// Normalize raw query parameters against the configured page sizes
    pub fn resolve(query: &PageQuery, config: &PaginationConfig) -> Self {
        let page = query
            .page
            .filter(|page| *page > 0)
            .and_then(|page| usize::try_from(page).ok())
            .unwrap_or(1);

        let default_size = config.default_page_size.max(1);
        let requested = query
            .per_page
            .and_then(|size| usize::try_from(size).ok())
            .filter(|size| *size > 0);

        let per_page = match requested {
            None => default_size,
            Some(size) if config.allowed_page_sizes.is_empty() => size.min(config.max_page_size.max(1)),
            Some(size) if config.allowed_page_sizes.contains(&size) => size,
            Some(_) => default_size,
        };

        PageRequest { page, per_page }
    }

    pub fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.per_page)
    }

    /// Slice one page out of `records`, returning it with the total count
    pub fn apply<T: Clone>(&self, records: &[T]) -> (Vec<T>, usize) {
        let page = records
            .iter()
            .skip(self.offset())
            .take(self.per_page)
            .cloned()
            .collect();
        (page, records.len())
    }
}
