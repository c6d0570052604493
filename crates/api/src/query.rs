//! Shared query parameter types for API handlers.

use playhub_core::catalog::CatalogQuery;
use serde::Deserialize;

/// Catalog listing parameters (`?page=&size=&sortBy=&sortDir=`).
///
/// Parsing is lenient: unknown sort values fall back to defaults and
/// pagination is clamped in [`CatalogQuery::from_params`].
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort_by: Option<String>,
    pub sort_dir: Option<String>,
}

impl CatalogParams {
    pub fn to_query(&self) -> CatalogQuery {
        CatalogQuery::from_params(
            self.page,
            self.size,
            self.sort_by.as_deref(),
            self.sort_dir.as_deref(),
        )
    }
}
