//! Catalog listing parameters: sort keys, directions, and pagination.
//!
//! Parsing here is lenient by contract. Unknown sort keys or directions fall
//! back to the defaults instead of failing the request, and out-of-range
//! pagination values are clamped.

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// Page size used when the client does not send `size`.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest page a client may request.
pub const MAX_PAGE_SIZE: i64 = 100;

// ---------------------------------------------------------------------------
// Sort key / direction
// ---------------------------------------------------------------------------

/// Field the catalog is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortBy {
    /// Alphabetical by game title.
    #[default]
    Title,
    /// Total number of scores across all versions.
    Popular,
    /// Creation time of the latest version.
    UploadDate,
}

impl SortBy {
    /// Parse the `sortBy` query value. Anything unrecognised maps to [`SortBy::Title`].
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("popular") => Self::Popular,
            Some("uploaddate") => Self::UploadDate,
            _ => Self::Title,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse the `sortDir` query value. Anything unrecognised maps to [`SortDirection::Asc`].
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("desc") => Self::Desc,
            _ => Self::Asc,
        }
    }

    /// SQL keyword for this direction.
    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

// ---------------------------------------------------------------------------
// Query
// ---------------------------------------------------------------------------

/// Normalised catalog request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Zero-based page index.
    pub page: i64,
    /// Items per page, `1..=MAX_PAGE_SIZE`.
    pub size: i64,
    pub sort_by: SortBy,
    pub sort_dir: SortDirection,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            page: 0,
            size: DEFAULT_PAGE_SIZE,
            sort_by: SortBy::default(),
            sort_dir: SortDirection::default(),
        }
    }
}

impl CatalogQuery {
    /// Build a query from raw request parameters, applying defaults and clamps.
    pub fn from_params(
        page: Option<i64>,
        size: Option<i64>,
        sort_by: Option<&str>,
        sort_dir: Option<&str>,
    ) -> Self {
        Self {
            page: page.unwrap_or(0).max(0),
            size: size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
            sort_by: SortBy::from_param(sort_by),
            sort_dir: SortDirection::from_param(sort_dir),
        }
    }

    /// Rows to skip: `page * size`, saturating instead of overflowing.
    pub fn offset(&self) -> i64 {
        self.page.saturating_mul(self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_sort_key_falls_back_to_title() {
        assert_eq!(SortBy::from_param(Some("bogus")), SortBy::Title);
        assert_eq!(SortBy::from_param(None), SortBy::Title);
        assert_eq!(SortBy::from_param(Some("popular")), SortBy::Popular);
        assert_eq!(SortBy::from_param(Some("uploaddate")), SortBy::UploadDate);
    }

    #[test]
    fn sort_keys_are_case_sensitive() {
        assert_eq!(SortBy::from_param(Some("Popular")), SortBy::Title);
        assert_eq!(SortDirection::from_param(Some("DESC")), SortDirection::Asc);
    }

    #[test]
    fn unknown_direction_falls_back_to_asc() {
        assert_eq!(SortDirection::from_param(Some("sideways")), SortDirection::Asc);
        assert_eq!(SortDirection::from_param(Some("desc")), SortDirection::Desc);
    }

    #[test]
    fn bogus_params_equal_defaults() {
        let bogus = CatalogQuery::from_params(None, None, Some("bogus"), Some("bogus"));
        assert_eq!(bogus, CatalogQuery::default());
    }

    #[test]
    fn pagination_is_clamped() {
        let q = CatalogQuery::from_params(Some(-3), Some(0), None, None);
        assert_eq!(q.page, 0);
        assert_eq!(q.size, 1);

        let q = CatalogQuery::from_params(Some(2), Some(5_000), None, None);
        assert_eq!(q.size, MAX_PAGE_SIZE);
    }

    #[test]
    fn offset_is_page_times_size() {
        let q = CatalogQuery::from_params(Some(2), Some(10), None, None);
        assert_eq!(q.offset(), 20);

        let huge = CatalogQuery::from_params(Some(i64::MAX), Some(10), None, None);
        assert_eq!(huge.offset(), i64::MAX);
    }
}
