//! Pagination metadata for list responses.
//!
//! List endpoints may return a `pagination` object alongside `data`:
//!
//! ```json
//! {
//!   "data": [...],
//!   "pagination": { "page": 2, "limit": 20, "total": 45, "totalPages": 3 }
//! }
//! ```
//!
//! Page and limit sent by the client are clamped the same way the backend
//! clamps them:
//! - `limit` is clamped to the range [1, 100] (default: 20)
//! - `page` is clamped to a minimum of 1 (default: 1)

use serde::{Deserialize, Serialize};

/// Default number of items per page.
pub const DEFAULT_LIMIT: i64 = 20;

/// Largest page size the backend accepts.
pub const MAX_LIMIT: i64 = 100;

/// Metadata about a paginated response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Current page number (1-indexed)
    pub page: i64,
    /// Items per page
    pub limit: i64,
    /// Total number of items across all pages
    pub total: i64,
    /// Total number of pages
    #[serde(default)]
    pub total_pages: i64,
}

impl PaginationMeta {
    /// Whether there are more items after this page.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.page < self.page_count()
    }

    /// Page count, derived from `total` when the server omitted it.
    #[must_use]
    pub fn page_count(&self) -> i64 {
        if self.total_pages > 0 {
            return self.total_pages;
        }
        let limit = clamp_limit(Some(self.limit));
        let total = self.total.max(0);
        total / limit + i64::from(total % limit != 0)
    }
}

/// Returns the effective limit, clamped to [1, 100].
#[must_use]
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Returns the effective page, clamped to a minimum of 1.
#[must_use]
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_limit_default() {
        assert_eq!(clamp_limit(None), DEFAULT_LIMIT);
    }

    #[test]
    fn test_clamp_limit_boundary_cases() {
        let test_cases = vec![
            (Some(1), 1),
            (Some(50), 50),
            (Some(100), 100),
            (Some(101), 100),
            (Some(0), 1),
            (Some(-1), 1),
        ];

        for (input, expected) in test_cases {
            assert_eq!(clamp_limit(input), expected);
        }
    }

    #[test]
    fn test_clamp_page() {
        assert_eq!(clamp_page(None), 1);
        assert_eq!(clamp_page(Some(0)), 1);
        assert_eq!(clamp_page(Some(-4)), 1);
        assert_eq!(clamp_page(Some(7)), 7);
    }

    #[test]
    fn test_has_more() {
        let meta = PaginationMeta {
            page: 1,
            limit: 10,
            total: 25,
            total_pages: 3,
        };
        assert!(meta.has_more());

        let last = PaginationMeta { page: 3, ..meta };
        assert!(!last.has_more());
    }

    #[test]
    fn test_page_count_derived_from_total() {
        let meta: PaginationMeta =
            serde_json::from_str(r#"{"page":1,"limit":10,"total":21}"#).unwrap();
        assert_eq!(meta.total_pages, 0);
        assert_eq!(meta.page_count(), 3);
        assert!(meta.has_more());
    }

    #[test]
    fn test_zero_total_has_no_more() {
        let meta = PaginationMeta {
            page: 1,
            limit: 10,
            total: 0,
            total_pages: 0,
        };
        assert_eq!(meta.page_count(), 0);
        assert!(!meta.has_more());
    }

    #[test]
    fn test_page_count_with_huge_total() {
        let meta = PaginationMeta {
            page: 1,
            limit: 1,
            total: i64::MAX,
            total_pages: 0,
        };
        assert_eq!(meta.page_count(), i64::MAX);

        let negative = PaginationMeta { total: -5, ..meta };
        assert_eq!(negative.page_count(), 0);
    }

    #[test]
    fn test_deserialize_camel_case() {
        let meta: PaginationMeta =
            serde_json::from_str(r#"{"page":2,"limit":20,"total":45,"totalPages":3}"#).unwrap();
        assert_eq!(
            meta,
            PaginationMeta {
                page: 2,
                limit: 20,
                total: 45,
                total_pages: 3,
            }
        );
    }
}
