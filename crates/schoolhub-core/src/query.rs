//! List query options.
//!
//! Screens build a [`ListQuery`] from search text, a status filter, paging,
//! and free-form filters such as `classId` or `buildingId`. The query is
//! turned into URL parameters by [`ListQuery::to_params`]; blank values are
//! dropped so an emptied search box does not send `search=`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::pagination::{clamp_limit, clamp_page};

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
    /// Additional filters keyed by their wire name (e.g. `classId`).
    #[serde(default)]
    pub filters: BTreeMap<String, String>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// The trimmed search term, if one is active.
    pub fn search_term(&self) -> Option<&str> {
        non_blank(self.search.as_deref())
    }

    /// Whether any search, status, or filter narrows the result set.
    pub fn is_filtered(&self) -> bool {
        self.search_term().is_some()
            || non_blank(self.status.as_deref()).is_some()
            || self.filters.values().any(|v| !v.trim().is_empty())
    }

    /// Converts the options into query parameters with a stable order.
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if let Some(search) = self.search_term() {
            params.push(("search".to_string(), search.to_string()));
        }
        if let Some(status) = non_blank(self.status.as_deref()) {
            params.push(("status".to_string(), status.to_string()));
        }
        if self.page.is_some() {
            params.push(("page".to_string(), clamp_page(self.page).to_string()));
        }
        if self.limit.is_some() {
            params.push(("limit".to_string(), clamp_limit(self.limit).to_string()));
        }
        for (key, value) in &self.filters {
            if let Some(value) = non_blank(Some(value.as_str())) {
                params.push((key.clone(), value.to_string()));
            }
        }

        params
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(params: &[(String, String)]) -> Vec<(&str, &str)> {
        params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn test_empty_query_has_no_params() {
        assert!(ListQuery::new().to_params().is_empty());
    }

    #[test]
    fn test_search_is_trimmed() {
        let query = ListQuery::new().search("  John ");
        assert_eq!(pairs(&query.to_params()), vec![("search", "John")]);
        assert_eq!(query.search_term(), Some("John"));
    }

    #[test]
    fn test_blank_values_are_omitted() {
        let query = ListQuery::new()
            .search("   ")
            .status("")
            .filter("classId", " ");
        assert!(query.to_params().is_empty());
        assert!(!query.is_filtered());
    }

    #[test]
    fn test_params_order_is_stable() {
        let query = ListQuery::new()
            .filter("sectionId", "s-2")
            .filter("classId", "c-1")
            .status("ACTIVE")
            .search("Ada")
            .page(2)
            .limit(50);

        assert_eq!(
            pairs(&query.to_params()),
            vec![
                ("search", "Ada"),
                ("status", "ACTIVE"),
                ("page", "2"),
                ("limit", "50"),
                ("classId", "c-1"),
                ("sectionId", "s-2"),
            ]
        );
    }

    #[test]
    fn test_paging_is_clamped() {
        let query = ListQuery::new().page(0).limit(500);
        assert_eq!(
            pairs(&query.to_params()),
            vec![("page", "1"), ("limit", "100")]
        );
    }

    #[test]
    fn test_is_filtered_by_filter_only() {
        let query = ListQuery::new().filter("buildingId", "b-1");
        assert!(query.is_filtered());
    }

    #[test]
    fn test_equal_queries_compare_equal() {
        let a = ListQuery::new().search("John").filter("classId", "c-1");
        let b = ListQuery::new().filter("classId", "c-1").search("John");
        assert_eq!(a, b);
    }
}
