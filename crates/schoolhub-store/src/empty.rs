use schoolhub_client::Resource;
use schoolhub_core::ListQuery;

/// Placeholder shown in place of an empty list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub title: String,
    pub message: String,
    pub action: String,
}

impl EmptyState {
    /// Distinguishes "nothing matches this search" from "nothing yet".
    pub fn for_list(label: &str, singular: &str, search: Option<&str>) -> Self {
        let title = format!("No {label} Found");
        match search.map(str::trim).filter(|s| !s.is_empty()) {
            Some(term) => Self {
                title,
                message: format!("No {} match \"{term}\"", label.to_lowercase()),
                action: "Clear Search".to_string(),
            },
            None => Self {
                title,
                message: format!(
                    "Get started by adding your first {}",
                    singular.to_lowercase()
                ),
                action: format!("Add {singular}"),
            },
        }
    }

    pub fn for_resource<R: Resource>(query: &ListQuery) -> Self {
        Self::for_list(R::LABEL, R::SINGULAR, query.search_term())
    }

    pub fn is_search(&self) -> bool {
        self.action == "Clear Search"
    }
}
