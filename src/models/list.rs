//! List query options and list response envelopes.

use serde::{Deserialize, Serialize};

/// Server page size, also used for popular labels and search.
pub const DEFAULT_LIMIT: u32 = 50;

/// Search results come back most-used first, then alphabetical.
pub const SEARCH_ORDERING: &str = "-usage_count,text";

/// Query descriptor for label listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelListOptions {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub no_page: bool,
}

impl LabelListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    pub fn ordering(mut self, ordering: impl Into<String>) -> Self {
        self.ordering = Some(ordering.into());
        self
    }

    pub fn no_page(mut self) -> Self {
        self.no_page = true;
        self
    }

    /// Render the options as query pairs. Empty search and ordering are left out.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        if let Some(limit) = self.limit {
            params.push(("limit", limit.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset", offset.to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            params.push(("q", search.to_string()));
        }
        if let Some(ordering) = self.ordering.as_deref().filter(|s| !s.is_empty()) {
            params.push(("ordering", ordering.to_string()));
        }
        if self.no_page {
            params.push(("no_page", "true".to_string()));
        }

        params
    }
}

/// One page of a paginated collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            count: self.count,
            next: self.next,
            previous: self.previous,
            results: self.results.into_iter().map(f).collect(),
        }
    }
}

/// A collection endpoint answers either with a page or with a bare array.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListResponse<T> {
    Paginated(Page<T>),
    Plain(Vec<T>),
}

impl<T> ListResponse<T> {
    /// Normalize to a page. A bare array counts as one complete page.
    pub fn into_page(self) -> Page<T> {
        match self {
            ListResponse::Paginated(page) => page,
            ListResponse::Plain(items) => Page {
                count: Some(items.len() as u64),
                next: None,
                previous: None,
                results: items,
            },
        }
    }

    pub fn into_items(self) -> Vec<T> {
        match self {
            ListResponse::Paginated(page) => page.results,
            ListResponse::Plain(items) => items,
        }
    }
}
