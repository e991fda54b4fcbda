use crate::{ContentItem, FetchResult, FilterState, Term};

/// Snapshot of a content view for rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentViewModel {
    pub title: String,
    pub subtitle: String,
    pub show_filters: bool,
    /// Category, tag, search and date filters only apply to posts.
    pub post_facets_enabled: bool,
    pub base_url: String,
    pub filters: FilterState,
    pub categories: Vec<Term>,
    pub tags: Vec<Term>,
    pub result: FetchResult<ContentItem>,
    /// An auto-refresh is in flight while the previous items stay visible.
    pub refreshing: bool,
    pub current_page: u32,
    pub total_pages: u32,
    pub page_size: u32,
    pub page_window: Vec<u32>,
    pub auto_refresh_ms: u64,
    pub dirty: bool,
}
