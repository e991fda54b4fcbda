use crate::ContentType;

pub const DEFAULT_PAGE_SIZE: u32 = 10;
pub const DEFAULT_TITLE: &str = "Latest content";

/// Settings an embedding application provides for one content view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewConfig {
    pub base_url: String,
    pub content_type: ContentType,
    pub page_size: u32,
    pub show_filters: bool,
    pub custom_endpoint: String,
    /// Auto-refresh period in milliseconds; 0 disables it.
    pub auto_refresh_ms: u64,
    pub title: String,
    pub subtitle: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            content_type: ContentType::Posts,
            page_size: DEFAULT_PAGE_SIZE,
            show_filters: true,
            custom_endpoint: String::new(),
            auto_refresh_ms: 0,
            title: DEFAULT_TITLE.to_string(),
            subtitle: String::new(),
        }
    }
}
