#![allow(dead_code)]

use std::sync::Once;

use chrono::{TimeZone, Utc};
use feed_core::{
    update, ContentItem, ContentPage, ContentType, Effect, Msg, Post, RequestDescriptor,
    RequestSeq, RichText, ViewConfig, ViewState,
};

pub const BASE: &str = "https://news.example.com";

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(feed_logging::initialize_for_tests);
}

pub fn config() -> ViewConfig {
    ViewConfig {
        base_url: BASE.to_string(),
        content_type: ContentType::Posts,
        page_size: 10,
        ..ViewConfig::default()
    }
}

/// Mounts a view and returns it with the sequence number of its initial fetch.
pub fn mounted(config: ViewConfig) -> (ViewState, RequestSeq) {
    let (state, effects) = update(ViewState::new(config), Msg::Mounted);
    let (seq, _) = single_fetch(&effects);
    (state, seq)
}

pub fn fetches(effects: &[Effect]) -> Vec<(RequestSeq, RequestDescriptor)> {
    effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::FetchContent { seq, request } => Some((*seq, request.clone())),
            _ => None,
        })
        .collect()
}

pub fn single_fetch(effects: &[Effect]) -> (RequestSeq, RequestDescriptor) {
    let mut found = fetches(effects);
    assert_eq!(found.len(), 1, "expected exactly one fetch in {effects:?}");
    found.remove(0)
}

pub fn post(id: u64, title: &str) -> ContentItem {
    ContentItem::Post(Post {
        id,
        title: RichText::new(title),
        excerpt: RichText::default(),
        body: RichText::default(),
        published_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        link: format!("{BASE}/?p={id}"),
        featured_media: None,
        categories: Vec::new(),
        tags: Vec::new(),
        author: None,
    })
}

pub fn page_of(items: Vec<ContentItem>, total_pages: u32) -> Result<ContentPage, String> {
    Ok(ContentPage {
        items,
        total_pages,
        total_items: None,
    })
}

pub fn loaded(
    state: ViewState,
    seq: RequestSeq,
    result: Result<ContentPage, String>,
) -> (ViewState, Vec<Effect>) {
    update(state, Msg::ContentLoaded { seq, result })
}
