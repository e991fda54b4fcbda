use chrono::{DateTime, Utc};
use feed_core::{ContentItem, ItemId};
use scraper::Html;
use serde_json::Value;

pub const DEFAULT_EXCERPT_CHARS: usize = 160;
const ELLIPSIS: char = '…';

/// Display-ready shape of a content item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSummary {
    pub id: Option<ItemId>,
    pub title: String,
    pub excerpt: String,
    pub published: Option<DateTime<Utc>>,
    pub link: Option<String>,
}

pub fn project_item(item: &ContentItem, excerpt_chars: usize) -> ItemSummary {
    let (title, excerpt_html, link) = match item {
        ContentItem::Post(post) => (
            post.title.rendered.as_str(),
            pick_excerpt(&post.excerpt.rendered, &post.body.rendered),
            Some(post.link.as_str()),
        ),
        ContentItem::Page(page) => (
            page.title.rendered.as_str(),
            pick_excerpt(&page.excerpt.rendered, &page.body.rendered),
            Some(page.link.as_str()),
        ),
        ContentItem::Custom(value) => (
            text_field(value, &["title", "name"]).unwrap_or_default(),
            text_field(value, &["excerpt", "summary", "description", "content"])
                .unwrap_or_default(),
            text_field(value, &["link", "url"]),
        ),
    };

    let title = strip_html(title);
    ItemSummary {
        id: item.id(),
        title: if title.is_empty() {
            "(untitled)".to_string()
        } else {
            title
        },
        excerpt: truncate_chars(&strip_html(excerpt_html), excerpt_chars),
        published: item.published_at(),
        link: link.filter(|link| !link.is_empty()).map(str::to_string),
    }
}

/// Full body converted to Markdown, when the item has one.
pub fn body_markdown(item: &ContentItem) -> Option<String> {
    let html = match item {
        ContentItem::Post(post) => post.body.rendered.as_str(),
        ContentItem::Page(page) => page.body.rendered.as_str(),
        ContentItem::Custom(value) => text_field(value, &["content", "body"])?,
    };
    if html.trim().is_empty() {
        return None;
    }
    Some(html2md::parse_html(html).trim().to_string())
}

/// Text content of an HTML fragment with entities decoded and whitespace collapsed.
pub fn strip_html(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let text: String = fragment.root_element().text().collect();
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncates to at most `max_chars` characters, marking the cut with an ellipsis.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        None => text.to_string(),
        Some((cut, _)) => {
            let mut truncated = text[..cut].trim_end().to_string();
            truncated.push(ELLIPSIS);
            truncated
        }
    }
}

fn pick_excerpt<'a>(excerpt: &'a str, body: &'a str) -> &'a str {
    if excerpt.trim().is_empty() {
        body
    } else {
        excerpt
    }
}

// Accepts plain strings and `{"rendered": ...}` objects.
fn text_field<'a>(value: &'a Value, keys: &[&str]) -> Option<&'a str> {
    keys.iter().find_map(|key| match value.get(key)? {
        Value::String(text) => Some(text.as_str()),
        Value::Object(map) => map.get("rendered").and_then(Value::as_str),
        _ => None,
    })
}
