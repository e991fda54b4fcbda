use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

/// Source-assigned identifier of a content item.
pub type ItemId = u64;
/// Source-assigned identifier of a taxonomy term.
pub type TermId = u64;
/// Monotonically increasing tag attached to every issued content request.
pub type RequestSeq = u64;
/// Identifies one auto-refresh timer so ticks from a replaced timer can be told apart.
pub type TimerId = u64;

/// Which collection of the content source a view is browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContentType {
    #[default]
    Posts,
    Pages,
    Custom,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Posts => "posts",
            ContentType::Pages => "pages",
            ContentType::Custom => "custom",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "posts" | "post" => Ok(ContentType::Posts),
            "pages" | "page" => Ok(ContentType::Pages),
            "custom" => Ok(ContentType::Custom),
            other => Err(format!("unknown content type '{other}'")),
        }
    }
}

/// Shape the response body of a request is expected to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemShape {
    Post,
    Page,
    Opaque,
}

/// Rendered rich text as served by the content source.
///
/// Accepts both `{"rendered": "..."}` objects and bare strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "RichTextRepr")]
pub struct RichText {
    pub rendered: String,
}

impl RichText {
    pub fn new(rendered: impl Into<String>) -> Self {
        Self {
            rendered: rendered.into(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rendered.trim().is_empty()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RichTextRepr {
    Rendered {
        #[serde(default)]
        rendered: String,
    },
    Plain(String),
}

impl From<RichTextRepr> for RichText {
    fn from(repr: RichTextRepr) -> Self {
        match repr {
            RichTextRepr::Rendered { rendered } | RichTextRepr::Plain(rendered) => {
                Self { rendered }
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Post {
    pub id: ItemId,
    #[serde(default)]
    pub title: RichText,
    #[serde(default)]
    pub excerpt: RichText,
    #[serde(default, rename = "content")]
    pub body: RichText,
    #[serde(rename = "date", deserialize_with = "deserialize_timestamp")]
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub link: String,
    #[serde(default, deserialize_with = "deserialize_reference")]
    pub featured_media: Option<u64>,
    #[serde(default)]
    pub categories: Vec<TermId>,
    #[serde(default)]
    pub tags: Vec<TermId>,
    #[serde(default, deserialize_with = "deserialize_reference")]
    pub author: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Page {
    pub id: ItemId,
    #[serde(default)]
    pub title: RichText,
    #[serde(default)]
    pub excerpt: RichText,
    #[serde(default, rename = "content")]
    pub body: RichText,
    #[serde(rename = "date", deserialize_with = "deserialize_timestamp")]
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub link: String,
    #[serde(default, deserialize_with = "deserialize_reference")]
    pub featured_media: Option<u64>,
}

/// One entry of a content listing.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentItem {
    Post(Post),
    Page(Page),
    /// Opaque record from a custom endpoint; its shape is not validated.
    Custom(serde_json::Value),
}

impl ContentItem {
    pub fn id(&self) -> Option<ItemId> {
        match self {
            ContentItem::Post(post) => Some(post.id),
            ContentItem::Page(page) => Some(page.id),
            ContentItem::Custom(value) => value.get("id").and_then(serde_json::Value::as_u64),
        }
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        match self {
            ContentItem::Post(post) => Some(post.published_at),
            ContentItem::Page(page) => Some(page.published_at),
            ContentItem::Custom(_) => None,
        }
    }
}

/// A classification term (category or tag).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Term {
    pub id: TermId,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaxonomyKind {
    Categories,
    Tags,
}

impl TaxonomyKind {
    pub fn path_segment(self) -> &'static str {
        match self {
            TaxonomyKind::Categories => "categories",
            TaxonomyKind::Tags => "tags",
        }
    }
}

/// Facet lists used to populate the category and tag filters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Taxonomies {
    pub categories: Vec<Term>,
    pub tags: Vec<Term>,
}

/// One page of a content listing as returned by the source.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentPage {
    pub items: Vec<ContentItem>,
    pub total_pages: u32,
    pub total_items: Option<u64>,
}

/// Parses the timestamp formats served by content sources.
///
/// RFC 3339 values keep their offset; naive ISO-8601 values are taken as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp '{raw}'")))
}

// Sources use 0 for "no reference".
fn deserialize_reference<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<u64>::deserialize(deserializer)?;
    Ok(value.filter(|id| *id != 0))
}
