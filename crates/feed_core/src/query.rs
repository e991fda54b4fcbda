use chrono::{DateTime, SecondsFormat, Utc};
use url::form_urlencoded::byte_serialize;

use crate::{ContentType, FilterState, ItemShape, TaxonomyKind};

/// Path prefix of the content API below the base URL.
pub const API_PREFIX: &str = "/content/v1";
/// Page size used when fetching taxonomy term lists.
pub const TAXONOMY_PAGE_SIZE: u32 = 100;

/// A fully composed GET request against the content source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    pub url: String,
    pub shape: ItemShape,
}

impl RequestDescriptor {
    /// Everything after the first `?`, or an empty string.
    pub fn query_string(&self) -> &str {
        self.url.split_once('?').map_or("", |(_, query)| query)
    }

    /// Returns the raw value of `key` in the query string.
    ///
    /// `Some("")` means the key is present without a value.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query_string().split('&').find_map(|pair| {
            let (name, value) = pair.split_once('=').unwrap_or((pair, ""));
            (name == key).then_some(value)
        })
    }
}

/// Builds the listing request for the current filters and page.
///
/// The date window is evaluated against the clock at call time, so two calls
/// with a `DateWindow` other than `All` may produce slightly different `after`
/// values.
pub fn build_request(
    base_url: &str,
    filters: &FilterState,
    page: u32,
    page_size: u32,
) -> RequestDescriptor {
    build_request_at(base_url, filters, page, page_size, Utc::now())
}

/// [`build_request`] with an explicit clock reading.
pub fn build_request_at(
    base_url: &str,
    filters: &FilterState,
    page: u32,
    page_size: u32,
    now: DateTime<Utc>,
) -> RequestDescriptor {
    let base = base_url.trim_end_matches('/');
    match filters.content_type {
        ContentType::Posts => RequestDescriptor {
            url: collection_url(base, "posts", page, page_size, post_facets(filters, now)),
            shape: ItemShape::Post,
        },
        ContentType::Pages => RequestDescriptor {
            url: collection_url(base, "pages", page, page_size, Vec::new()),
            shape: ItemShape::Page,
        },
        ContentType::Custom => match filters.active_custom_endpoint() {
            // Used verbatim: pagination is up to whoever configured the endpoint.
            Some(endpoint) => RequestDescriptor {
                url: format!("{base}{endpoint}"),
                shape: ItemShape::Opaque,
            },
            None => RequestDescriptor {
                url: collection_url(base, "posts", page, page_size, Vec::new()),
                shape: ItemShape::Post,
            },
        },
    }
}

/// URL of a taxonomy term list.
pub fn taxonomy_url(base_url: &str, kind: TaxonomyKind) -> String {
    format!(
        "{}{API_PREFIX}/{}?per_page={TAXONOMY_PAGE_SIZE}",
        base_url.trim_end_matches('/'),
        kind.path_segment()
    )
}

fn collection_url(
    base: &str,
    collection: &str,
    page: u32,
    page_size: u32,
    facets: Vec<(&'static str, String)>,
) -> String {
    let mut query = vec![
        "embed".to_string(),
        format!("per_page={}", page_size.max(1)),
        format!("page={}", page.max(1)),
    ];
    query.extend(facets.into_iter().map(|(key, value)| format!("{key}={value}")));
    format!("{base}{API_PREFIX}/{collection}?{}", query.join("&"))
}

fn post_facets(filters: &FilterState, now: DateTime<Utc>) -> Vec<(&'static str, String)> {
    let mut facets = Vec::new();
    if let Some(id) = filters.category.id() {
        facets.push(("categories", id.to_string()));
    }
    if let Some(id) = filters.tag.id() {
        facets.push(("tags", id.to_string()));
    }
    if let Some(query) = filters.search_query() {
        facets.push(("search", byte_serialize(query.as_bytes()).collect()));
    }
    if let Some(cutoff) = filters.date_window.cutoff(now) {
        facets.push(("after", cutoff.to_rfc3339_opts(SecondsFormat::Millis, true)));
    }
    facets
}
