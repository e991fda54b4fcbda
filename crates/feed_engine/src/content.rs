use std::sync::Arc;

use feed_core::{ContentItem, ContentPage, ItemShape, Page, Post, RequestDescriptor};
use feed_logging::{feed_debug, feed_info};
use serde::de::DeserializeOwned;

use crate::decode::decode_body;
use crate::transport::{HttpResponse, Transport};
use crate::{FailureKind, FetchError};

/// Executes listing requests and parses the returned items.
#[derive(Clone)]
pub struct ContentFetcher {
    transport: Arc<dyn Transport>,
}

impl ContentFetcher {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn fetch(&self, request: &RequestDescriptor) -> Result<ContentPage, FetchError> {
        feed_debug!("GET {}", request.url);
        let response = self.transport.get(&request.url).await?;
        let page = parse_response(request.shape, &response)?;
        feed_info!(
            "Fetched {} items (page count {}) from {}",
            page.items.len(),
            page.total_pages,
            response.final_url
        );
        Ok(page)
    }
}

pub fn parse_response(shape: ItemShape, response: &HttpResponse) -> Result<ContentPage, FetchError> {
    let text = decode_body(&response.body, response.content_type.as_deref())
        .map_err(|err| FetchError::new(FailureKind::Parse, err.to_string()))?;
    Ok(ContentPage {
        items: parse_items(shape, &text)?,
        total_pages: parse_total_pages(response.total_pages.as_deref()),
        total_items: response
            .total_items
            .as_deref()
            .and_then(|raw| raw.trim().parse().ok()),
    })
}

/// Parses a listing body. Posts and pages must be a JSON array; custom
/// endpoints may also return a single value, treated as one record.
pub fn parse_items(shape: ItemShape, body: &str) -> Result<Vec<ContentItem>, FetchError> {
    match shape {
        ItemShape::Post => Ok(parse_list::<Post>(body)?
            .into_iter()
            .map(ContentItem::Post)
            .collect()),
        ItemShape::Page => Ok(parse_list::<Page>(body)?
            .into_iter()
            .map(ContentItem::Page)
            .collect()),
        ItemShape::Opaque => {
            let value: serde_json::Value = serde_json::from_str(body).map_err(parse_error)?;
            let records = match value {
                serde_json::Value::Array(records) => records,
                other => vec![other],
            };
            Ok(records.into_iter().map(ContentItem::Custom).collect())
        }
    }
}

/// Page count from the total-pages header; 1 when absent, zero or malformed.
pub fn parse_total_pages(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|pages| *pages > 0)
        .unwrap_or(1)
}

fn parse_list<T: DeserializeOwned>(body: &str) -> Result<Vec<T>, FetchError> {
    serde_json::from_str(body).map_err(parse_error)
}

fn parse_error(err: serde_json::Error) -> FetchError {
    FetchError::new(FailureKind::Parse, err.to_string())
}
