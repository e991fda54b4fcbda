use std::sync::Arc;

use feed_core::{taxonomy_url, Taxonomies, TaxonomyKind, Term};
use feed_logging::{feed_info, feed_warn};

use crate::decode::decode_body;
use crate::transport::Transport;
use crate::{FailureKind, FetchError};

/// Loads the category and tag lists used to populate filter controls.
#[derive(Clone)]
pub struct TaxonomyLoader {
    transport: Arc<dyn Transport>,
}

impl TaxonomyLoader {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Fetches both lists concurrently. A list that fails to load is logged
    /// and comes back empty; it never affects the other list.
    pub async fn load(&self, base_url: &str) -> Taxonomies {
        let (categories, tags) = tokio::join!(
            self.load_terms(base_url, TaxonomyKind::Categories),
            self.load_terms(base_url, TaxonomyKind::Tags),
        );
        Taxonomies {
            categories: or_empty(base_url, TaxonomyKind::Categories, categories),
            tags: or_empty(base_url, TaxonomyKind::Tags, tags),
        }
    }

    pub async fn load_terms(
        &self,
        base_url: &str,
        kind: TaxonomyKind,
    ) -> Result<Vec<Term>, FetchError> {
        let response = self.transport.get(&taxonomy_url(base_url, kind)).await?;
        let text = decode_body(&response.body, response.content_type.as_deref())
            .map_err(|err| FetchError::new(FailureKind::Parse, err.to_string()))?;
        serde_json::from_str(&text).map_err(|err| FetchError::new(FailureKind::Parse, err.to_string()))
    }
}

fn or_empty(base_url: &str, kind: TaxonomyKind, result: Result<Vec<Term>, FetchError>) -> Vec<Term> {
    match result {
        Ok(terms) => {
            feed_info!("Loaded {} {} from {}", terms.len(), kind.path_segment(), base_url);
            terms
        }
        Err(err) => {
            feed_warn!("Failed to load {} from {}: {}", kind.path_segment(), base_url, err);
            Vec::new()
        }
    }
}
