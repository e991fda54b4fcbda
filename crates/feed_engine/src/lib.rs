//! Feed engine: HTTP access to the content source and effect execution.
mod content;
mod decode;
mod engine;
mod projection;
mod scheduler;
mod taxonomy;
mod transport;
mod types;

pub use content::{parse_items, parse_response, parse_total_pages, ContentFetcher};
pub use decode::{decode_body, DecodeError};
pub use engine::EngineHandle;
pub use projection::{
    body_markdown, project_item, strip_html, truncate_chars, ItemSummary, DEFAULT_EXCERPT_CHARS,
};
pub use scheduler::{AutoRefreshScheduler, RefreshHandle};
pub use taxonomy::TaxonomyLoader;
pub use transport::{
    FetchSettings, HttpResponse, ReqwestTransport, Transport, TOTAL_ITEMS_HEADER,
    TOTAL_PAGES_HEADER,
};
pub use types::{EngineError, EngineEvent, FailureKind, FetchError};
