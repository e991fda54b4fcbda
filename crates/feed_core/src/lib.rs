//! Feed core: pure content-view state machine, query building and pagination.
mod config;
mod effect;
mod filter;
mod model;
mod msg;
mod pagination;
mod query;
mod result;
mod state;
mod update;
mod view_model;

pub use config::{ViewConfig, DEFAULT_PAGE_SIZE, DEFAULT_TITLE};
pub use effect::Effect;
pub use filter::{DateWindow, FilterState, TermFilter};
pub use model::{
    parse_timestamp, ContentItem, ContentPage, ContentType, ItemId, ItemShape, Page, Post,
    RequestSeq, RichText, Taxonomies, TaxonomyKind, Term, TermId, TimerId,
};
pub use msg::Msg;
pub use pagination::{visible_window, PaginationState, DEFAULT_WINDOW_SIZE};
pub use query::{
    build_request, build_request_at, taxonomy_url, RequestDescriptor, API_PREFIX,
    TAXONOMY_PAGE_SIZE,
};
pub use result::FetchResult;
pub use state::{should_refetch, RefreshKey, TaxonomyCache, ViewState};
pub use update::update;
pub use view_model::ContentViewModel;
