use crate::{
    ContentPage, ContentType, DateWindow, RequestSeq, Taxonomies, TermFilter, TimerId,
};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// The view became visible; performs the initial load.
    Mounted,
    /// The view is being torn down.
    Unmounted,
    BaseUrlChanged(String),
    ContentTypeChanged(ContentType),
    CategorySelected(TermFilter),
    TagSelected(TermFilter),
    /// User edited the search box (debounced text).
    SearchChanged(String),
    DateWindowChanged(DateWindow),
    CustomEndpointChanged(String),
    PageSizeChanged(u32),
    GoToPage(u32),
    NextPage,
    PrevPage,
    /// User asked to reload the current listing (also the retry action).
    RefreshClicked,
    /// User asked to reload the category and tag lists.
    ReloadTaxonomiesClicked,
    AutoRefreshChanged { interval_ms: u64 },
    /// Auto-refresh timer `timer` fired.
    RefreshTick { timer: TimerId },
    /// Engine completion for a content request.
    ContentLoaded {
        seq: RequestSeq,
        result: Result<ContentPage, String>,
    },
    /// Engine completion for a taxonomy load.
    TaxonomiesLoaded {
        base_url: String,
        taxonomies: Taxonomies,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
