use crate::{RequestDescriptor, RequestSeq, TimerId};

/// Work the controller asks its host to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Execute the request and report back with `Msg::ContentLoaded` carrying `seq`.
    FetchContent {
        seq: RequestSeq,
        request: RequestDescriptor,
    },
    /// Fetch category and tag lists for `base_url`.
    LoadTaxonomies { base_url: String },
    /// Replace any running timer with one firing `Msg::RefreshTick { timer }`
    /// every `interval_ms`.
    StartAutoRefresh { interval_ms: u64, timer: TimerId },
    CancelAutoRefresh,
}
