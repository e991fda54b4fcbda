use crate::query::build_request;
use crate::view_model::ContentViewModel;
use crate::{
    ContentItem, ContentPage, Effect, FetchResult, FilterState, PaginationState, RequestSeq,
    Taxonomies, TimerId, ViewConfig, DEFAULT_WINDOW_SIZE,
};

/// Everything a content request depends on.
///
/// A new request is needed exactly when this tuple differs from the one the
/// previous request was built from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RefreshKey {
    pub base_url: String,
    pub filters: FilterState,
    pub page: u32,
    pub page_size: u32,
}

pub fn should_refetch(previous: Option<&RefreshKey>, next: &RefreshKey) -> bool {
    previous != Some(next)
}

/// Facet lists together with the base URL they were loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyCache {
    pub base_url: String,
    pub taxonomies: Taxonomies,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FetchTrigger {
    Dependencies,
    Manual,
    AutoRefresh,
}

/// State of one content view: filters, pagination, last result and caches.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    base_url: String,
    title: String,
    subtitle: String,
    show_filters: bool,
    auto_refresh_ms: u64,
    active_timer: TimerId,
    filters: FilterState,
    pagination: PaginationState,
    result: FetchResult<ContentItem>,
    refreshing: bool,
    latest_seq: RequestSeq,
    last_key: Option<RefreshKey>,
    taxonomies: Option<TaxonomyCache>,
    mounted: bool,
    dirty: bool,
}

impl ViewState {
    pub fn new(config: ViewConfig) -> Self {
        let filters = FilterState {
            custom_endpoint: config.custom_endpoint,
            ..FilterState::new(config.content_type)
        };
        Self {
            base_url: config.base_url,
            title: config.title,
            subtitle: config.subtitle,
            show_filters: config.show_filters,
            auto_refresh_ms: config.auto_refresh_ms,
            active_timer: 0,
            filters,
            pagination: PaginationState::new(config.page_size),
            result: FetchResult::Idle,
            refreshing: false,
            latest_seq: 0,
            last_key: None,
            taxonomies: None,
            mounted: false,
            dirty: false,
        }
    }

    pub fn view(&self) -> ContentViewModel {
        let taxonomies = self
            .taxonomies
            .as_ref()
            .filter(|cache| cache.base_url == self.base_url)
            .map(|cache| cache.taxonomies.clone())
            .unwrap_or_default();
        ContentViewModel {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            show_filters: self.show_filters,
            post_facets_enabled: self.filters.post_facets_apply(),
            base_url: self.base_url.clone(),
            filters: self.filters.clone(),
            categories: taxonomies.categories,
            tags: taxonomies.tags,
            result: self.result.clone(),
            refreshing: self.refreshing,
            current_page: self.pagination.current_page(),
            total_pages: self.pagination.total_pages(),
            page_size: self.pagination.page_size(),
            page_window: self.pagination.window(DEFAULT_WINDOW_SIZE),
            auto_refresh_ms: self.auto_refresh_ms,
            dirty: self.dirty,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn result(&self) -> &FetchResult<ContentItem> {
        &self.result
    }

    pub fn latest_seq(&self) -> RequestSeq {
        self.latest_seq
    }

    pub fn auto_refresh_ms(&self) -> u64 {
        self.auto_refresh_ms
    }

    /// Id of the most recently started refresh timer, 0 before any.
    pub fn active_timer(&self) -> TimerId {
        self.active_timer
    }

    pub fn taxonomy_cache(&self) -> Option<&TaxonomyCache> {
        self.taxonomies.as_ref()
    }

    /// True when the cached facet lists were loaded from the current base URL.
    pub fn has_taxonomies_for_base(&self) -> bool {
        self.taxonomies
            .as_ref()
            .is_some_and(|cache| cache.base_url == self.base_url)
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn refresh_key(&self) -> RefreshKey {
        RefreshKey {
            base_url: self.base_url.clone(),
            filters: self.filters.clone(),
            page: self.pagination.current_page(),
            page_size: self.pagination.page_size(),
        }
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_mounted(&mut self, mounted: bool) {
        self.mounted = mounted;
        self.mark_dirty();
    }

    pub(crate) fn set_auto_refresh_ms(&mut self, interval_ms: u64) {
        self.auto_refresh_ms = interval_ms;
        self.mark_dirty();
    }

    pub(crate) fn start_timer(&mut self) -> Effect {
        self.active_timer += 1;
        Effect::StartAutoRefresh {
            interval_ms: self.auto_refresh_ms,
            timer: self.active_timer,
        }
    }

    /// A tick counts only while mounted, enabled and coming from the live timer.
    pub(crate) fn accepts_tick(&self, timer: TimerId) -> bool {
        self.mounted && self.auto_refresh_ms > 0 && timer == self.active_timer
    }

    /// Applies `change` to the filters. Returns false when nothing changed;
    /// otherwise the page is reset to 1.
    pub(crate) fn change_filters(&mut self, change: impl FnOnce(&mut FilterState)) -> bool {
        let before = self.filters.clone();
        change(&mut self.filters);
        if self.filters == before {
            return false;
        }
        self.pagination.reset_to_first();
        self.mark_dirty();
        true
    }

    pub(crate) fn change_base_url(&mut self, base_url: String) -> bool {
        if self.base_url == base_url {
            return false;
        }
        self.base_url = base_url;
        self.taxonomies = None;
        self.pagination.reset_to_first();
        self.mark_dirty();
        true
    }

    pub(crate) fn change_page_size(&mut self, page_size: u32) -> bool {
        if page_size == 0 || page_size == self.pagination.page_size() {
            return false;
        }
        self.pagination.set_page_size(page_size);
        self.pagination.reset_to_first();
        self.mark_dirty();
        true
    }

    pub(crate) fn go_to_page(&mut self, page: u32) -> bool {
        let moved = self.pagination.go_to(page);
        if moved {
            self.mark_dirty();
        }
        moved
    }

    /// Issues a request when the dependencies differ from the last request.
    pub(crate) fn refetch_if_needed(&mut self) -> Vec<Effect> {
        if !self.mounted || !should_refetch(self.last_key.as_ref(), &self.refresh_key()) {
            return Vec::new();
        }
        vec![self.issue_fetch(FetchTrigger::Dependencies)]
    }

    pub(crate) fn issue_fetch(&mut self, trigger: FetchTrigger) -> Effect {
        self.latest_seq += 1;
        let key = self.refresh_key();
        let request = build_request(&key.base_url, &key.filters, key.page, key.page_size);
        self.last_key = Some(key);

        let keep_visible = trigger == FetchTrigger::AutoRefresh
            && matches!(self.result, FetchResult::Success { .. });
        if keep_visible {
            self.refreshing = true;
        } else {
            self.result = FetchResult::Loading;
            self.refreshing = false;
        }
        self.mark_dirty();

        Effect::FetchContent {
            seq: self.latest_seq,
            request,
        }
    }

    /// Applies a content response. Responses for anything but the latest
    /// request are dropped.
    pub(crate) fn apply_content(
        &mut self,
        seq: RequestSeq,
        result: Result<ContentPage, String>,
    ) -> Vec<Effect> {
        if !self.mounted || seq != self.latest_seq {
            return Vec::new();
        }
        self.refreshing = false;
        self.mark_dirty();
        match result {
            Ok(page) => {
                let moved = self.pagination.apply_total(page.total_pages);
                self.result = FetchResult::Success {
                    items: page.items,
                    total_pages: self.pagination.total_pages(),
                };
                if moved {
                    self.refetch_if_needed()
                } else {
                    Vec::new()
                }
            }
            Err(message) => {
                self.result = FetchResult::Failure { message };
                Vec::new()
            }
        }
    }

    /// Stores facet lists unless they belong to a base URL no longer in use.
    pub(crate) fn apply_taxonomies(&mut self, base_url: String, taxonomies: Taxonomies) -> bool {
        if base_url != self.base_url {
            return false;
        }
        self.taxonomies = Some(TaxonomyCache {
            base_url,
            taxonomies,
        });
        self.mark_dirty();
        true
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(ViewConfig::default())
    }
}
