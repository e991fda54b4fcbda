use crate::state::FetchTrigger;
use crate::{Effect, Msg, ViewState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: ViewState, msg: Msg) -> (ViewState, Vec<Effect>) {
    let effects = match msg {
        Msg::Mounted => {
            if state.is_mounted() {
                return (state, Vec::new());
            }
            state.set_mounted(true);
            let mut effects = Vec::with_capacity(3);
            if !state.has_taxonomies_for_base() {
                effects.push(Effect::LoadTaxonomies {
                    base_url: state.base_url().to_string(),
                });
            }
            effects.push(state.issue_fetch(FetchTrigger::Dependencies));
            if state.auto_refresh_ms() > 0 {
                effects.push(state.start_timer());
            }
            effects
        }
        Msg::Unmounted => {
            if !state.is_mounted() {
                return (state, Vec::new());
            }
            state.set_mounted(false);
            vec![Effect::CancelAutoRefresh]
        }
        Msg::BaseUrlChanged(base_url) => {
            if !state.change_base_url(base_url) || !state.is_mounted() {
                return (state, Vec::new());
            }
            let mut effects = vec![Effect::LoadTaxonomies {
                base_url: state.base_url().to_string(),
            }];
            effects.extend(state.refetch_if_needed());
            effects
        }
        Msg::ContentTypeChanged(content_type) => {
            filters_changed(&mut state, |f| f.content_type = content_type)
        }
        Msg::CategorySelected(category) => filters_changed(&mut state, |f| f.category = category),
        Msg::TagSelected(tag) => filters_changed(&mut state, |f| f.tag = tag),
        Msg::SearchChanged(search) => filters_changed(&mut state, |f| f.search = search),
        Msg::DateWindowChanged(window) => filters_changed(&mut state, |f| f.date_window = window),
        Msg::CustomEndpointChanged(endpoint) => {
            filters_changed(&mut state, |f| f.custom_endpoint = endpoint)
        }
        Msg::PageSizeChanged(page_size) => {
            if state.change_page_size(page_size) {
                state.refetch_if_needed()
            } else {
                Vec::new()
            }
        }
        Msg::GoToPage(page) => go_to_page(&mut state, page),
        Msg::NextPage => {
            let next = state.pagination().current_page().saturating_add(1);
            go_to_page(&mut state, next)
        }
        Msg::PrevPage => {
            let prev = state.pagination().current_page().saturating_sub(1);
            go_to_page(&mut state, prev)
        }
        Msg::RefreshClicked => {
            if state.is_mounted() {
                vec![state.issue_fetch(FetchTrigger::Manual)]
            } else {
                Vec::new()
            }
        }
        Msg::ReloadTaxonomiesClicked => {
            if state.is_mounted() {
                vec![Effect::LoadTaxonomies {
                    base_url: state.base_url().to_string(),
                }]
            } else {
                Vec::new()
            }
        }
        Msg::AutoRefreshChanged { interval_ms } => {
            let previous = state.auto_refresh_ms();
            if interval_ms == previous {
                return (state, Vec::new());
            }
            state.set_auto_refresh_ms(interval_ms);
            if !state.is_mounted() {
                return (state, Vec::new());
            }
            let mut effects = Vec::with_capacity(2);
            if previous > 0 {
                effects.push(Effect::CancelAutoRefresh);
            }
            if interval_ms > 0 {
                effects.push(state.start_timer());
            }
            effects
        }
        Msg::RefreshTick { timer } => {
            // A tick may still be queued after its timer was cancelled or replaced.
            if state.accepts_tick(timer) {
                vec![state.issue_fetch(FetchTrigger::AutoRefresh)]
            } else {
                Vec::new()
            }
        }
        Msg::ContentLoaded { seq, result } => state.apply_content(seq, result),
        Msg::TaxonomiesLoaded {
            base_url,
            taxonomies,
        } => {
            state.apply_taxonomies(base_url, taxonomies);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn filters_changed(
    state: &mut ViewState,
    change: impl FnOnce(&mut crate::FilterState),
) -> Vec<Effect> {
    if state.change_filters(change) {
        state.refetch_if_needed()
    } else {
        Vec::new()
    }
}

fn go_to_page(state: &mut ViewState, page: u32) -> Vec<Effect> {
    if state.go_to_page(page) {
        state.refetch_if_needed()
    } else {
        Vec::new()
    }
}
