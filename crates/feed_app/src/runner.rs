use std::time::Duration;

use feed_core::{update, Msg, ViewState};
use feed_engine::{EngineEvent, EngineHandle};
use feed_logging::{feed_info, feed_warn};

use crate::config::AppConfig;
use crate::effects::{event_to_msg, EffectRunner};
use crate::render::render;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

struct Session<'a> {
    state: ViewState,
    effects: EffectRunner<'a>,
}

impl Session<'_> {
    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.effects.apply(effects);
    }

    /// Renders when something changed and nothing is still loading.
    fn render_if_dirty(&mut self) {
        if self.state.result().is_loading() {
            return;
        }
        let view = self.state.view();
        if self.state.consume_dirty() {
            println!("{}", render(&view));
        }
    }

    fn is_settled(&self) -> bool {
        self.state.result().is_settled()
            && !self.state.view().refreshing
            && self.state.taxonomy_cache().is_some()
    }
}

/// Mounts a view, drives it from engine events and tears it down.
///
/// Without auto-refresh the run ends once the first listing (and the page
/// requested with `--page`) has been shown; with auto-refresh it ends after
/// `config.refreshes` refreshes.
pub fn run(config: AppConfig) -> anyhow::Result<()> {
    let engine = EngineHandle::new(config.fetch.clone())?;
    let mut session = Session {
        state: ViewState::new(config.view.clone()),
        effects: EffectRunner::new(&engine),
    };

    for msg in config.filters.messages() {
        session.dispatch(msg);
    }
    session.dispatch(Msg::Mounted);

    let mut pending_page = (config.start_page > 1).then_some(config.start_page);
    let mut refreshes = 0u32;

    loop {
        let Some(event) = engine.recv_timeout(POLL_INTERVAL)? else {
            continue;
        };
        if matches!(event, EngineEvent::RefreshTick { .. }) {
            refreshes += 1;
        }
        session.dispatch(event_to_msg(event));

        if let Some(page) = pending_page {
            if session.state.result().is_settled() {
                pending_page = None;
                if session.state.pagination().can_go_to(page) {
                    session.dispatch(Msg::GoToPage(page));
                } else {
                    feed_warn!(
                        "Page {} is out of range (1..={})",
                        page,
                        session.state.pagination().total_pages()
                    );
                }
            }
        }

        session.render_if_dirty();

        if pending_page.is_none() && session.is_settled() {
            let auto_refresh = session.state.auto_refresh_ms() > 0;
            if !auto_refresh || refreshes >= config.refreshes {
                break;
            }
        }
    }

    session.dispatch(Msg::Unmounted);
    feed_info!("View unmounted after {} refreshes", refreshes);
    Ok(())
}
