use feed_core::{Effect, Msg};
use feed_engine::{EngineEvent, EngineHandle};
use feed_logging::{feed_debug, feed_info, feed_warn};

pub struct EffectRunner<'a> {
    engine: &'a EngineHandle,
}

impl<'a> EffectRunner<'a> {
    pub fn new(engine: &'a EngineHandle) -> Self {
        Self { engine }
    }

    pub fn apply(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchContent { seq, request } => {
                    self.engine.fetch_content(seq, request);
                }
                Effect::LoadTaxonomies { base_url } => {
                    feed_info!("LoadTaxonomies base_url={}", base_url);
                    self.engine.load_taxonomies(base_url);
                }
                Effect::StartAutoRefresh { interval_ms, timer } => {
                    feed_info!("StartAutoRefresh interval_ms={} timer={}", interval_ms, timer);
                    self.engine.start_auto_refresh(interval_ms, timer);
                }
                Effect::CancelAutoRefresh => {
                    feed_info!("CancelAutoRefresh");
                    self.engine.cancel_auto_refresh();
                }
            }
        }
    }
}

pub fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ContentFetched { seq, result } => Msg::ContentLoaded {
            seq,
            result: result.map_err(|err| {
                feed_warn!("Request #{} failed: {}", seq, err);
                err.to_string()
            }),
        },
        EngineEvent::TaxonomiesLoaded {
            base_url,
            taxonomies,
        } => Msg::TaxonomiesLoaded {
            base_url,
            taxonomies,
        },
        EngineEvent::RefreshTick { timer } => {
            feed_debug!("Auto-refresh tick from timer {}", timer);
            Msg::RefreshTick { timer }
        }
    }
}
