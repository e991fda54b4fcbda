use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use feed_core::{RequestDescriptor, RequestSeq, TimerId};
use feed_logging::{feed_debug, feed_info};

use crate::content::ContentFetcher;
use crate::scheduler::{AutoRefreshScheduler, RefreshHandle};
use crate::taxonomy::TaxonomyLoader;
use crate::transport::{FetchSettings, ReqwestTransport, Transport};
use crate::{EngineError, EngineEvent};

enum EngineCommand {
    FetchContent {
        seq: RequestSeq,
        request: RequestDescriptor,
    },
    LoadTaxonomies {
        base_url: String,
    },
    StartAutoRefresh {
        interval_ms: u64,
        timer: TimerId,
    },
    CancelAutoRefresh,
    Shutdown,
}

/// Executes fetches and the refresh timer for one view on a background runtime.
///
/// Results come back as [`EngineEvent`]s. At most one refresh timer is alive
/// per handle; starting a new one cancels the previous.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Result<Self, EngineError> {
        let transport = ReqwestTransport::new(settings)?;
        Self::with_transport(Arc::new(transport))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Result<Self, EngineError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let fetcher = ContentFetcher::new(transport.clone());
        let loader = TaxonomyLoader::new(transport);

        thread::spawn(move || {
            let scheduler = AutoRefreshScheduler::new(runtime.handle().clone());
            let mut refresh: Option<RefreshHandle> = None;

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::FetchContent { seq, request } => {
                        let fetcher = fetcher.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let result = fetcher.fetch(&request).await;
                            let _ = event_tx.send(EngineEvent::ContentFetched { seq, result });
                        });
                    }
                    EngineCommand::LoadTaxonomies { base_url } => {
                        let loader = loader.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let taxonomies = loader.load(&base_url).await;
                            let _ = event_tx.send(EngineEvent::TaxonomiesLoaded {
                                base_url,
                                taxonomies,
                            });
                        });
                    }
                    EngineCommand::StartAutoRefresh { interval_ms, timer } => {
                        if let Some(previous) = refresh.take() {
                            previous.cancel();
                        }
                        let event_tx = event_tx.clone();
                        refresh = scheduler.start(interval_ms, move || {
                            let _ = event_tx.send(EngineEvent::RefreshTick { timer });
                        });
                    }
                    EngineCommand::CancelAutoRefresh => {
                        if let Some(previous) = refresh.take() {
                            previous.cancel();
                        }
                    }
                    EngineCommand::Shutdown => break,
                }
            }

            drop(refresh);
            runtime.shutdown_timeout(Duration::from_secs(1));
            feed_debug!("Engine thread stopped");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn fetch_content(&self, seq: RequestSeq, request: RequestDescriptor) {
        feed_info!("Request #{} {}", seq, request.url);
        let _ = self.cmd_tx.send(EngineCommand::FetchContent { seq, request });
    }

    pub fn load_taxonomies(&self, base_url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::LoadTaxonomies {
            base_url: base_url.into(),
        });
    }

    /// Ticks are reported as [`EngineEvent::RefreshTick`] carrying `timer`.
    pub fn start_auto_refresh(&self, interval_ms: u64, timer: TimerId) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::StartAutoRefresh { interval_ms, timer });
    }

    pub fn cancel_auto_refresh(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CancelAutoRefresh);
    }

    /// Stops the engine thread. Pending work is dropped.
    pub fn shutdown(&self) {
        let _ = self.cmd_tx.send(EngineCommand::Shutdown);
    }

    /// Waits up to `timeout` for the next event. `Ok(None)` means nothing
    /// arrived in time; [`EngineError::Stopped`] means no event ever will.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<EngineEvent>, EngineError> {
        match self.event_rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(EngineError::Stopped),
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}
