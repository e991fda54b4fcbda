use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use feed_core::{build_request, ContentType, FilterState};
use feed_engine::{
    EngineError, EngineEvent, EngineHandle, FailureKind, FetchError, HttpResponse, Transport,
};

/// Serves canned bodies keyed by URL path, after an optional per-path delay.
#[derive(Default)]
struct FakeTransport {
    routes: HashMap<String, (Duration, Result<HttpResponse, FetchError>)>,
}

impl FakeTransport {
    fn route(mut self, path: &str, delay: Duration, body: &str, total_pages: &str) -> Self {
        let response = HttpResponse {
            final_url: path.to_string(),
            content_type: Some("application/json".to_string()),
            total_pages: Some(total_pages.to_string()),
            total_items: None,
            body: body.as_bytes().to_vec(),
        };
        self.routes.insert(path.to_string(), (delay, Ok(response)));
        self
    }

    fn failing(mut self, path: &str, status: u16) -> Self {
        let err = FetchError::new(FailureKind::HttpStatus(status), "request failed");
        self.routes.insert(path.to_string(), (Duration::ZERO, Err(err)));
        self
    }
}

#[async_trait::async_trait]
impl Transport for FakeTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, FetchError> {
        let path = url
            .trim_start_matches("http://fake")
            .split('?')
            .next()
            .unwrap_or_default()
            .to_string();
        let (delay, response) = self.routes.get(&path).cloned().unwrap_or_else(|| {
            let err = FetchError::new(FailureKind::HttpStatus(404), "no route");
            (Duration::ZERO, Err(err))
        });
        tokio::time::sleep(delay).await;
        response
    }
}

fn collect_events(engine: &EngineHandle, window: Duration) -> Vec<EngineEvent> {
    let deadline = Instant::now() + window;
    let mut events = Vec::new();
    while let Some(remaining) = deadline.checked_duration_since(Instant::now()) {
        match engine.recv_timeout(remaining).expect("engine running") {
            Some(event) => events.push(event),
            None => break,
        }
    }
    events
}

#[test]
fn fetch_result_is_reported_with_its_sequence() {
    let transport = FakeTransport::default().route(
        "/content/v1/posts",
        Duration::ZERO,
        r#"[{"id": 1, "title": "One", "date": "2024-01-01T00:00:00"}]"#,
        "3",
    );
    let engine = EngineHandle::with_transport(Arc::new(transport)).expect("engine");

    let request = build_request("http://fake", &FilterState::new(ContentType::Posts), 1, 10);
    engine.fetch_content(42, request);

    match engine.recv_timeout(Duration::from_secs(2)).expect("engine running") {
        Some(EngineEvent::ContentFetched { seq, result }) => {
            assert_eq!(seq, 42);
            let page = result.expect("page");
            assert_eq!(page.total_pages, 3);
            assert_eq!(page.items.len(), 1);
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn overlapping_fetches_can_resolve_out_of_order() {
    let transport = FakeTransport::default()
        .route("/content/v1/posts", Duration::from_millis(200), "[]", "1")
        .route("/content/v1/pages", Duration::ZERO, "[]", "1");
    let engine = EngineHandle::with_transport(Arc::new(transport)).expect("engine");

    engine.fetch_content(1, build_request("http://fake", &FilterState::new(ContentType::Posts), 1, 10));
    engine.fetch_content(2, build_request("http://fake", &FilterState::new(ContentType::Pages), 1, 10));

    let order: Vec<_> = collect_events(&engine, Duration::from_millis(600))
        .into_iter()
        .filter_map(|event| match event {
            EngineEvent::ContentFetched { seq, .. } => Some(seq),
            _ => None,
        })
        .collect();
    assert_eq!(order, vec![2, 1]);
}

#[test]
fn taxonomy_failure_is_not_an_error_event() {
    let transport = FakeTransport::default()
        .route(
            "/content/v1/categories",
            Duration::ZERO,
            r#"[{"id": 5, "name": "Roofing", "slug": "roofing", "count": 1}]"#,
            "1",
        )
        .failing("/content/v1/tags", 500);
    let engine = EngineHandle::with_transport(Arc::new(transport)).expect("engine");

    engine.load_taxonomies("http://fake");
    match engine.recv_timeout(Duration::from_secs(2)).expect("engine running") {
        Some(EngineEvent::TaxonomiesLoaded {
            base_url,
            taxonomies,
        }) => {
            assert_eq!(base_url, "http://fake");
            assert_eq!(taxonomies.categories.len(), 1);
            assert!(taxonomies.tags.is_empty());
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn cancelled_auto_refresh_stops_ticking() {
    let engine =
        EngineHandle::with_transport(Arc::new(FakeTransport::default())).expect("engine");

    engine.start_auto_refresh(25, 1);
    let ticks = collect_events(&engine, Duration::from_millis(200))
        .into_iter()
        .filter(|event| matches!(event, EngineEvent::RefreshTick { timer: 1 }))
        .count();
    assert!(ticks >= 2, "only {ticks} ticks");

    engine.cancel_auto_refresh();
    // Drain anything queued before the cancel landed.
    collect_events(&engine, Duration::from_millis(60));
    let late = collect_events(&engine, Duration::from_millis(200));
    assert!(late.is_empty(), "ticks after cancel: {late:?}");
}

#[test]
fn restarting_auto_refresh_keeps_a_single_timer() {
    let engine =
        EngineHandle::with_transport(Arc::new(FakeTransport::default())).expect("engine");

    for timer in 1..=5 {
        engine.start_auto_refresh(100, timer);
    }
    let ticks: Vec<_> = collect_events(&engine, Duration::from_millis(350))
        .into_iter()
        .filter_map(|event| match event {
            EngineEvent::RefreshTick { timer } => Some(timer),
            _ => None,
        })
        .collect();
    // One timer at 100ms yields about three ticks; five stacked timers would yield ~15.
    assert!((1..=4).contains(&ticks.len()), "{ticks:?}");
    assert!(ticks.iter().all(|&timer| timer == 5), "{ticks:?}");
}

#[test]
fn zero_interval_never_ticks() {
    let engine =
        EngineHandle::with_transport(Arc::new(FakeTransport::default())).expect("engine");
    engine.start_auto_refresh(0, 1);
    assert!(collect_events(&engine, Duration::from_millis(150)).is_empty());
}

#[test]
fn stopped_engine_is_reported_instead_of_timing_out() {
    let engine = EngineHandle::with_transport(Arc::new(FakeTransport::default())).expect("engine");
    engine.shutdown();

    let deadline = Instant::now() + Duration::from_secs(2);
    loop {
        match engine.recv_timeout(Duration::from_millis(50)) {
            Err(EngineError::Stopped) => break,
            Ok(None) if Instant::now() < deadline => continue,
            other => panic!("unexpected {other:?}"),
        }
    }
}
