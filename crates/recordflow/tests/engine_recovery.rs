use async_trait::async_trait;
use recordflow::{
    EngineEventKind, EngineEventSink, RenderEngine, RenderEngineFactory, RenderEngineProxy,
    RenderError, engine_event_channel,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

struct HealthyEngine;

#[async_trait]
impl RenderEngine for HealthyEngine {
    async fn render(&self, _source: &str) -> Result<String, RenderError> {
        Ok("<svg/>".to_string())
    }
}

struct HangingEngine;

#[async_trait]
impl RenderEngine for HangingEngine {
    async fn render(&self, _source: &str) -> Result<String, RenderError> {
        std::future::pending::<()>().await;
        unreachable!("pending render never resolves")
    }
}

struct FailingEngine;

#[async_trait]
impl RenderEngine for FailingEngine {
    async fn render(&self, _source: &str) -> Result<String, RenderError> {
        Err(RenderError::Engine("boom".to_string()))
    }
}

/// Hands out one broken engine, then healthy replacements, mimicking an
/// engine that wedges once and recovers after a restart.
struct BrokenFirstFactory {
    created: AtomicUsize,
    first_hangs: bool,
}

impl BrokenFirstFactory {
    fn hanging() -> Self {
        Self {
            created: AtomicUsize::new(0),
            first_hangs: true,
        }
    }

    fn failing() -> Self {
        Self {
            created: AtomicUsize::new(0),
            first_hangs: false,
        }
    }

    fn engines_created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }
}

impl RenderEngineFactory for BrokenFirstFactory {
    fn create(&self) -> Arc<dyn RenderEngine> {
        let instance = self.created.fetch_add(1, Ordering::SeqCst);
        if instance > 0 {
            Arc::new(HealthyEngine)
        } else if self.first_hangs {
            Arc::new(HangingEngine)
        } else {
            Arc::new(FailingEngine)
        }
    }
}

#[tokio::test(flavor = "current_thread")]
async fn submit_hanging_engine_expected_timeout_then_recovery() {
    let factory = Arc::new(BrokenFirstFactory::hanging());
    let proxy = RenderEngineProxy::new(Arc::clone(&factory) as Arc<dyn RenderEngineFactory>)
        .with_timeout(Duration::from_millis(50));

    let error = proxy
        .submit("digraph {}")
        .await
        .expect_err("first submit should time out");
    assert!(matches!(error, RenderError::Timeout { timeout_ms: 50 }));
    assert!(error.is_retryable());

    let markup = proxy
        .submit("digraph {}")
        .await
        .expect("second submit should use the fresh engine");
    assert_eq!(markup, "<svg/>");
    assert_eq!(factory.engines_created(), 2);
}

#[tokio::test(flavor = "current_thread")]
async fn submit_failing_engine_expected_surfaced_error_then_recovery() {
    let factory = Arc::new(BrokenFirstFactory::failing());
    let proxy = RenderEngineProxy::new(Arc::clone(&factory) as Arc<dyn RenderEngineFactory>)
        .with_timeout(Duration::from_millis(50));

    let error = proxy
        .submit("digraph {}")
        .await
        .expect_err("first submit should fail");
    assert!(matches!(error, RenderError::Engine(_)));

    let markup = proxy
        .submit("digraph {}")
        .await
        .expect("second submit should succeed");
    assert_eq!(markup, "<svg/>");
    assert_eq!(factory.engines_created(), 2);
}

#[tokio::test(flavor = "current_thread")]
async fn warmup_failure_expected_event_only_and_no_caller_error() {
    let factory = Arc::new(BrokenFirstFactory::failing());
    let (tx, mut rx) = engine_event_channel();
    let proxy = RenderEngineProxy::new(Arc::clone(&factory) as Arc<dyn RenderEngineFactory>)
        .with_timeout(Duration::from_millis(50))
        .with_events(EngineEventSink::with_sender(tx));

    // First submit hits the failing engine; the proxy restarts onto a
    // healthy one whose warm-up succeeds silently.
    let _ = proxy.submit("digraph {}").await;
    let markup = proxy
        .submit("digraph {}")
        .await
        .expect("second submit should succeed");
    assert_eq!(markup, "<svg/>");

    // Let the detached warm-up tasks run.
    tokio::time::sleep(Duration::from_millis(10)).await;

    let mut kinds = Vec::new();
    while let Ok(event) = rx.try_recv() {
        kinds.push(event.kind);
    }
    assert!(
        kinds
            .iter()
            .any(|kind| matches!(kind, EngineEventKind::WarmupFailed { .. })),
        "warm-up failure should reach the event sink"
    );
    assert!(
        kinds
            .iter()
            .any(|kind| matches!(kind, EngineEventKind::EngineRestarted)),
        "restart should reach the event sink"
    );
    assert!(
        kinds
            .iter()
            .any(|kind| matches!(kind, EngineEventKind::RenderCompleted { .. })),
        "successful render should reach the event sink"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn concurrent_submits_expected_serialized_not_raced() {
    let factory = Arc::new(BrokenFirstFactory::hanging());
    let proxy = Arc::new(
        RenderEngineProxy::new(Arc::clone(&factory) as Arc<dyn RenderEngineFactory>)
            .with_timeout(Duration::from_millis(50)),
    );

    let first = tokio::spawn({
        let proxy = Arc::clone(&proxy);
        async move { proxy.submit("digraph {}").await }
    });
    let second = tokio::spawn({
        let proxy = Arc::clone(&proxy);
        async move { proxy.submit("digraph {}").await }
    });

    let first = first.await.expect("first task should not panic");
    let second = second.await.expect("second task should not panic");

    // One submission hit the hanging engine and timed out; the other was
    // queued behind it and rendered on the replacement engine.
    let results = [first, second];
    assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
    assert_eq!(
        results
            .iter()
            .filter(|result| matches!(result, Err(RenderError::Timeout { .. })))
            .count(),
        1
    );
}
