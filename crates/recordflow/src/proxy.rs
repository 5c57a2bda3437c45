use crate::clock::{SharedClock, SystemClock};
use crate::engine::{EMPTY_GRAPH, RenderEngine, SharedRenderEngineFactory};
use crate::errors::RenderError;
use crate::events::{EngineEvent, EngineEventKind, EngineEventSink};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

pub const DEFAULT_RENDER_TIMEOUT: Duration = Duration::from_secs(10);

/// Owns the single live render engine instance and mediates every render
/// through it. The underlying engine is known to hang or wedge itself;
/// rather than repair it in place, any failure or timeout discards the
/// whole instance and constructs a fresh one before control returns, so
/// the proxy is always ready for the next submission.
///
/// Submissions are serialized through the engine slot's async mutex; a
/// second `submit` waits for the first instead of racing its timer.
pub struct RenderEngineProxy {
    factory: SharedRenderEngineFactory,
    timeout: Duration,
    events: EngineEventSink,
    clock: SharedClock,
    slot: Mutex<Option<Arc<dyn RenderEngine>>>,
}

impl RenderEngineProxy {
    pub fn new(factory: SharedRenderEngineFactory) -> Self {
        Self {
            factory,
            timeout: DEFAULT_RENDER_TIMEOUT,
            events: EngineEventSink::default(),
            clock: Arc::new(SystemClock),
            slot: Mutex::new(None),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_events(mut self, events: EngineEventSink) -> Self {
        self.events = events;
        self
    }

    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    /// Renders a description. Lazily constructs the engine on first use,
    /// enforces the deadline, and replaces the engine on any failure
    /// before the error reaches the caller.
    pub async fn submit(&self, source: &str) -> Result<String, RenderError> {
        let mut slot = self.slot.lock().await;
        let engine = match slot.as_ref() {
            Some(engine) => Arc::clone(engine),
            None => {
                let engine = self.start_engine();
                *slot = Some(Arc::clone(&engine));
                engine
            }
        };

        self.emit(EngineEventKind::RenderStarted);
        match tokio::time::timeout(self.timeout, engine.render(source)).await {
            Ok(Ok(markup)) => {
                self.emit(EngineEventKind::RenderCompleted {
                    bytes: markup.len(),
                });
                Ok(markup)
            }
            Ok(Err(error)) => {
                self.emit(EngineEventKind::RenderFailed {
                    reason: error.to_string(),
                });
                self.replace_engine(&mut slot);
                Err(error)
            }
            // The timer fired first. Dropping the render future tears the
            // in-flight operation down; a late result is never observed.
            Err(_) => {
                let timeout_ms = self.timeout.as_millis() as u64;
                self.emit(EngineEventKind::RenderTimedOut { timeout_ms });
                self.replace_engine(&mut slot);
                Err(RenderError::Timeout { timeout_ms })
            }
        }
    }

    /// Discards the current engine (if any) and constructs a fresh one.
    pub async fn restart(&self) {
        let mut slot = self.slot.lock().await;
        self.replace_engine(&mut slot);
    }

    /// Drops the current engine without constructing a replacement; the
    /// next submit lazily re-initializes.
    pub async fn dispose(&self) {
        let mut slot = self.slot.lock().await;
        *slot = None;
    }

    fn start_engine(&self) -> Arc<dyn RenderEngine> {
        let engine = self.factory.create();
        self.emit(EngineEventKind::EngineStarted);
        self.warm_up(Arc::clone(&engine));
        engine
    }

    fn replace_engine(&self, slot: &mut Option<Arc<dyn RenderEngine>>) {
        *slot = Some(self.start_engine());
        self.emit(EngineEventKind::EngineRestarted);
    }

    /// Fire-and-forget warm-up render of an empty graph. Failures are
    /// swallowed; they reach the event sink and nothing else.
    fn warm_up(&self, engine: Arc<dyn RenderEngine>) {
        let events = self.events.clone();
        let clock = Arc::clone(&self.clock);
        tokio::spawn(async move {
            if let Err(error) = engine.render(EMPTY_GRAPH).await {
                events.emit(EngineEvent {
                    timestamp: clock.timestamp(),
                    kind: EngineEventKind::WarmupFailed {
                        reason: error.to_string(),
                    },
                });
            }
        });
    }

    fn emit(&self, kind: EngineEventKind) {
        if !self.events.is_enabled() {
            return;
        }
        self.events.emit(EngineEvent {
            timestamp: self.clock.timestamp(),
            kind,
        });
    }
}
