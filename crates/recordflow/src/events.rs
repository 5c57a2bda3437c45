use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use std::sync::Arc;

/// Lifecycle event emitted by the render engine proxy. Warm-up failures
/// are visible only here; they are never surfaced to submit callers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EngineEvent {
    pub timestamp: String,
    pub kind: EngineEventKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EngineEventKind {
    EngineStarted,
    WarmupFailed { reason: String },
    RenderStarted,
    RenderCompleted { bytes: usize },
    RenderFailed { reason: String },
    RenderTimedOut { timeout_ms: u64 },
    EngineRestarted,
}

pub trait EngineEventObserver: Send + Sync {
    fn on_event(&self, event: &EngineEvent);
}

impl<F> EngineEventObserver for F
where
    F: Fn(&EngineEvent) + Send + Sync,
{
    fn on_event(&self, event: &EngineEvent) {
        self(event);
    }
}

pub type SharedEngineEventObserver = Arc<dyn EngineEventObserver>;
pub type EngineEventSender = mpsc::UnboundedSender<EngineEvent>;
pub type EngineEventReceiver = mpsc::UnboundedReceiver<EngineEvent>;

#[derive(Clone, Default)]
pub struct EngineEventSink {
    observer: Option<SharedEngineEventObserver>,
    sender: Option<EngineEventSender>,
}

impl EngineEventSink {
    pub fn with_observer(observer: SharedEngineEventObserver) -> Self {
        Self {
            observer: Some(observer),
            sender: None,
        }
    }

    pub fn with_sender(sender: EngineEventSender) -> Self {
        Self {
            observer: None,
            sender: Some(sender),
        }
    }

    pub fn observer(mut self, observer: SharedEngineEventObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn sender(mut self, sender: EngineEventSender) -> Self {
        self.sender = Some(sender);
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.observer.is_some() || self.sender.is_some()
    }

    pub fn emit(&self, event: EngineEvent) {
        if let Some(observer) = self.observer.as_ref() {
            observer.on_event(&event);
        }
        if let Some(sender) = self.sender.as_ref() {
            let _ = sender.send(event);
        }
    }
}

pub fn engine_event_channel() -> (EngineEventSender, EngineEventReceiver) {
    mpsc::unbounded_channel()
}
