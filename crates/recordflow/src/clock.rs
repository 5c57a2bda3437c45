use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Time source for the generation timestamp baked into each chart. The
/// builder takes it as a parameter so tests can assert exact output.
pub trait Clock: Send + Sync {
    fn timestamp(&self) -> String;
}

pub type SharedClock = Arc<dyn Clock>;

#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn timestamp(&self) -> String {
        let since_epoch = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        format!(
            "{}.{:03}Z",
            since_epoch.as_secs(),
            since_epoch.subsec_millis()
        )
    }
}

impl<F> Clock for F
where
    F: Fn() -> String + Send + Sync,
{
    fn timestamp(&self) -> String {
        self()
    }
}
