use thiserror::Error;

/// Failures surfaced by the render engine proxy. Every variant leaves the
/// proxy ready for the next submission, so all of them are retryable.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },
    #[error("render engine failed: {0}")]
    Engine(String),
    #[error("failed to launch render engine: {0}")]
    Launch(String),
}

impl RenderError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Engine(_) | Self::Launch(_))
    }
}

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error(transparent)]
    Render(#[from] RenderError),
}
