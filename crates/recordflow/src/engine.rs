use crate::errors::RenderError;
use async_trait::async_trait;
use std::process::Stdio;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Warm-up source: a throwaway render issued right after engine
/// construction to surface initialization problems early.
pub const EMPTY_GRAPH: &str = "digraph {}";

/// One rendering engine instance. The proxy owns at most one at a time
/// and replaces it wholesale on failure or timeout.
#[async_trait]
pub trait RenderEngine: Send + Sync {
    /// Renders a DOT description into image markup.
    async fn render(&self, source: &str) -> Result<String, RenderError>;
}

pub trait RenderEngineFactory: Send + Sync {
    fn create(&self) -> Arc<dyn RenderEngine>;
}

impl<F> RenderEngineFactory for F
where
    F: Fn() -> Arc<dyn RenderEngine> + Send + Sync,
{
    fn create(&self) -> Arc<dyn RenderEngine> {
        self()
    }
}

pub type SharedRenderEngineFactory = Arc<dyn RenderEngineFactory>;

/// Production engine: runs the local Graphviz `dot` binary per render,
/// feeding the description on stdin and reading SVG markup from stdout.
/// The child is killed when the render future is dropped, which is how a
/// timed-out render gets torn down.
#[derive(Clone, Debug)]
pub struct DotProcessEngine {
    command: String,
    format: String,
}

impl DotProcessEngine {
    pub fn new() -> Self {
        Self {
            command: "dot".to_string(),
            format: "svg".to_string(),
        }
    }

    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }
}

impl Default for DotProcessEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RenderEngine for DotProcessEngine {
    async fn render(&self, source: &str) -> Result<String, RenderError> {
        let mut child = Command::new(&self.command)
            .arg(format!("-T{}", self.format))
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|error| RenderError::Launch(error.to_string()))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(source.as_bytes())
                .await
                .map_err(|error| RenderError::Engine(error.to_string()))?;
        }

        let output = child
            .wait_with_output()
            .await
            .map_err(|error| RenderError::Engine(error.to_string()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RenderError::Engine(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[derive(Clone, Debug, Default)]
pub struct DotProcessEngineFactory {
    engine: DotProcessEngine,
}

impl DotProcessEngineFactory {
    pub fn new(engine: DotProcessEngine) -> Self {
        Self { engine }
    }
}

impl RenderEngineFactory for DotProcessEngineFactory {
    fn create(&self) -> Arc<dyn RenderEngine> {
        Arc::new(self.engine.clone())
    }
}
