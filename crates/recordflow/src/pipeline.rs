use crate::builder::build_chart;
use crate::clock::{SharedClock, SystemClock};
use crate::dot::serialize_dot;
use crate::errors::ChartError;
use crate::proxy::RenderEngineProxy;
use crate::settings::ChartSettings;
use std::sync::Arc;

/// End-to-end pipeline: records in, rendered markup out. Validates the
/// settings bundle, builds the abstract graph, serializes it, and submits
/// the description to the engine proxy.
pub struct ChartPipeline {
    proxy: RenderEngineProxy,
    clock: SharedClock,
}

impl ChartPipeline {
    pub fn new(proxy: RenderEngineProxy) -> Self {
        Self {
            proxy,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn proxy(&self) -> &RenderEngineProxy {
        &self.proxy
    }

    /// Serializes the chart without rendering it; useful for debugging
    /// the description the engine will receive.
    pub fn describe(&self, settings: &ChartSettings) -> Result<String, ChartError> {
        settings.validate()?;
        let graph = build_chart(settings, self.clock.as_ref());
        Ok(serialize_dot(&graph, &settings.style))
    }

    pub async fn render(&self, settings: &ChartSettings) -> Result<String, ChartError> {
        let source = self.describe(settings)?;
        Ok(self.proxy.submit(&source).await?)
    }
}
