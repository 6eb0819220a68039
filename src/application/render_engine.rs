// Render engine port and the readiness gate that buffers early chart requests
use crate::domain::chart::ChartSpec;
use std::collections::HashMap;
use std::sync::Arc;

/// Opaque handle to a chart instance owned by the render engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(pub u64);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("render engine is not ready")]
    NotReady,
    #[error("could not build chart on '{canvas_id}': {message}")]
    Construction { canvas_id: String, message: String },
    #[error("chart instance {id:?} failed: {message}")]
    Instance { id: InstanceId, message: String },
}

/// The external charting library
pub trait RenderEngine: Send + Sync {
    fn is_ready(&self) -> bool;

    /// Whether the canvas for `canvas_id` is still attached and visible
    fn surface_visible(&self, canvas_id: &str) -> bool;

    fn create(&self, canvas_id: &str, spec: &ChartSpec) -> Result<InstanceId, RenderError>;

    fn destroy(&self, instance: InstanceId) -> Result<(), RenderError>;

    fn resize(&self, instance: InstanceId) -> Result<(), RenderError>;
}

/// Holds at most one deferred spec per canvas until the engine is ready
pub struct RenderEngineGate {
    engine: Arc<dyn RenderEngine>,
    pending: HashMap<String, ChartSpec>,
}

impl RenderEngineGate {
    pub fn new(engine: Arc<dyn RenderEngine>) -> Self {
        Self {
            engine,
            pending: HashMap::new(),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.engine.is_ready()
    }

    /// Queue a spec for later; a newer spec for the same canvas replaces the old one
    pub fn defer(&mut self, canvas_id: &str, spec: ChartSpec) {
        if self.pending.insert(canvas_id.to_string(), spec).is_some() {
            tracing::debug!(canvas_id, "Replaced deferred chart request");
        } else {
            tracing::debug!(canvas_id, "Deferred chart until render engine is ready");
        }
    }

    /// Forget a deferred spec that a newer request has superseded
    pub fn discard(&mut self, canvas_id: &str) -> bool {
        self.pending.remove(canvas_id).is_some()
    }

    pub fn pending(&self, canvas_id: &str) -> Option<&ChartSpec> {
        self.pending.get(canvas_id)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Empty the buffer and hand back the requests whose canvas is still visible.
    /// While the engine is not ready nothing is taken.
    pub fn take_flushable(&mut self) -> (Vec<(String, ChartSpec)>, usize) {
        if !self.engine.is_ready() {
            return (Vec::new(), 0);
        }

        let mut ready = Vec::with_capacity(self.pending.len());
        let mut dropped = 0;
        for (canvas_id, spec) in self.pending.drain() {
            if self.engine.surface_visible(&canvas_id) {
                ready.push((canvas_id, spec));
            } else {
                tracing::debug!(canvas_id = %canvas_id, "Dropping deferred chart, canvas is gone");
                dropped += 1;
            }
        }
        // Deterministic creation order
        ready.sort_by(|a, b| a.0.cmp(&b.0));
        (ready, dropped)
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
