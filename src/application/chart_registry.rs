// Chart registry - one live chart instance per canvas, destroyed before it is replaced
use crate::application::dashboard_view::{DashboardView, Placeholder};
use crate::application::render_engine::{InstanceId, RenderEngine, RenderEngineGate, RenderError};
use crate::domain::chart::{ChartData, ChartKind, ChartSize, ChartSlot, ChartSpec, ShapeError};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartHandle {
    pub canvas_id: String,
    pub kind: ChartKind,
    pub size: ChartSize,
    pub instance: InstanceId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartOutcome {
    Created(InstanceId),
    Deferred,
    NoData(Option<ShapeError>),
    Failed(RenderError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FlushReport {
    pub created: usize,
    pub failed: usize,
    pub dropped: usize,
}

pub struct ChartRegistry {
    engine: Arc<dyn RenderEngine>,
    view: Arc<dyn DashboardView>,
    gate: RenderEngineGate,
    handles: HashMap<String, ChartHandle>,
    /// Last spec that failed to build, kept for manual retry
    failed: HashMap<String, ChartSpec>,
}

impl ChartRegistry {
    pub fn new(engine: Arc<dyn RenderEngine>, view: Arc<dyn DashboardView>) -> Self {
        Self {
            gate: RenderEngineGate::new(engine.clone()),
            engine,
            view,
            handles: HashMap::new(),
            failed: HashMap::new(),
        }
    }

    /// Destroy whatever lives on the slot's canvas, then build the new chart
    pub fn create_or_replace(&mut self, slot: &ChartSlot, data: Option<&ChartData>) -> ChartOutcome {
        let canvas_id = slot.canvas_id.as_str();
        self.destroy(canvas_id);
        self.failed.remove(canvas_id);
        self.gate.discard(canvas_id);

        let data = match data {
            Some(data) => data,
            None => {
                tracing::debug!(canvas_id, "No chart data in payload");
                self.view.show_placeholder(canvas_id, &Placeholder::NoData);
                return ChartOutcome::NoData(None);
            }
        };
        if let Err(e) = data.validate() {
            tracing::warn!(canvas_id, "Invalid chart data: {}", e);
            self.view.show_placeholder(canvas_id, &Placeholder::NoData);
            return ChartOutcome::NoData(Some(e));
        }

        let spec = ChartSpec {
            kind: slot.kind,
            size: slot.size,
            data: data.clone(),
        };
        if !self.gate.is_ready() {
            self.gate.defer(canvas_id, spec);
            return ChartOutcome::Deferred;
        }

        self.construct(canvas_id, spec)
    }

    /// Build every deferred chart whose canvas is still on the page
    pub fn flush_pending(&mut self) -> FlushReport {
        let (ready, dropped) = self.gate.take_flushable();
        let mut report = FlushReport {
            dropped,
            ..FlushReport::default()
        };

        for (canvas_id, spec) in ready {
            self.destroy(&canvas_id);
            match self.construct(&canvas_id, spec) {
                ChartOutcome::Created(_) => report.created += 1,
                _ => report.failed += 1,
            }
        }

        if report != FlushReport::default() {
            tracing::info!(
                created = report.created,
                failed = report.failed,
                dropped = report.dropped,
                "Flushed deferred charts"
            );
        }
        report
    }

    /// Re-attempt the last chart that failed to build on this canvas
    pub fn retry(&mut self, canvas_id: &str) -> Option<ChartOutcome> {
        let spec = self.failed.remove(canvas_id)?;
        self.destroy(canvas_id);
        if !self.gate.is_ready() {
            self.gate.defer(canvas_id, spec);
            return Some(ChartOutcome::Deferred);
        }
        Some(self.construct(canvas_id, spec))
    }

    /// Destroy every full-size and miniature chart. Returns how many were destroyed cleanly.
    pub fn destroy_all(&mut self) -> usize {
        let mut destroyed = 0;
        for (canvas_id, handle) in self.handles.drain() {
            match self.engine.destroy(handle.instance) {
                Ok(()) => destroyed += 1,
                Err(e) => tracing::warn!(canvas_id = %canvas_id, "Chart destroy failed: {}", e),
            }
        }
        destroyed
    }

    /// Destroy all charts and forget deferred and failed requests
    pub fn reset(&mut self) {
        let destroyed = self.destroy_all();
        self.gate.clear();
        self.failed.clear();
        tracing::debug!(destroyed, "Chart registry reset");
    }

    /// Resize every live chart. Returns the number of failures.
    pub fn resize_all(&self) -> usize {
        let mut failures = 0;
        for handle in self.handles.values() {
            if let Err(e) = self.engine.resize(handle.instance) {
                tracing::warn!(canvas_id = %handle.canvas_id, "Chart resize failed: {}", e);
                failures += 1;
            }
        }
        failures
    }

    pub fn handle(&self, canvas_id: &str) -> Option<&ChartHandle> {
        self.handles.get(canvas_id)
    }

    pub fn live_count(&self) -> usize {
        self.handles.len()
    }

    pub fn pending_count(&self) -> usize {
        self.gate.pending_count()
    }

    pub fn has_pending(&self, canvas_id: &str) -> bool {
        self.gate.pending(canvas_id).is_some()
    }

    pub fn has_failed(&self, canvas_id: &str) -> bool {
        self.failed.contains_key(canvas_id)
    }

    fn destroy(&mut self, canvas_id: &str) {
        if let Some(handle) = self.handles.remove(canvas_id) {
            if let Err(e) = self.engine.destroy(handle.instance) {
                tracing::warn!(canvas_id, "Chart destroy failed: {}", e);
            }
        }
    }

    fn construct(&mut self, canvas_id: &str, spec: ChartSpec) -> ChartOutcome {
        match self.engine.create(canvas_id, &spec) {
            Ok(instance) => {
                self.handles.insert(
                    canvas_id.to_string(),
                    ChartHandle {
                        canvas_id: canvas_id.to_string(),
                        kind: spec.kind,
                        size: spec.size,
                        instance,
                    },
                );
                ChartOutcome::Created(instance)
            }
            Err(e) => {
                tracing::error!(canvas_id, "Chart creation failed: {}", e);
                self.view.show_placeholder(
                    canvas_id,
                    &Placeholder::RenderFailed {
                        message: e.to_string(),
                    },
                );
                self.failed.insert(canvas_id.to_string(), spec);
                ChartOutcome::Failed(e)
            }
        }
    }
}
