// Headless render engine and tracing view for running the controller without a page
use crate::application::dashboard_view::{DashboardView, Placeholder, UnavailableContext};
use crate::application::render_engine::{InstanceId, RenderEngine, RenderError};
use crate::domain::chart::ChartSpec;
use crate::domain::dashboard::Tab;
use crate::domain::payload::DashboardPayload;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Keeps chart instances as bookkeeping only; every canvas counts as visible
#[derive(Debug, Default)]
pub struct HeadlessEngine {
    ready: AtomicBool,
    next_id: AtomicU64,
    live: Mutex<HashMap<InstanceId, String>>,
}

impl HeadlessEngine {
    pub fn new(ready: bool) -> Self {
        Self {
            ready: AtomicBool::new(ready),
            ..Self::default()
        }
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::Release);
    }

    pub fn live_instances(&self) -> usize {
        self.live().len()
    }

    fn live(&self) -> MutexGuard<'_, HashMap<InstanceId, String>> {
        self.live.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl RenderEngine for HeadlessEngine {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    fn surface_visible(&self, _canvas_id: &str) -> bool {
        true
    }

    fn create(&self, canvas_id: &str, spec: &ChartSpec) -> Result<InstanceId, RenderError> {
        if !self.is_ready() {
            return Err(RenderError::NotReady);
        }
        let id = InstanceId(self.next_id.fetch_add(1, Ordering::AcqRel) + 1);
        self.live().insert(id, canvas_id.to_string());
        tracing::debug!(
            canvas_id,
            kind = ?spec.kind,
            points = spec.data.labels.len(),
            series = spec.data.datasets.len(),
            "Chart created"
        );
        Ok(id)
    }

    fn destroy(&self, instance: InstanceId) -> Result<(), RenderError> {
        match self.live().remove(&instance) {
            Some(_) => Ok(()),
            None => Err(RenderError::Instance {
                id: instance,
                message: "unknown instance".to_string(),
            }),
        }
    }

    fn resize(&self, instance: InstanceId) -> Result<(), RenderError> {
        if self.live().contains_key(&instance) {
            Ok(())
        } else {
            Err(RenderError::Instance {
                id: instance,
                message: "unknown instance".to_string(),
            })
        }
    }
}

/// Reports view changes through tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingView;

impl DashboardView for TracingView {
    fn set_loading(&self, loading: bool) {
        tracing::debug!(loading, "Loading indicator");
    }

    fn render_table(&self, tab: Tab, payload: &DashboardPayload) {
        tracing::info!(tab = %tab, rows = payload.rows().len(), "Table rendered");
    }

    fn show_unavailable(&self, context: &UnavailableContext) {
        tracing::warn!(
            tab = %context.tab,
            period = %context.period,
            endpoint = %context.endpoint,
            "Data unavailable: {}",
            context.message
        );
    }

    fn show_placeholder(&self, canvas_id: &str, placeholder: &Placeholder) {
        match placeholder {
            Placeholder::NoData => tracing::info!(canvas_id, "No data for chart"),
            Placeholder::RenderFailed { message } => {
                tracing::warn!(canvas_id, "Chart failed, retry available: {}", message)
            }
        }
    }
}
