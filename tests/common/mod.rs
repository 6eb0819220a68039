// Shared fakes for the controller integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use dashboard_refresh::application::clock::ManualClock;
use dashboard_refresh::application::dashboard_api::{DashboardApi, DashboardRequest};
use dashboard_refresh::application::dashboard_controller::{ControllerOptions, DashboardController};
use dashboard_refresh::application::dashboard_view::{DashboardView, Placeholder, UnavailableContext};
use dashboard_refresh::application::data_fetcher::FetchError;
use dashboard_refresh::application::render_engine::{InstanceId, RenderEngine, RenderError};
use dashboard_refresh::domain::chart::{ChartKind, ChartSize, ChartSlot, ChartSpec};
use dashboard_refresh::domain::dashboard::Tab;
use dashboard_refresh::domain::payload::{DashboardPayload, FetchResult};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

pub const ENDPOINT: &str = "http://api.test/dashboard";

pub fn chart_json() -> Value {
    json!({
        "labels": ["00:00", "06:00", "12:00"],
        "datasets": [{"label": "requests", "data": [10, 20, 15]}]
    })
}

pub fn dashboard_json(tab: Tab) -> Value {
    json!({
        "success": true,
        "data": {
            "tab": tab.as_str(),
            "summary": {"total": 45},
            "charts": {
                "requestsChart": chart_json(),
                "statusChart": chart_json(),
                "requestsMini": chart_json(),
                "vpnSessionsChart": chart_json(),
                "confirmedChart": chart_json()
            },
            "table": [{"host": "edge-1"}, {"host": "edge-2"}]
        }
    })
}

pub fn envelope(value: Value) -> FetchResult {
    serde_json::from_value(value).unwrap()
}

#[derive(Default)]
pub struct FakeApi {
    scripted: Mutex<VecDeque<Result<FetchResult, FetchError>>>,
    calls: Mutex<Vec<DashboardRequest>>,
    gate: Mutex<Option<Arc<Notify>>>,
    hang: AtomicBool,
}

impl FakeApi {
    pub fn push(&self, response: Result<FetchResult, FetchError>) {
        self.scripted.lock().unwrap().push_back(response);
    }

    /// Hold every following request until the returned notify fires
    pub fn hold(&self) -> Arc<Notify> {
        let notify = Arc::new(Notify::new());
        *self.gate.lock().unwrap() = Some(notify.clone());
        notify
    }

    pub fn hang(&self, hang: bool) {
        self.hang.store(hang, Ordering::SeqCst);
    }

    pub fn calls(&self) -> Vec<DashboardRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl DashboardApi for FakeApi {
    fn endpoint(&self) -> &str {
        ENDPOINT
    }

    async fn get_dashboard(&self, request: &DashboardRequest) -> Result<FetchResult, FetchError> {
        self.calls.lock().unwrap().push(request.clone());
        let gate = self.gate.lock().unwrap().clone();
        if let Some(notify) = gate {
            notify.notified().await;
        }
        if self.hang.load(Ordering::SeqCst) {
            futures::future::pending::<()>().await;
        }
        let scripted = self.scripted.lock().unwrap().pop_front();
        scripted.unwrap_or_else(|| Ok(envelope(dashboard_json(request.tab))))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Create(String, InstanceId),
    Destroy(InstanceId),
    Resize(InstanceId),
}

pub struct RecordingEngine {
    ready: AtomicBool,
    next_id: AtomicU64,
    events: Mutex<Vec<EngineEvent>>,
    failing: Mutex<HashSet<String>>,
}

impl RecordingEngine {
    pub fn new(ready: bool) -> Self {
        Self {
            ready: AtomicBool::new(ready),
            next_id: AtomicU64::new(0),
            events: Mutex::new(Vec::new()),
            failing: Mutex::new(HashSet::new()),
        }
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }

    pub fn fail_on(&self, canvas_id: &str) {
        self.failing.lock().unwrap().insert(canvas_id.to_string());
    }

    pub fn stop_failing(&self) {
        self.failing.lock().unwrap().clear();
    }

    pub fn events(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().clone()
    }

    pub fn created(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                EngineEvent::Create(canvas_id, _) => Some(canvas_id),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, predicate: impl Fn(&EngineEvent) -> bool) -> usize {
        self.events().iter().filter(|e| predicate(e)).count()
    }
}

impl RenderEngine for RecordingEngine {
    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    fn surface_visible(&self, _canvas_id: &str) -> bool {
        true
    }

    fn create(&self, canvas_id: &str, _spec: &ChartSpec) -> Result<InstanceId, RenderError> {
        if self.failing.lock().unwrap().contains(canvas_id) {
            return Err(RenderError::Construction {
                canvas_id: canvas_id.to_string(),
                message: "canvas context unavailable".to_string(),
            });
        }
        let id = InstanceId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.events
            .lock()
            .unwrap()
            .push(EngineEvent::Create(canvas_id.to_string(), id));
        Ok(id)
    }

    fn destroy(&self, instance: InstanceId) -> Result<(), RenderError> {
        self.events.lock().unwrap().push(EngineEvent::Destroy(instance));
        Ok(())
    }

    fn resize(&self, instance: InstanceId) -> Result<(), RenderError> {
        self.events.lock().unwrap().push(EngineEvent::Resize(instance));
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingView {
    pub loading: Mutex<Vec<bool>>,
    pub tables: Mutex<Vec<(Tab, usize)>>,
    pub unavailable: Mutex<Vec<UnavailableContext>>,
    pub placeholders: Mutex<Vec<(String, Placeholder)>>,
}

impl RecordingView {
    pub fn tables(&self) -> Vec<(Tab, usize)> {
        self.tables.lock().unwrap().clone()
    }

    pub fn unavailable(&self) -> Vec<UnavailableContext> {
        self.unavailable.lock().unwrap().clone()
    }

    pub fn placeholders(&self) -> Vec<(String, Placeholder)> {
        self.placeholders.lock().unwrap().clone()
    }
}

impl DashboardView for RecordingView {
    fn set_loading(&self, loading: bool) {
        self.loading.lock().unwrap().push(loading);
    }

    fn render_table(&self, tab: Tab, payload: &DashboardPayload) {
        self.tables.lock().unwrap().push((tab, payload.rows().len()));
    }

    fn show_unavailable(&self, context: &UnavailableContext) {
        self.unavailable.lock().unwrap().push(context.clone());
    }

    fn show_placeholder(&self, canvas_id: &str, placeholder: &Placeholder) {
        self.placeholders
            .lock()
            .unwrap()
            .push((canvas_id.to_string(), placeholder.clone()));
    }
}

pub fn layouts() -> HashMap<Tab, Vec<ChartSlot>> {
    HashMap::from([
        (
            Tab::General,
            vec![
                ChartSlot::new("requestsChart", ChartKind::Line, ChartSize::Full),
                ChartSlot::new("statusChart", ChartKind::Doughnut, ChartSize::Full),
                ChartSlot::new("requestsMini", ChartKind::Bar, ChartSize::Mini),
            ],
        ),
        (
            Tab::Confirmed,
            vec![ChartSlot::new("confirmedChart", ChartKind::Bar, ChartSize::Full)],
        ),
        (
            Tab::Vpn,
            vec![ChartSlot::new("vpnSessionsChart", ChartKind::Line, ChartSize::Full)],
        ),
    ])
}

pub struct Harness {
    pub api: Arc<FakeApi>,
    pub engine: Arc<RecordingEngine>,
    pub view: Arc<RecordingView>,
    pub clock: Arc<ManualClock>,
    pub controller: DashboardController,
}

pub fn harness() -> Harness {
    harness_with(true, ControllerOptions::default())
}

pub fn harness_with(engine_ready: bool, options: ControllerOptions) -> Harness {
    let api = Arc::new(FakeApi::default());
    let engine = Arc::new(RecordingEngine::new(engine_ready));
    let view = Arc::new(RecordingView::default());
    let clock = Arc::new(ManualClock::new(Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap()));
    let options = ControllerOptions {
        user: "operator".to_string(),
        layouts: layouts(),
        cache_ttl: Duration::from_secs(300),
        ..options
    };
    let controller = DashboardController::new(
        api.clone(),
        engine.clone(),
        view.clone(),
        clock.clone(),
        options,
    );
    Harness {
        api,
        engine,
        view,
        clock,
        controller,
    }
}
