// Dashboard controller - guarded tab/period transitions driving fetch, cache and chart lifecycle
use crate::application::cache_store::CacheStore;
use crate::application::chart_registry::{ChartOutcome, ChartRegistry, FlushReport};
use crate::application::clock::Clock;
use crate::application::dashboard_api::DashboardApi;
use crate::application::dashboard_view::{DashboardView, UnavailableContext};
use crate::application::data_fetcher::{DataFetcher, FetchError, DEFAULT_FETCH_TIMEOUT};
use crate::application::export::ExportDocument;
use crate::application::render_engine::RenderEngine;
use crate::domain::chart::ChartSlot;
use crate::domain::dashboard::{DashboardState, DateRange, Period, RangeRejection, Tab};
use crate::domain::payload::DashboardPayload;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub user: String,
    pub layouts: HashMap<Tab, Vec<ChartSlot>>,
    pub fetch_timeout: Duration,
    pub cache_ttl: Duration,
    /// Cosmetic pause between chart creations; zero disables it
    pub stagger: Duration,
    pub resize_debounce: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            user: "anonymous".to_string(),
            layouts: HashMap::new(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            cache_ttl: Duration::from_secs(300),
            stagger: Duration::ZERO,
            resize_debounce: Duration::from_millis(250),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    Idle,
    Loading { tab: Tab, period: Period },
    Loaded { tab: Tab, period: Period, data: DashboardPayload },
    Failed { tab: Tab, period: Period, error: FetchError },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded { from_cache: bool },
    Failed(FetchError),
    /// Another load was in flight; the request was dropped
    Busy,
    /// The custom range was invalid; nothing happened
    Rejected(RangeRejection),
    /// The dashboard was torn down before the data arrived
    Cancelled,
}

struct Session {
    tab: Tab,
    period: Period,
    load: LoadState,
    /// What is on screen; survives failed refreshes
    shown: Option<(Tab, Period, DashboardPayload)>,
}

/// Clears the loading flag when the load cycle ends, however it ends
struct LoadingGuard<'a>(&'a AtomicBool);

impl<'a> LoadingGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

pub struct DashboardController {
    fetcher: DataFetcher,
    view: Arc<dyn DashboardView>,
    clock: Arc<dyn Clock>,
    cache: CacheStore<DashboardPayload>,
    registry: Mutex<ChartRegistry>,
    session: Mutex<Session>,
    loading: AtomicBool,
    resize_generation: AtomicU64,
    /// Bumped by teardown so in-flight loads know the session ended
    teardown_generation: AtomicU64,
    options: ControllerOptions,
}

impl DashboardController {
    pub fn new(
        api: Arc<dyn DashboardApi>,
        engine: Arc<dyn RenderEngine>,
        view: Arc<dyn DashboardView>,
        clock: Arc<dyn Clock>,
        options: ControllerOptions,
    ) -> Self {
        Self {
            fetcher: DataFetcher::new(api, clock.clone(), options.fetch_timeout),
            registry: Mutex::new(ChartRegistry::new(engine, view.clone())),
            cache: CacheStore::new(options.cache_ttl, clock.clone()),
            view,
            clock,
            session: Mutex::new(Session {
                tab: Tab::General,
                period: Period::default(),
                load: LoadState::Idle,
                shown: None,
            }),
            loading: AtomicBool::new(false),
            resize_generation: AtomicU64::new(0),
            teardown_generation: AtomicU64::new(0),
            options,
        }
    }

    /// Start the session on a tab and period other than the defaults
    pub fn with_selection(self, tab: Tab, period: Period) -> Self {
        {
            let mut session = self.session();
            session.tab = tab;
            session.period = period;
        }
        self
    }

    pub fn state(&self) -> DashboardState {
        let session = self.session();
        DashboardState {
            tab: session.tab,
            period: session.period,
            loading: self.loading.load(Ordering::Acquire),
        }
    }

    pub fn load_state(&self) -> LoadState {
        self.session().load.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Initial load for the current selection
    pub async fn start(&self) -> LoadOutcome {
        let (tab, period) = {
            let session = self.session();
            (session.tab, session.period)
        };
        self.load(tab, period, false).await
    }

    /// Switch tab, keeping the current period (custom ranges included)
    pub async fn switch_tab(&self, tab: Tab) -> LoadOutcome {
        let period = self.session().period;
        self.load(tab, period, false).await
    }

    pub async fn change_period(&self, period: Period) -> LoadOutcome {
        // Custom ranges are re-checked against today's date
        if let Some(range) = period.custom_range() {
            if let Err(rejection) = DateRange::validate(range.start(), range.end(), self.clock.today()) {
                tracing::debug!("Ignoring custom range: {}", rejection);
                return LoadOutcome::Rejected(rejection);
            }
        }
        let tab = self.session().tab;
        self.load(tab, period, false).await
    }

    /// Validate a custom range and load it. Invalid ranges are dropped silently.
    pub async fn select_custom_range(&self, from: NaiveDate, to: NaiveDate) -> LoadOutcome {
        match DateRange::validate(from, to, self.clock.today()) {
            Ok(range) => self.change_period(Period::Custom(range)).await,
            Err(rejection) => {
                tracing::debug!("Ignoring custom range: {}", rejection);
                LoadOutcome::Rejected(rejection)
            }
        }
    }

    /// Manual retry of the last requested selection, bypassing the cache
    pub async fn reload(&self) -> LoadOutcome {
        let (tab, period) = {
            let session = self.session();
            match &session.load {
                LoadState::Loading { tab, period }
                | LoadState::Loaded { tab, period, .. }
                | LoadState::Failed { tab, period, .. } => (*tab, *period),
                LoadState::Idle => (session.tab, session.period),
            }
        };
        self.load(tab, period, true).await
    }

    /// Signal that the render engine became ready
    pub fn engine_ready(&self) -> FlushReport {
        self.registry().flush_pending()
    }

    pub fn retry_chart(&self, canvas_id: &str) -> Option<ChartOutcome> {
        self.registry().retry(canvas_id)
    }

    /// Debounced viewport resize; only the last call in a burst resizes. Returns whether it did.
    pub async fn handle_resize(&self) -> bool {
        let generation = self.resize_generation.fetch_add(1, Ordering::AcqRel) + 1;
        if !self.options.resize_debounce.is_zero() {
            tokio::time::sleep(self.options.resize_debounce).await;
        }
        if self.resize_generation.load(Ordering::Acquire) != generation {
            return false;
        }
        let failures = self.registry().resize_all();
        if failures > 0 {
            tracing::warn!(failures, "Some charts failed to resize");
        }
        true
    }

    /// Destroy every chart and return to idle. A load still in flight is abandoned when it settles.
    pub fn teardown(&self) {
        self.teardown_generation.fetch_add(1, Ordering::AcqRel);
        self.registry().reset();
        {
            let mut session = self.session();
            session.load = LoadState::Idle;
            session.shown = None;
        }
        tracing::info!("Dashboard torn down");
    }

    /// Export of the data currently on screen, if any
    pub fn export_snapshot(&self) -> Option<ExportDocument> {
        let session = self.session();
        let (tab, period, data) = session.shown.as_ref()?;
        Some(ExportDocument::new(*tab, period, data, self.clock.now()))
    }

    pub fn live_charts(&self) -> usize {
        self.registry().live_count()
    }

    async fn load(&self, tab: Tab, period: Period, force: bool) -> LoadOutcome {
        let Some(_guard) = LoadingGuard::acquire(&self.loading) else {
            tracing::debug!(tab = %tab, period = %period, "Load already in flight, dropping request");
            return LoadOutcome::Busy;
        };

        let generation = self.teardown_generation.load(Ordering::Acquire);
        self.session().load = LoadState::Loading { tab, period };
        self.view.set_loading(true);

        let key = format!("{}_{}", tab, period);
        let cached = if force { None } else { self.cache.get(&key) };
        let from_cache = cached.is_some();
        let result = match cached {
            Some(payload) => Ok(payload),
            None => self.fetcher.fetch(tab, &period, &self.options.user).await,
        };

        if self.torn_down_since(generation) {
            tracing::info!(tab = %tab, period = %period, "Dashboard torn down during load, discarding result");
            self.view.set_loading(false);
            return LoadOutcome::Cancelled;
        }

        let outcome = match result {
            Ok(payload) => {
                if !from_cache {
                    self.cache.set(key, payload.clone());
                }
                let previous_tab = {
                    let mut session = self.session();
                    let previous = session.tab;
                    session.tab = tab;
                    session.period = period;
                    previous
                };
                if self.apply(tab, previous_tab, &payload, generation).await {
                    let mut session = self.session();
                    session.shown = Some((tab, period, payload.clone()));
                    session.load = LoadState::Loaded { tab, period, data: payload };
                    drop(session);
                    tracing::info!(tab = %tab, period = %period, from_cache, "Dashboard loaded");
                    LoadOutcome::Loaded { from_cache }
                } else {
                    tracing::info!(tab = %tab, period = %period, "Dashboard torn down while rendering");
                    LoadOutcome::Cancelled
                }
            }
            Err(error) => {
                tracing::error!(tab = %tab, period = %period, "Dashboard load failed: {}", error);
                self.view.show_unavailable(&UnavailableContext {
                    message: error.to_string(),
                    tab,
                    period: period.to_string(),
                    endpoint: self.fetcher.endpoint().to_string(),
                });
                self.session().load = LoadState::Failed { tab, period, error: error.clone() };
                LoadOutcome::Failed(error)
            }
        };

        self.view.set_loading(false);
        outcome
    }

    /// Push a payload into charts and table. Runs only after the data is in hand.
    /// Returns false if a teardown interrupted it.
    async fn apply(&self, tab: Tab, previous_tab: Tab, payload: &DashboardPayload, generation: u64) -> bool {
        if tab != previous_tab {
            // Deferred and failed charts of the old tab go too
            self.registry().reset();
        }

        let slots = self.options.layouts.get(&tab).map(Vec::as_slice).unwrap_or_default();
        for (index, slot) in slots.iter().enumerate() {
            if index > 0 && !self.options.stagger.is_zero() {
                tokio::time::sleep(self.options.stagger).await;
                if self.torn_down_since(generation) {
                    return false;
                }
            }
            let outcome = self
                .registry()
                .create_or_replace(slot, payload.chart(&slot.canvas_id));
            tracing::debug!(canvas_id = %slot.canvas_id, ?outcome, "Chart updated");
        }

        self.view.render_table(tab, payload);
        self.registry().flush_pending();
        true
    }

    fn torn_down_since(&self, generation: u64) -> bool {
        self.teardown_generation.load(Ordering::Acquire) != generation
    }

    fn registry(&self) -> MutexGuard<'_, ChartRegistry> {
        self.registry.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(|e| e.into_inner())
    }
}
