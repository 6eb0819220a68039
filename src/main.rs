// Main entry point - Dependency injection, profile server and headless snapshot
use std::{net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use chrono::NaiveDate;
use tracing_subscriber::EnvFilter;

use dashboard_refresh::application::cache_store::CacheStore;
use dashboard_refresh::application::clock::{Clock, SystemClock};
use dashboard_refresh::application::dashboard_controller::{DashboardController, LoadOutcome};
use dashboard_refresh::application::profile_service::ProfileService;
use dashboard_refresh::domain::dashboard::{DateRange, Period, Tab};
use dashboard_refresh::infrastructure::config::{load_dashboard_config, load_server_config};
use dashboard_refresh::infrastructure::headless::{HeadlessEngine, TracingView};
use dashboard_refresh::infrastructure::http_dashboard_api::HttpDashboardApi;
use dashboard_refresh::infrastructure::json_profile_repository::JsonProfileRepository;
use dashboard_refresh::infrastructure::token_store::resolve_auth_token;
use dashboard_refresh::presentation::app_state::AppState;
use dashboard_refresh::presentation::routes::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        None | Some("serve") => serve().await,
        Some("snapshot") => snapshot(args.next(), args.next()).await,
        Some(other) => anyhow::bail!("unknown command '{}', expected 'serve' or 'snapshot'", other),
    }
}

async fn serve() -> anyhow::Result<()> {
    let server_config = load_server_config()?;
    let settings = server_config.server;

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let repository = Arc::new(JsonProfileRepository::new(settings.profile_store_path));
    let cache = Arc::new(CacheStore::new(
        Duration::from_secs(settings.profile_cache_ttl_secs),
        clock,
    ));
    let state = Arc::new(AppState {
        profile_service: ProfileService::new(repository, cache),
    });

    let addr: SocketAddr = settings
        .bind_addr
        .parse()
        .with_context(|| format!("Invalid bind address {}", settings.bind_addr))?;
    tracing::info!("Starting dashboard-refresh profile service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router(state)).await?;

    Ok(())
}

/// One headless load cycle, printing the export document
async fn snapshot(tab: Option<String>, period: Option<String>) -> anyhow::Result<()> {
    let config = load_dashboard_config()?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    let tab: Tab = match tab {
        Some(tab) => tab.parse().map_err(anyhow::Error::msg)?,
        None => Tab::General,
    };
    let period = match period {
        Some(period) => parse_period(&period, clock.today())?,
        None => Period::default(),
    };

    let token = resolve_auth_token(&config.auth);
    let api = Arc::new(HttpDashboardApi::new(config.api.endpoint.clone(), token));
    let engine = Arc::new(HeadlessEngine::new(true));
    let controller = DashboardController::new(
        api,
        engine,
        Arc::new(TracingView),
        clock,
        config.controller_options(),
    )
    .with_selection(tab, period);

    let outcome = controller.start().await;
    let result = match outcome {
        LoadOutcome::Loaded { .. } => match controller.export_snapshot() {
            Some(document) => {
                tracing::info!("Export file name: {}", document.file_name());
                println!("{}", document.to_json_pretty()?);
                Ok(())
            }
            None => Err(anyhow::anyhow!("no data loaded")),
        },
        LoadOutcome::Failed(error) => Err(anyhow::anyhow!("dashboard data unavailable: {}", error)),
        other => Err(anyhow::anyhow!("load did not run: {:?}", other)),
    };

    controller.teardown();
    result
}

/// Accepts a preset name or `YYYY-MM-DD..YYYY-MM-DD`
fn parse_period(value: &str, today: NaiveDate) -> anyhow::Result<Period> {
    match value.split_once("..") {
        Some((from, to)) => {
            let from = NaiveDate::parse_from_str(from, "%Y-%m-%d").context("Invalid start date")?;
            let to = NaiveDate::parse_from_str(to, "%Y-%m-%d").context("Invalid end date")?;
            Ok(Period::Custom(DateRange::validate(from, to, today)?))
        }
        None => value.parse().map_err(anyhow::Error::msg),
    }
}
