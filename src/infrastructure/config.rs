use crate::application::dashboard_controller::ControllerOptions;
use crate::application::data_fetcher::DEFAULT_FETCH_TIMEOUT;
use crate::domain::chart::ChartSlot;
use crate::domain::dashboard::Tab;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    pub api: ApiSettings,
    pub auth: AuthSettings,
    #[serde(default)]
    pub refresh: RefreshSettings,
    #[serde(default)]
    pub layouts: LayoutsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub endpoint: String,
    pub user: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthSettings {
    pub default_token: String,
    pub session_token_path: Option<String>,
    pub local_token_path: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct RefreshSettings {
    pub cache_ttl_secs: u64,
    pub stagger_ms: u64,
    pub resize_debounce_ms: u64,
}

impl Default for RefreshSettings {
    fn default() -> Self {
        Self {
            cache_ttl_secs: 300,
            stagger_ms: 0,
            resize_debounce_ms: 250,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct LayoutsConfig {
    #[serde(default)]
    pub general: Vec<ChartSlot>,
    #[serde(default)]
    pub confirmed: Vec<ChartSlot>,
    #[serde(default)]
    pub vpn: Vec<ChartSlot>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind_addr: String,
    pub profile_store_path: String,
    #[serde(default = "default_profile_cache_ttl_secs")]
    pub profile_cache_ttl_secs: u64,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT.as_secs()
}

fn default_profile_cache_ttl_secs() -> u64 {
    60 * 60
}

impl DashboardConfig {
    pub fn controller_options(&self) -> ControllerOptions {
        let layouts = HashMap::from([
            (Tab::General, self.layouts.general.clone()),
            (Tab::Confirmed, self.layouts.confirmed.clone()),
            (Tab::Vpn, self.layouts.vpn.clone()),
        ]);

        ControllerOptions {
            user: self.api.user.clone(),
            layouts,
            fetch_timeout: Duration::from_secs(self.api.timeout_secs),
            cache_ttl: Duration::from_secs(self.refresh.cache_ttl_secs),
            stagger: Duration::from_millis(self.refresh.stagger_ms),
            resize_debounce: Duration::from_millis(self.refresh.resize_debounce_ms),
        }
    }
}

fn build_config(name: &str) -> Result<config::Config, config::ConfigError> {
    config::Config::builder()
        .add_source(config::File::with_name(name))
        .add_source(config::Environment::with_prefix("DASHBOARD").separator("__"))
        .build()
}

pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let settings = build_config("config/dashboard")?;
    Ok(settings.try_deserialize()?)
}

pub fn load_server_config() -> anyhow::Result<ServerConfig> {
    let settings = build_config("config/server")?;
    Ok(settings.try_deserialize()?)
}
