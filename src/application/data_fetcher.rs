// Data fetcher - one request per load cycle, bounded by a timeout and validated at the boundary
use crate::application::clock::Clock;
use crate::application::dashboard_api::{DashboardApi, DashboardRequest};
use crate::domain::dashboard::{Period, Tab};
use crate::domain::payload::DashboardPayload;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("invalid response: {0}")]
    Validation(String),
}

#[derive(Clone)]
pub struct DataFetcher {
    api: Arc<dyn DashboardApi>,
    clock: Arc<dyn Clock>,
    timeout: Duration,
}

impl DataFetcher {
    pub fn new(api: Arc<dyn DashboardApi>, clock: Arc<dyn Clock>, timeout: Duration) -> Self {
        Self { api, clock, timeout }
    }

    pub fn endpoint(&self) -> &str {
        self.api.endpoint()
    }

    pub async fn fetch(&self, tab: Tab, period: &Period, user: &str) -> Result<DashboardPayload, FetchError> {
        let request = DashboardRequest {
            tab,
            period: *period,
            user: user.to_string(),
            timestamp_ms: self.clock.now().timestamp_millis(),
        };

        tracing::debug!(tab = %tab, period = %period, "Fetching dashboard data");

        // Dropping the request future on timeout cancels it
        let envelope = match tokio::time::timeout(self.timeout, self.api.get_dashboard(&request)).await {
            Ok(result) => result?,
            Err(_) => {
                tracing::warn!(tab = %tab, period = %period, "Dashboard request timed out");
                return Err(FetchError::Timeout(self.timeout));
            }
        };

        envelope.into_payload().map_err(|message| {
            tracing::warn!(tab = %tab, period = %period, "Rejected dashboard response: {}", message);
            FetchError::Validation(message)
        })
    }
}
