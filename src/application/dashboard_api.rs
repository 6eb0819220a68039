// Port for the dashboard data endpoint
use crate::application::data_fetcher::FetchError;
use crate::domain::dashboard::{Period, Tab};
use crate::domain::payload::FetchResult;
use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardRequest {
    pub tab: Tab,
    pub period: Period,
    pub user: String,
    pub timestamp_ms: i64,
}

#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// Endpoint shown to the user when data is unavailable
    fn endpoint(&self) -> &str;

    /// Perform the request and decode the envelope. Validation of the
    /// envelope's contents happens in `DataFetcher`.
    async fn get_dashboard(&self, request: &DashboardRequest) -> Result<FetchResult, FetchError>;
}
