// HTTP client for the dashboard data endpoint
use crate::application::dashboard_api::{DashboardApi, DashboardRequest};
use crate::application::data_fetcher::FetchError;
use crate::domain::payload::FetchResult;
use async_trait::async_trait;

#[derive(Debug, Clone)]
pub struct HttpDashboardApi {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl HttpDashboardApi {
    pub fn new(endpoint: String, token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn build_url(&self, request: &DashboardRequest) -> String {
        let mut url = format!(
            "{}?tab={}&period={}&user={}&timestamp={}",
            self.endpoint,
            request.tab,
            request.period.query_value(),
            urlencoding::encode(&request.user),
            request.timestamp_ms
        );
        if let Some(range) = request.period.custom_range() {
            url.push_str(&format!("&from={}&to={}", range.start(), range.end()));
        }
        url
    }
}

#[async_trait]
impl DashboardApi for HttpDashboardApi {
    fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn get_dashboard(&self, request: &DashboardRequest) -> Result<FetchResult, FetchError> {
        let url = self.build_url(request);

        let response = self
            .client
            .get(&url)
            .header("X-User", &request.user)
            .header("X-Tab", request.tab.as_str())
            .header("X-Period", request.period.query_value())
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Transport(format!("failed to reach {}: {}", self.endpoint, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Transport(format!(
                "dashboard API responded with status {}: {}",
                status, body
            )));
        }

        response
            .json::<FetchResult>()
            .await
            .map_err(|e| FetchError::Validation(format!("malformed response body: {}", e)))
    }
}
