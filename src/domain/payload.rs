// Dashboard API payloads - raw envelope and the validated payload handed to rendering
use super::chart::ChartData;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Flags the server sets on placeholder data; any truthy one disqualifies a payload
pub const SYNTHETIC_FLAGS: [&str; 3] = ["isTestData", "isMockData", "generated"];

/// Response envelope exactly as the API sends it
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FetchResult {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl FetchResult {
    /// Classify the envelope; the error string becomes the validation message
    pub fn into_payload(self) -> Result<DashboardPayload, String> {
        match self.success {
            None => return Err("response is missing the success flag".to_string()),
            Some(false) => {
                return Err(self
                    .message
                    .unwrap_or_else(|| "API reported failure".to_string()));
            }
            Some(true) => {}
        }

        let data = match self.data {
            Some(Value::Object(map)) => map,
            Some(Value::Null) | None => return Err("response carries no data".to_string()),
            Some(_) => return Err("response data is not an object".to_string()),
        };
        if data.is_empty() {
            return Err("response data is empty".to_string());
        }
        if let Some(flag) = SYNTHETIC_FLAGS
            .iter()
            .find(|flag| data.get(**flag).is_some_and(is_truthy))
        {
            return Err(format!("response data is flagged as synthetic ({})", flag));
        }

        Ok(DashboardPayload::from_map(data))
    }
}

/// JavaScript-style truthiness of a JSON value
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Real, validated dashboard data for one tab and period
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardPayload {
    raw: Map<String, Value>,
    charts: BTreeMap<String, ChartData>,
    rows: Vec<Value>,
}

impl DashboardPayload {
    fn from_map(raw: Map<String, Value>) -> Self {
        let mut charts = BTreeMap::new();
        if let Some(Value::Object(entries)) = raw.get("charts") {
            for (canvas_id, value) in entries {
                match serde_json::from_value::<ChartData>(value.clone()) {
                    Ok(chart) => {
                        charts.insert(canvas_id.clone(), chart);
                    }
                    Err(e) => {
                        tracing::warn!(canvas_id = %canvas_id, "Unreadable chart data: {}", e);
                    }
                }
            }
        }

        let rows = raw
            .get("table")
            .or_else(|| raw.get("rows"))
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        Self { raw, charts, rows }
    }

    pub fn chart(&self, canvas_id: &str) -> Option<&ChartData> {
        self.charts.get(canvas_id)
    }

    pub fn rows(&self) -> &[Value] {
        &self.rows
    }

    pub fn summary(&self) -> Option<&Map<String, Value>> {
        self.raw.get("summary").and_then(Value::as_object)
    }

    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }
}
