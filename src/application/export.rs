// Export of the loaded dashboard data as a downloadable JSON document
use crate::domain::dashboard::{Period, Tab};
use crate::domain::payload::DashboardPayload;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub export_time: DateTime<Utc>,
    pub tab: Tab,
    pub period: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportDocument {
    pub data: Map<String, Value>,
    pub metadata: ExportMetadata,
}

impl ExportDocument {
    pub fn new(tab: Tab, period: &Period, payload: &DashboardPayload, exported_at: DateTime<Utc>) -> Self {
        Self {
            data: payload.raw().clone(),
            metadata: ExportMetadata {
                export_time: exported_at,
                tab,
                period: period.to_string(),
            },
        }
    }

    pub fn file_name(&self) -> String {
        format!(
            "dashboard_{}_{}_{}.json",
            self.metadata.tab,
            self.metadata.period,
            self.metadata.export_time.format("%Y%m%d-%H%M%S")
        )
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
