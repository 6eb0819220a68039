// Chart domain models - kinds, slots and validated chart data
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
    Doughnut,
    Mixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartSize {
    #[default]
    Full,
    Mini,
}

/// A visualization slot on a tab, keyed by its canvas identifier
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChartSlot {
    pub canvas_id: String,
    pub kind: ChartKind,
    #[serde(default)]
    pub size: ChartSize,
}

impl ChartSlot {
    pub fn new(canvas_id: impl Into<String>, kind: ChartKind, size: ChartSize) -> Self {
        Self {
            canvas_id: canvas_id.into(),
            kind,
            size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    #[serde(default)]
    pub label: String,
    /// Gaps in a series arrive as `null`
    pub data: Vec<Option<f64>>,
    /// Per-series override, used by mixed charts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<ChartKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default, alias = "series")]
    pub datasets: Vec<Series>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ShapeError {
    #[error("chart has no labels")]
    NoLabels,
    #[error("chart has no series")]
    NoSeries,
    #[error("series '{series}' has {actual} points for {expected} labels")]
    LengthMismatch {
        series: String,
        expected: usize,
        actual: usize,
    },
}

impl ChartData {
    pub fn validate(&self) -> Result<(), ShapeError> {
        if self.labels.is_empty() {
            return Err(ShapeError::NoLabels);
        }
        if self.datasets.is_empty() {
            return Err(ShapeError::NoSeries);
        }
        for series in &self.datasets {
            if series.data.len() != self.labels.len() {
                return Err(ShapeError::LengthMismatch {
                    series: series.label.clone(),
                    expected: self.labels.len(),
                    actual: series.data.len(),
                });
            }
        }
        Ok(())
    }
}

/// Everything a render engine needs to draw one chart
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub size: ChartSize,
    pub data: ChartData,
}
