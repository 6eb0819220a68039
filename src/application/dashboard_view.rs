// View port - what the controller asks the page to show
use crate::domain::dashboard::Tab;
use crate::domain::payload::DashboardPayload;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placeholder {
    /// The payload had no usable data for this canvas
    NoData,
    /// The render engine failed; the page offers a manual retry
    RenderFailed { message: String },
}

/// Context shown with the degraded "data unavailable" view
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnavailableContext {
    pub message: String,
    pub tab: Tab,
    pub period: String,
    pub endpoint: String,
}

pub trait DashboardView: Send + Sync {
    fn set_loading(&self, loading: bool);

    fn render_table(&self, tab: Tab, payload: &DashboardPayload);

    fn show_unavailable(&self, context: &UnavailableContext);

    fn show_placeholder(&self, canvas_id: &str, placeholder: &Placeholder);
}
