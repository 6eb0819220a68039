// Domain layer - tabs, periods, chart shapes, payloads and profiles
pub mod chart;
pub mod dashboard;
pub mod payload;
pub mod profile;
