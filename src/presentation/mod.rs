// Presentation layer - HTTP surface for the profile lookup endpoint
pub mod app_state;
pub mod handlers;
pub mod routes;
