// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod headless;
pub mod http_dashboard_api;
pub mod json_profile_repository;
pub mod token_store;
