// Application layer - cache, chart lifecycle, fetching and the dashboard controller
pub mod cache_store;
pub mod chart_registry;
pub mod clock;
pub mod dashboard_api;
pub mod dashboard_controller;
pub mod dashboard_view;
pub mod data_fetcher;
pub mod export;
pub mod profile_repository;
pub mod profile_service;
pub mod render_engine;
