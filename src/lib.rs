// Dashboard refresh - data-refresh and chart lifecycle control for the analytics dashboard
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
