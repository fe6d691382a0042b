//! Omen - Bitcoin macro signal engine and alert server

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use config::Config;
use services::{DashboardService, SignalHistory};
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub dashboard: Arc<DashboardService>,
    pub history: Arc<SignalHistory>,
}
