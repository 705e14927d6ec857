//! Shared fixtures for in-crate tests

use task_common::{AppConfig, JwtService};
use task_service::ServiceContext;

use crate::state::AppState;

/// State on the in-memory store with default configuration
pub fn state() -> AppState {
    let config = AppConfig::default();
    let context = ServiceContext::in_memory(JwtService::from_config(&config.jwt));
    AppState::new(context, config)
}
