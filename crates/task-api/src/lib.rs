//! # task-api
//!
//! REST API server built with Axum framework.
//!
//! Exposes `/auth/*` (access token in the body, refresh token in an HTTP-only
//! cookie), `/tasks/*` behind bearer authentication, and health probes.

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod server;
pub mod state;

pub use server::{create_app, create_app_state, run, serve};
pub use state::AppState;

#[cfg(test)]
mod test_support;
