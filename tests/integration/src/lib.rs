//! Integration test utilities for the task manager
//!
//! This crate provides helpers for running end-to-end tests against
//! the REST API and the typed client.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
