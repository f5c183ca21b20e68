//! Shared utilities for agent-rs
//!
//! This crate provides common functionality used across the workspace:
//! logging setup and environment-driven configuration helpers.

pub mod config;
pub mod logging;

pub use config::{EnvError, env_duration_millis, env_duration_secs, env_parse, env_string};
pub use logging::{init_tracing, init_tracing_with};
