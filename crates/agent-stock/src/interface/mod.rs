//! Inbound interface
//!
//! Transport-agnostic entry points: an analyze call taking a free-text query
//! and a liveness probe.

pub mod handler;
pub mod message;

pub use handler::{NO_QUERY_ERROR, analyze, health};
pub use message::{AnalyzeRequest, HealthReport};
