//! Core abstractions for agent pipelines
//!
//! This crate defines the stage contract shared by every agent: an [`Agent`]
//! reads a [`Context`] and returns an [`Outcome`] carrying the delta to merge.

pub mod agent;
pub mod context;
pub mod error;

pub use agent::Agent;
pub use context::{Context, Outcome};
pub use error::{Error, Result};
