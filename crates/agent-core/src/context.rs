//! Accumulating execution context
//!
//! A `Context` is built up stage by stage. Each agent hands back an immutable
//! delta wrapped in an [`Outcome`], and the driver of the pipeline merges it.

use serde::{Deserialize, Serialize};

/// State threaded through a pipeline run
pub trait Context: Send + Sync {
    /// The unit of change a single stage contributes
    type Delta: Send;

    /// Fold a stage's delta into the context
    fn merge(&mut self, delta: Self::Delta);
}

/// Result of a successful stage run
///
/// `diagnostic` carries a human-readable note when the stage had to fall back
/// to substitute data. The delta is still valid and must be merged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome<D> {
    /// The stage's contribution to the context
    pub delta: D,
    /// Why the delta is degraded, if it is
    pub diagnostic: Option<String>,
}

impl<D> Outcome<D> {
    /// A delta produced without any fallback
    pub fn clean(delta: D) -> Self {
        Self {
            delta,
            diagnostic: None,
        }
    }

    /// A delta produced from fallback data
    pub fn degraded(delta: D, diagnostic: impl Into<String>) -> Self {
        Self {
            delta,
            diagnostic: Some(diagnostic.into()),
        }
    }

    /// Whether the stage had to fall back
    pub fn is_degraded(&self) -> bool {
        self.diagnostic.is_some()
    }

    /// Transform the delta, keeping the diagnostic
    pub fn map<E>(self, f: impl FnOnce(D) -> E) -> Outcome<E> {
        Outcome {
            delta: f(self.delta),
            diagnostic: self.diagnostic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct Notes {
        lines: Vec<String>,
    }

    impl Context for Notes {
        type Delta = String;

        fn merge(&mut self, delta: String) {
            self.lines.push(delta);
        }
    }

    #[test]
    fn test_clean_outcome() {
        let outcome = Outcome::clean(5);
        assert!(!outcome.is_degraded());
        assert_eq!(outcome.diagnostic, None);
    }

    #[test]
    fn test_degraded_outcome() {
        let outcome = Outcome::degraded(5, "provider offline");
        assert!(outcome.is_degraded());
        assert_eq!(outcome.diagnostic.as_deref(), Some("provider offline"));
    }

    #[test]
    fn test_map_keeps_diagnostic() {
        let outcome = Outcome::degraded(2, "mock").map(|n| n * 10);
        assert_eq!(outcome.delta, 20);
        assert_eq!(outcome.diagnostic.as_deref(), Some("mock"));
    }

    #[test]
    fn test_merge_order() {
        let mut notes = Notes::default();
        notes.merge("first".to_string());
        notes.merge("second".to_string());
        assert_eq!(notes.lines, vec!["first", "second"]);
    }
}
