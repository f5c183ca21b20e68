//! Core Agent trait definition

use crate::{Context, Outcome, Result};
use async_trait::async_trait;

/// A single pipeline stage
///
/// An agent reads the context accumulated so far and returns a delta for the
/// caller to merge. Agents never mutate the context themselves, which keeps
/// the merge order entirely in the hands of the orchestrator.
///
/// Recoverable problems (a provider outage the agent can paper over with
/// fallback data) belong in [`Outcome::diagnostic`]. An `Err` means the stage
/// could not produce a delta at all and the run should be aborted.
#[async_trait]
pub trait Agent<C: Context>: Send + Sync {
    /// Process the current context and return this stage's contribution
    async fn process(&self, context: &C) -> Result<Outcome<C::Delta>>;

    /// Get the agent's name
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[derive(Debug, Default)]
    struct Tally {
        total: i64,
    }

    impl Context for Tally {
        type Delta = i64;

        fn merge(&mut self, delta: i64) {
            self.total += delta;
        }
    }

    struct AddAgent(i64);

    #[async_trait]
    impl Agent<Tally> for AddAgent {
        async fn process(&self, _context: &Tally) -> Result<Outcome<i64>> {
            Ok(Outcome::clean(self.0))
        }

        fn name(&self) -> &str {
            "add"
        }
    }

    struct NeedsPositive;

    #[async_trait]
    impl Agent<Tally> for NeedsPositive {
        async fn process(&self, context: &Tally) -> Result<Outcome<i64>> {
            if context.total <= 0 {
                return Err(Error::MissingInput("positive total".to_string()));
            }
            Ok(Outcome::degraded(-1, "decremented"))
        }

        fn name(&self) -> &str {
            "needs-positive"
        }
    }

    #[test]
    fn test_agents_feed_each_other() {
        tokio_test::block_on(async {
            let mut tally = Tally::default();
            let stages: Vec<Box<dyn Agent<Tally>>> =
                vec![Box::new(AddAgent(3)), Box::new(NeedsPositive)];

            for stage in &stages {
                let outcome = stage.process(&tally).await.unwrap();
                tally.merge(outcome.delta);
            }

            assert_eq!(tally.total, 2);
        });
    }

    #[test]
    fn test_agent_error_on_missing_input() {
        tokio_test::block_on(async {
            let tally = Tally::default();
            let err = NeedsPositive.process(&tally).await.unwrap_err();
            assert!(matches!(err, Error::MissingInput(_)));
            assert_eq!(NeedsPositive.name(), "needs-positive");
        });
    }
}
