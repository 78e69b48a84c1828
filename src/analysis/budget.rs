//! Per-query work budget.

use std::time::{Duration, Instant};

use crate::{Error, Result};

/// Wall-clock deadline plus a cap on entities visited by one traversal.
///
/// Traversals call [`tick`](Self::tick) before each expansion step and
/// [`visit`](Self::visit) for each newly discovered entity.
#[derive(Debug, Clone)]
pub struct QueryBudget {
    started: Instant,
    timeout: Duration,
    max_visited: usize,
    visited: usize,
}

impl QueryBudget {
    pub fn new(timeout: Duration, max_visited: usize) -> Self {
        Self {
            started: Instant::now(),
            timeout,
            max_visited,
            visited: 0,
        }
    }

    /// Budget that never trips. Useful when the caller enforces its own limits.
    pub fn unlimited() -> Self {
        Self::new(Duration::MAX, usize::MAX)
    }

    /// Fail once the deadline has passed.
    pub fn tick(&self) -> Result<()> {
        if self.started.elapsed() > self.timeout {
            tracing::warn!(timeout = ?self.timeout, visited = self.visited, "query deadline exceeded");
            return Err(Error::Timeout(self.timeout));
        }
        Ok(())
    }

    /// Count one more visited entity.
    pub fn visit(&mut self) -> Result<()> {
        self.visited += 1;
        if self.visited > self.max_visited {
            tracing::warn!(max_visited = self.max_visited, "query visit budget exceeded");
            return Err(Error::BudgetExceeded(format!(
                "traversal visited more than {} entities", self.max_visited
            )));
        }
        Ok(())
    }

    pub fn visited(&self) -> usize {
        self.visited
    }
}
