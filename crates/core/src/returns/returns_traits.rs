use super::returns_model::{ReturnResult, ReturnsReport};
use crate::errors::Result;

/// Trait defining the contract for snapshot return analysis.
pub trait ReturnsServiceTrait: Send + Sync {
    /// Per-snapshot returns for a user, oldest first.
    ///
    /// An empty snapshot history yields an empty list. Store failures are
    /// propagated; the computation itself never fails.
    fn get_returns(&self, user_id: &str) -> Result<Vec<ReturnResult>>;

    /// Per-snapshot returns together with the quarter-end rollup they were
    /// derived from.
    fn get_returns_report(&self, user_id: &str) -> Result<ReturnsReport>;
}
