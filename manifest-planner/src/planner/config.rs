//! Planner configuration.

use super::Distribution;

/// Configuration parameters for reconciliation and document intake.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlannerConfig {
    /// How documents are reassigned when stops or documents change.
    pub distribution: Distribution,

    /// Reject access keys whose trailing check digit does not match.
    /// Off by default: keys are only required to be 44 digits.
    pub verify_check_digit: bool,
}

impl PlannerConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(distribution: Distribution, verify_check_digit: bool) -> Self {
        Self {
            distribution,
            verify_check_digit,
        }
    }

    /// Returns a copy with a different distribution strategy.
    pub fn with_distribution(mut self, distribution: Distribution) -> Self {
        self.distribution = distribution;
        self
    }
}
