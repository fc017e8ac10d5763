//! # Orchestrator runtime configuration.
//!
//! Provides [`OrchestratorConfig`], the knobs that are independent of any single provider.
//!
//! ## Sentinel values
//! - `event_capacity = 0` → clamped to 1 (see [`OrchestratorConfig::event_capacity_clamped`])

use std::time::Duration;

use crate::policies::BackoffPolicy;

/// Global configuration for an [`Orchestrator`](crate::Orchestrator).
///
/// ## Field semantics
/// - `configure_timeout`: fixed deadline for every adapter's `configure` call
/// - `backoff`: delay between a failed attempt and the next one
/// - `event_capacity`: bound of the outward event channel (backpressure, no drops)
/// - `grace`: how long teardown waits for a cancelled task before aborting it
#[derive(Clone, Debug)]
pub struct OrchestratorConfig {
    /// Deadline for the configuration phase, independent of the provider's own timeout.
    pub configure_timeout: Duration,

    /// Inter-attempt delay policy.
    ///
    /// `next(n)` is evaluated with the number of failed attempts so far (0-based).
    pub backoff: BackoffPolicy,

    /// Capacity of the outward event channel.
    ///
    /// Adapter session channels are sized by the adapters themselves.
    pub event_capacity: usize,

    /// Maximum wait for a cancelled task (adapter session or previous run) to unwind.
    ///
    /// Tasks still alive after `grace` are aborted.
    pub grace: Duration,
}

impl OrchestratorConfig {
    /// Returns the event capacity clamped to a minimum of 1.
    #[inline]
    pub fn event_capacity_clamped(&self) -> usize {
        self.event_capacity.max(1)
    }
}

impl Default for OrchestratorConfig {
    /// Default configuration:
    ///
    /// - `configure_timeout = 5s`
    /// - `backoff = 500ms constant, no jitter`
    /// - `event_capacity = 256`
    /// - `grace = 1s`
    fn default() -> Self {
        Self {
            configure_timeout: Duration::from_secs(5),
            backoff: BackoffPolicy {
                first: Duration::from_millis(500),
                max: Duration::from_secs(5),
                ..BackoffPolicy::default()
            },
            event_capacity: 256,
            grace: Duration::from_secs(1),
        }
    }
}
