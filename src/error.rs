//! Error types used by the orchestrator, adapters and the race primitive.
//!
//! This module defines two enums:
//!
//! - [`LivenessError`]: the closed failure taxonomy carried by
//!   [`LivenessEvent::Failed`](crate::LivenessEvent::Failed) and returned from adapter calls.
//! - [`RaceError`]: why [`race`](crate::race) did not return the operation's output.
//!
//! Both provide `as_label` for logs/metrics, following the same convention.

use std::time::Duration;
use thiserror::Error;

/// # Unified error type for all liveness failures.
///
/// Per-provider failures (`ConfigurationFailed`, `Timeout`, `ProviderSpecific`, `InvalidState`)
/// are recovered by the orchestrator and only advance the queue.
/// `NoAvailableProvider`, `ContextLost` and `Cancelled` end the whole run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LivenessError {
    /// The adapter rejected its configuration (missing credentials, failed initialization).
    #[error("configuration failed: {reason}")]
    ConfigurationFailed {
        /// Human-readable cause.
        reason: String,
    },

    /// The provider did not complete within its deadline.
    #[error("timeout occurred for provider: {provider}")]
    Timeout {
        /// Provider identity that timed out.
        provider: String,
    },

    /// Provider-attributable failure with a numeric code.
    #[error("provider {provider} error ({code}): {message}")]
    ProviderSpecific {
        /// Provider identity.
        provider: String,
        /// Provider or orchestrator defined code.
        code: i32,
        /// Failure description.
        message: String,
    },

    /// Every configured provider was tried without success.
    #[error("no available provider for liveness detection")]
    NoAvailableProvider,

    /// The check was cancelled by its consumer.
    #[error("liveness detection was cancelled")]
    Cancelled,

    /// An operation was invoked in a state that does not allow it.
    #[error("invalid state: {detail}")]
    InvalidState {
        /// What was wrong.
        detail: String,
    },

    /// The presentation context went away during the check.
    #[error("presentation context was lost during liveness check")]
    ContextLost,
}

impl LivenessError {
    /// Shorthand for [`LivenessError::ConfigurationFailed`].
    pub fn configuration(reason: impl Into<String>) -> Self {
        LivenessError::ConfigurationFailed {
            reason: reason.into(),
        }
    }

    /// Shorthand for [`LivenessError::Timeout`].
    pub fn timeout(provider: impl Into<String>) -> Self {
        LivenessError::Timeout {
            provider: provider.into(),
        }
    }

    /// Shorthand for [`LivenessError::ProviderSpecific`].
    pub fn provider_specific(
        provider: impl Into<String>,
        code: i32,
        message: impl Into<String>,
    ) -> Self {
        LivenessError::ProviderSpecific {
            provider: provider.into(),
            code,
            message: message.into(),
        }
    }

    /// Shorthand for [`LivenessError::InvalidState`].
    pub fn invalid_state(detail: impl Into<String>) -> Self {
        LivenessError::InvalidState {
            detail: detail.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use livenessvisor::LivenessError;
    ///
    /// let err = LivenessError::timeout("VendorA");
    /// assert_eq!(err.as_label(), "timeout");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            LivenessError::ConfigurationFailed { .. } => "configuration_failed",
            LivenessError::Timeout { .. } => "timeout",
            LivenessError::ProviderSpecific { .. } => "provider_specific",
            LivenessError::NoAvailableProvider => "no_available_provider",
            LivenessError::Cancelled => "cancelled",
            LivenessError::InvalidState { .. } => "invalid_state",
            LivenessError::ContextLost => "context_lost",
        }
    }

    /// Returns the provider this error is attributable to, if any.
    pub fn provider(&self) -> Option<&str> {
        match self {
            LivenessError::Timeout { provider } => Some(provider),
            LivenessError::ProviderSpecific { provider, .. } => Some(provider),
            _ => None,
        }
    }

    /// Indicates whether this error ends a whole run rather than a single attempt.
    ///
    /// # Example
    /// ```
    /// use livenessvisor::LivenessError;
    ///
    /// assert!(LivenessError::ContextLost.is_run_terminal());
    /// assert!(!LivenessError::timeout("Mock").is_run_terminal());
    /// ```
    pub fn is_run_terminal(&self) -> bool {
        matches!(
            self,
            LivenessError::NoAvailableProvider
                | LivenessError::ContextLost
                | LivenessError::Cancelled
        )
    }
}

/// # Why a race did not yield the operation's output.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RaceError {
    /// The deadline fired before the operation finished.
    #[error("deadline of {0:?} elapsed")]
    Elapsed(Duration),

    /// The external cancellation token fired first.
    #[error("race cancelled")]
    Cancelled,
}

impl RaceError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            RaceError::Elapsed(_) => "race_elapsed",
            RaceError::Cancelled => "race_cancelled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_human_readable() {
        let err = LivenessError::provider_specific("VendorB", -2, "network down");
        assert_eq!(err.to_string(), "provider VendorB error (-2): network down");
        assert_eq!(
            LivenessError::configuration("Invalid API key").to_string(),
            "configuration failed: Invalid API key"
        );
    }

    #[test]
    fn equality_is_structural() {
        assert_eq!(LivenessError::timeout("VendorA"), LivenessError::timeout("VendorA"));
        assert_ne!(LivenessError::timeout("VendorA"), LivenessError::timeout("VendorB"));
    }

    #[test]
    fn provider_attribution() {
        assert_eq!(LivenessError::timeout("Mock").provider(), Some("Mock"));
        assert_eq!(LivenessError::NoAvailableProvider.provider(), None);
        assert_eq!(LivenessError::invalid_state("x").as_label(), "invalid_state");
    }
}
