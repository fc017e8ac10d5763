//! # Liveness events and results.
//!
//! [`LivenessEvent`] is the unit of progress emitted by adapters and relayed by the orchestrator.
//! [`LivenessResult`] is the payload of a successful check.
//!
//! ## Rules
//! - `Completed` and `Failed` are **terminal** for one attempt; an attempt emits at most one.
//! - The outward stream of a run may contain several `Failed` events (one per abandoned
//!   provider) but at most one `Completed`.
//!
//! ## Example
//! ```rust
//! use livenessvisor::{LivenessEvent, LivenessResult};
//!
//! let done = LivenessEvent::Completed(LivenessResult::new("VendorA", 0.95));
//! assert!(done.is_terminal());
//! assert_eq!(done.as_label(), "completed");
//! assert_eq!(done.as_result().map(|r| r.provider()), Some("VendorA"));
//! ```

use std::time::SystemTime;

use crate::config::{Settings, SettingsValue};
use crate::error::LivenessError;

/// One unit of check progress.
#[derive(Debug, Clone, PartialEq)]
pub enum LivenessEvent {
    /// The provider started its session.
    Started,
    /// Progress fraction in `[0, 1]`.
    Progress(f64),
    /// The user-facing instruction changed.
    InstructionChanged(String),
    /// The check succeeded.
    Completed(LivenessResult),
    /// The attempt (or, as the final event, the run) failed.
    Failed(LivenessError),
}

impl LivenessEvent {
    /// Progress event with the fraction clamped to `[0, 1]`.
    pub fn progress(fraction: f64) -> Self {
        LivenessEvent::Progress(clamp_unit(fraction))
    }

    /// Instruction event.
    pub fn instruction(text: impl Into<String>) -> Self {
        LivenessEvent::InstructionChanged(text.into())
    }

    /// Returns `true` for `Completed` and `Failed`.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, LivenessEvent::Completed(_) | LivenessEvent::Failed(_))
    }

    #[inline]
    pub fn as_result(&self) -> Option<&LivenessResult> {
        match self {
            LivenessEvent::Completed(r) => Some(r),
            _ => None,
        }
    }

    #[inline]
    pub fn as_error(&self) -> Option<&LivenessError> {
        match self {
            LivenessEvent::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            LivenessEvent::Started => "started",
            LivenessEvent::Progress(_) => "progress",
            LivenessEvent::InstructionChanged(_) => "instruction_changed",
            LivenessEvent::Completed(_) => "completed",
            LivenessEvent::Failed(_) => "failed",
        }
    }
}

/// Successful check outcome. Immutable once created.
#[derive(Debug, Clone, PartialEq)]
pub struct LivenessResult {
    provider: String,
    confidence: f64,
    metadata: Settings,
    created_at: SystemTime,
}

impl LivenessResult {
    /// Creates a result stamped with the current wall-clock time.
    ///
    /// `confidence` is clamped to `[0, 1]`.
    pub fn new(provider: impl Into<String>, confidence: f64) -> Self {
        Self {
            provider: provider.into(),
            confidence: clamp_unit(confidence),
            metadata: Settings::new(),
            created_at: SystemTime::now(),
        }
    }

    /// Attaches one metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<SettingsValue>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Provider that produced this result.
    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    pub fn metadata(&self) -> &Settings {
        &self.metadata
    }

    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }
}

fn clamp_unit(x: f64) -> f64 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confidence_is_clamped() {
        assert_eq!(LivenessResult::new("A", 1.7).confidence(), 1.0);
        assert_eq!(LivenessResult::new("A", -0.2).confidence(), 0.0);
        assert_eq!(LivenessResult::new("A", f64::NAN).confidence(), 0.0);
    }

    #[test]
    fn only_completed_and_failed_are_terminal() {
        assert!(!LivenessEvent::Started.is_terminal());
        assert!(!LivenessEvent::progress(0.4).is_terminal());
        assert!(LivenessEvent::Failed(LivenessError::Cancelled).is_terminal());
    }

    #[test]
    fn metadata_round_trips() {
        let r = LivenessResult::new("Mock", 1.0).with_metadata("test", true);
        assert_eq!(r.metadata().get("test"), Some(&SettingsValue::Bool(true)));
        assert!(r.created_at() <= SystemTime::now());
    }
}
