//! Inter-attempt delay policies.
//!
//! These knobs control **how long** the orchestrator waits after a failed provider attempt
//! before trying the next one.
//!
//! ## Contents
//! - [`BackoffPolicy`] how the delay evolves across failures (first / factor / max + jitter)
//! - [`JitterPolicy`]  randomization applied to the computed delay
//!
//! ## Defaults
//! - `BackoffPolicy::default()` → first=500ms, factor=1.0 (constant), max=30s, jitter=None.

mod backoff;
mod jitter;

pub use backoff::BackoffPolicy;
pub use jitter::JitterPolicy;
