//! # Provider adapter capability.
//!
//! [`ProviderAdapter`] is the surface the orchestrator drives. It never inspects the concrete
//! type behind an [`AdapterRef`]; everything goes through these five operations.
//!
//! ## Lifecycle
//! ```text
//! Unconfigured ──configure()──► Configured ──start_check()──► Running
//!      ▲                            │                            │
//!      └──────────── reset() ───────┴────────────────────────────┘
//!
//! any state ──dispose()──► Terminated (not reusable)
//! ```
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use livenessvisor::{
//!     AdapterCore, EventStream, LivenessError, LivenessEvent, LivenessResult,
//!     PresentationHandle, ProviderAdapter, ProviderConfig,
//! };
//!
//! struct Instant { core: AdapterCore }
//!
//! #[async_trait]
//! impl ProviderAdapter for Instant {
//!     fn provider(&self) -> &str { self.core.provider() }
//!
//!     async fn configure(&self, _config: &ProviderConfig) -> Result<(), LivenessError> {
//!         self.core.accept_configuration()
//!     }
//!
//!     async fn start_check(&self, ctx: PresentationHandle) -> Result<EventStream, LivenessError> {
//!         let provider = self.core.provider().to_owned();
//!         self.core.start_session(ctx, move |session| async move {
//!             let _ = session.emit(LivenessEvent::Started).await;
//!             session.conclude(Ok(LivenessResult::new(provider, 0.9))).await;
//!         })
//!     }
//!
//!     async fn reset(&self) { self.core.reset() }
//!     async fn dispose(&self) { self.core.terminate() }
//!     fn is_configured(&self) -> bool { self.core.is_configured() }
//! }
//! ```

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::ProviderConfig;
use crate::error::LivenessError;
use crate::events::EventStream;
use crate::presentation::PresentationHandle;

/// Shared handle to a provider adapter.
pub type AdapterRef = Arc<dyn ProviderAdapter>;

/// # Capability every provider implementation satisfies.
///
/// Implementations use interior mutability: the orchestrator holds adapters as
/// [`AdapterRef`] and calls every operation through `&self`.
#[async_trait]
pub trait ProviderAdapter: Send + Sync + 'static {
    /// Provider identity this adapter serves.
    fn provider(&self) -> &str;

    /// Validates and applies `config`.
    ///
    /// Fails with [`LivenessError::ConfigurationFailed`] on invalid input. Calling it again
    /// replaces the previous settings. May perform asynchronous initialization.
    async fn configure(&self, config: &ProviderConfig) -> Result<(), LivenessError>;

    /// Starts a check session against `context`.
    ///
    /// Requires a configured adapter, otherwise [`LivenessError::InvalidState`]. The returned
    /// stream conventionally starts with `Started` and ends with exactly one `Completed` or
    /// `Failed`, or ends silently when cancelled from outside.
    async fn start_check(&self, context: PresentationHandle) -> Result<EventStream, LivenessError>;

    /// Returns to an unconfigured state, drops the session context and cancels any
    /// in-flight internal task.
    async fn reset(&self);

    /// Resets, then releases all resources. The adapter is not reusable afterwards.
    async fn dispose(&self);

    /// Non-blocking configuration query.
    fn is_configured(&self) -> bool;
}
