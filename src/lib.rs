//! # livenessvisor
//!
//! **Livenessvisor** runs a liveness check ("is a live human in front of the camera?") against
//! an ordered list of interchangeable providers, falling back to the next one whenever a
//! provider fails to configure, fails its check or runs out of time.
//!
//! Callers see a single event stream per check and never know which provider produced it.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   ProviderConfig[0]   ProviderConfig[1]   ProviderConfig[2]      (queue, fallback order)
//!          │                   │                   │
//!          ▼                   ▼                   ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Orchestrator                                                     │
//! │  - Environment (AdapterFactory + optional log sink)               │
//! │  - OrchestratorConfig (configure deadline, backoff, capacity)     │
//! │  - State (queue, index, adapters, presentation, RunState)         │
//! └──────┬────────────────────────────────────────────────────────────┘
//!        │ one attempt at a time
//!        ▼
//!   factory.create_adapter(cfg) ──► Arc<dyn ProviderAdapter>
//!        │
//!        ├─► race(configure, configure_timeout)
//!        ├─► start_check(PresentationHandle) ──► adapter EventStream
//!        └─► race(relay, cfg.timeout) ─────────────────┐
//!                                                      ▼
//!                              ┌──────────────────────────────────────┐
//!                              │ run EventStream (futures::Stream)     │
//!                              │ Started, Progress, InstructionChanged │
//!                              │ Failed (per provider), Completed      │
//!                              │ Failed (terminal)                     │
//!                              └──────────────────────────────────────┘
//! ```
//!
//! ### Lifecycle
//! ```text
//! start(ctx) ──► Idle ──► Attempting(0) ──► Attempting(1) ──► …
//!                              │                  │
//!                              ├─ Completed ──────┴──► Succeeded
//!                              ├─ ctx gone ───────────► ContextLost
//!                              ├─ stream dropped ─────► Cancelled
//!                              └─ queue exhausted ────► Exhausted + Failed(NoAvailableProvider)
//!
//! reset()   ──► cancel run, reset adapters, index = 0
//! dispose() ──► cancel run, dispose adapters, Disposed (idempotent)
//! ```
//!
//! ## Features
//! | Area              | Description                                                   | Key types / traits                              |
//! |-------------------|---------------------------------------------------------------|-------------------------------------------------|
//! | **Orchestration** | Ordered fallback, timeouts, cancellation, reset/dispose.      | [`Orchestrator`], [`RunState`]                  |
//! | **Adapters**      | Provider contract and shared state machine.                   | [`ProviderAdapter`], [`AdapterCore`]            |
//! | **Factories**     | Map queue entries to fresh adapters.                          | [`AdapterFactory`], [`AdapterRegistry`]         |
//! | **Events**        | Cancellable single-consumer event sequences.                  | [`EventStream`], [`LivenessEvent`]              |
//! | **Errors**        | Closed error taxonomy.                                        | [`LivenessError`], [`RaceError`]                |
//! | **Configuration** | Per-provider entries and runtime knobs.                       | [`ProviderConfig`], [`OrchestratorConfig`]      |
//! | **Policies**      | Delay between provider attempts.                              | [`BackoffPolicy`], [`JitterPolicy`]             |
//! | **Primitives**    | Deadline race with cancellation.                              | [`race()`]                                      |
//!
//! ## Optional features
//! - `logging`: exports a simple stdout [`LogWriter`] sink _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use futures::StreamExt;
//! use livenessvisor::{
//!     AdapterRegistry, Environment, LivenessEvent, Orchestrator, PresentationHandle,
//!     ProviderConfig, Surface, VendorAAdapter,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let env = Environment::new(AdapterRegistry::with_defaults())
//!         .with_logger(|line| eprintln!("{line}"));
//!
//!     let orchestrator = Orchestrator::builder(env)
//!         .push(VendorAAdapter::config("")) // empty key: configuration fails
//!         .push(
//!             ProviderConfig::new("Mock", Duration::from_secs(5))
//!                 .with_setting("simulated_delay_ms", 20),
//!         )
//!         .build();
//!
//!     let surface = Arc::new(Surface::new("main"));
//!     let mut events = orchestrator.start(PresentationHandle::new(&surface)).await;
//!     while let Some(event) = events.next().await {
//!         if let LivenessEvent::Completed(result) = &event {
//!             assert_eq!(result.provider(), "Mock");
//!         }
//!     }
//!
//!     orchestrator.dispose().await;
//!     Ok(())
//! }
//! ```

mod adapters;
mod config;
mod core;
mod environment;
mod error;
mod events;
mod policies;
mod presentation;

// ---- Public re-exports ----

pub use adapters::{
    AdapterCore, AdapterFactory, AdapterRef, AdapterRegistry, AdapterState, MockAdapter,
    MockBehavior, MockProbe, ProviderAdapter, Session, VendorAAdapter, VendorBAdapter,
};
pub use config::{OrchestratorConfig, ProviderConfig, Settings, SettingsValue};
pub use crate::core::{race, Orchestrator, OrchestratorBuilder, RunState};
pub use environment::{Environment, LogSink};
pub use error::{LivenessError, RaceError};
pub use events::{EventSender, EventStream, LivenessEvent, LivenessResult};
pub use policies::{BackoffPolicy, JitterPolicy};
pub use presentation::{Presentation, PresentationHandle, Surface};

// Optional: expose a simple stdout log sink (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use environment::LogWriter;
