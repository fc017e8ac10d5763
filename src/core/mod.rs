//! Runtime core: fallback orchestration.
//!
//! The only entry points from this module are [`Orchestrator`] (with its builder and
//! [`RunState`]) and the [`race()`] primitive it is built on.
//!
//! Internal modules:
//! - `orchestrator`: walks the provider queue, relays events, handles reset/dispose;
//! - `race`: runs one future against a deadline and a cancellation token;
//! - `builder`: assembles environment, queue and configuration;
//! - `state`: observable run phase.

mod builder;
mod orchestrator;
mod race;
mod state;

pub use builder::OrchestratorBuilder;
pub use orchestrator::Orchestrator;
pub use race::race;
pub use state::RunState;
