//! Liveness events and event sequences.
//!
//! ## Contents
//! - [`LivenessEvent`], [`LivenessResult`] the event data model
//! - [`EventStream`], [`EventSender`] the cancellable, single-consumer sequence carrying events
//!
//! ## Quick reference
//! - **Producers**: adapter sessions (via [`AdapterCore`](crate::AdapterCore)) and the
//!   orchestrator run loop.
//! - **Consumers**: the orchestrator (adapter streams) and the caller (run stream).

mod event;
mod stream;

pub use event::{LivenessEvent, LivenessResult};
pub use stream::{EventSender, EventStream};
