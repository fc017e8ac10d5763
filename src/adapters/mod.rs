//! Provider adapters and their factories.
//!
//! ## Contents
//! - [`ProviderAdapter`], [`AdapterRef`] the capability the orchestrator drives
//! - [`AdapterCore`], [`AdapterState`], [`Session`] shared state machine and session helpers
//! - [`AdapterFactory`], [`AdapterRegistry`] mapping queue entries to fresh adapters
//! - [`MockAdapter`], [`VendorAAdapter`], [`VendorBAdapter`] bundled reference providers

mod adapter;
mod core;
mod factory;
mod mock;
mod vendor_a;
mod vendor_b;

pub use adapter::{AdapterRef, ProviderAdapter};
pub use self::core::{AdapterCore, AdapterState, Session};
pub use factory::{AdapterFactory, AdapterRegistry};
pub use mock::{MockAdapter, MockBehavior, MockProbe};
pub use vendor_a::VendorAAdapter;
pub use vendor_b::VendorBAdapter;
