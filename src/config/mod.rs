//! Configuration values.
//!
//! ## Contents
//! - [`ProviderConfig`] one queue entry (provider identity, check timeout, settings)
//! - [`SettingsValue`], [`Settings`] closed value type for settings and result metadata
//! - [`OrchestratorConfig`] provider-independent runtime knobs

mod provider;
mod runtime;
mod settings;

pub use provider::ProviderConfig;
pub use runtime::OrchestratorConfig;
pub use settings::{Settings, SettingsValue};
