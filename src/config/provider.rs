//! # Per-provider attempt configuration.
//!
//! A [`ProviderConfig`] describes one entry of the orchestrator queue: which provider to try,
//! how long its check may run, and provider-specific settings (credentials, tuning knobs).
//!
//! ## Rules
//! - `provider` is the dispatch tag: the [`AdapterFactory`](crate::AdapterFactory) matches on it.
//! - `timeout` bounds the **check** phase only; configuration has its own fixed deadline
//!   ([`OrchestratorConfig::configure_timeout`](crate::OrchestratorConfig::configure_timeout)).
//! - Values are read-only once handed to the orchestrator.

use std::time::Duration;

use crate::config::settings::{Settings, SettingsValue};
use crate::error::LivenessError;

/// Immutable description of one provider attempt.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use livenessvisor::ProviderConfig;
///
/// let cfg = ProviderConfig::new("VendorA", Duration::from_secs(30))
///     .with_setting("api_key", "secret");
///
/// assert_eq!(cfg.provider(), "VendorA");
/// assert_eq!(cfg.str_setting("api_key"), Some("secret"));
/// assert!(cfg.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderConfig {
    provider: String,
    timeout: Duration,
    settings: Settings,
}

impl ProviderConfig {
    /// Creates a configuration with empty settings.
    pub fn new(provider: impl Into<String>, timeout: Duration) -> Self {
        Self {
            provider: provider.into(),
            timeout,
            settings: Settings::new(),
        }
    }

    /// Returns a new config with `key` set to `value`.
    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<SettingsValue>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }

    /// Returns a new config with the settings map replaced.
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Returns a new config with an updated check timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Provider identity (dispatch tag).
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// Deadline for the check phase of this attempt.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn setting(&self, key: &str) -> Option<&SettingsValue> {
        self.settings.get(key)
    }

    /// Convenience: string setting lookup.
    pub fn str_setting(&self, key: &str) -> Option<&str> {
        self.setting(key).and_then(SettingsValue::as_str)
    }

    /// Checks the structural invariants: non-empty provider, non-zero timeout.
    ///
    /// Provider-specific requirements (credentials) are validated by the adapter itself.
    pub fn validate(&self) -> Result<(), LivenessError> {
        if self.provider.trim().is_empty() {
            return Err(LivenessError::configuration("provider identity is empty"));
        }
        if self.timeout.is_zero() {
            return Err(LivenessError::configuration(format!(
                "timeout for {} must be greater than zero",
                self.provider
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_provider() {
        let cfg = ProviderConfig::new("  ", Duration::from_secs(1));
        assert!(matches!(
            cfg.validate(),
            Err(LivenessError::ConfigurationFailed { .. })
        ));
    }

    #[test]
    fn rejects_zero_timeout() {
        let cfg = ProviderConfig::new("Mock", Duration::ZERO);
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn settings_replace_previous_values() {
        let cfg = ProviderConfig::new("Mock", Duration::from_secs(1))
            .with_setting("simulated_delay_ms", 10)
            .with_setting("simulated_delay_ms", 20);
        assert_eq!(
            cfg.setting("simulated_delay_ms").and_then(SettingsValue::as_int),
            Some(20)
        );
        assert_eq!(cfg.str_setting("simulated_delay_ms"), None);
    }
}
