//! # Adapter factories.
//!
//! [`AdapterFactory`] maps a [`ProviderConfig`] to a **fresh** adapter instance. Unknown
//! provider identities yield `None`, so the orchestrator can skip and log instead of aborting
//! the run.
//!
//! [`AdapterRegistry`] is the standard implementation: a table of constructors keyed by
//! provider identity. The provider match happens once, when the adapter is created; nothing
//! downstream casts or re-checks the concrete type.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::time::Duration;
//! use livenessvisor::{
//!     AdapterFactory, AdapterRef, AdapterRegistry, MockAdapter, MockBehavior, ProviderConfig,
//! };
//!
//! let registry = AdapterRegistry::with_defaults().register("Flaky", |cfg: &ProviderConfig| {
//!     let behavior = MockBehavior::FailConfiguration("offline".into());
//!     Arc::new(MockAdapter::with_behavior(cfg.provider(), behavior)) as AdapterRef
//! });
//!
//! let cfg = ProviderConfig::new("Flaky", Duration::from_secs(1));
//! assert!(registry.create_adapter(&cfg).is_some());
//!
//! let unknown = ProviderConfig::new("Nope", Duration::from_secs(1));
//! assert!(registry.create_adapter(&unknown).is_none());
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::adapters::adapter::AdapterRef;
use crate::adapters::{MockAdapter, VendorAAdapter, VendorBAdapter};
use crate::config::ProviderConfig;

/// Creates adapters for queue entries.
pub trait AdapterFactory: Send + Sync + 'static {
    /// Returns a new adapter for `config`'s provider, or `None` if the provider is unknown.
    fn create_adapter(&self, config: &ProviderConfig) -> Option<AdapterRef>;

    /// Provider identities this factory can create (for diagnostics).
    fn providers(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Plain closures are factories.
impl<F> AdapterFactory for F
where
    F: Fn(&ProviderConfig) -> Option<AdapterRef> + Send + Sync + 'static,
{
    fn create_adapter(&self, config: &ProviderConfig) -> Option<AdapterRef> {
        (self)(config)
    }
}

type Constructor = Arc<dyn Fn(&ProviderConfig) -> AdapterRef + Send + Sync>;

/// Constructor table keyed by provider identity.
#[derive(Clone, Default)]
pub struct AdapterRegistry {
    constructors: HashMap<String, Constructor>,
}

impl AdapterRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the bundled providers: `Mock`, `VendorA`, `VendorB`.
    pub fn with_defaults() -> Self {
        Self::new()
            .register(MockAdapter::PROVIDER, |cfg: &ProviderConfig| {
                Arc::new(MockAdapter::new(cfg.provider())) as AdapterRef
            })
            .register(VendorAAdapter::PROVIDER, |_cfg: &ProviderConfig| {
                Arc::new(VendorAAdapter::new()) as AdapterRef
            })
            .register(VendorBAdapter::PROVIDER, |_cfg: &ProviderConfig| {
                Arc::new(VendorBAdapter::new()) as AdapterRef
            })
    }

    /// Registers (or replaces) the constructor for `provider`.
    pub fn register<F>(mut self, provider: impl Into<String>, constructor: F) -> Self
    where
        F: Fn(&ProviderConfig) -> AdapterRef + Send + Sync + 'static,
    {
        self.insert(provider, constructor);
        self
    }

    /// Non-builder form of [`register`](Self::register).
    pub fn insert<F>(&mut self, provider: impl Into<String>, constructor: F)
    where
        F: Fn(&ProviderConfig) -> AdapterRef + Send + Sync + 'static,
    {
        self.constructors
            .insert(provider.into(), Arc::new(constructor));
    }

    pub fn contains(&self, provider: &str) -> bool {
        self.constructors.contains_key(provider)
    }
}

impl AdapterFactory for AdapterRegistry {
    fn create_adapter(&self, config: &ProviderConfig) -> Option<AdapterRef> {
        self.constructors
            .get(config.provider())
            .map(|constructor| constructor(config))
    }

    fn providers(&self) -> Vec<String> {
        let mut names: Vec<String> = self.constructors.keys().cloned().collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for AdapterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("providers", &self.providers())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn defaults_cover_bundled_providers() {
        let registry = AdapterRegistry::with_defaults();
        assert_eq!(registry.providers(), vec!["Mock", "VendorA", "VendorB"]);
    }

    #[test]
    fn every_call_creates_a_fresh_instance() {
        let registry = AdapterRegistry::with_defaults();
        let cfg = ProviderConfig::new("Mock", Duration::from_secs(1));
        let a = registry.create_adapter(&cfg).unwrap();
        let b = registry.create_adapter(&cfg).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a.provider(), "Mock");
    }

    #[test]
    fn closures_are_factories() {
        let factory = |_cfg: &ProviderConfig| -> Option<AdapterRef> { None };
        let cfg = ProviderConfig::new("Any", Duration::from_secs(1));
        assert!(factory.create_adapter(&cfg).is_none());
    }
}
