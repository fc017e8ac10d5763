use crate::config::{OrchestratorConfig, ProviderConfig};
use crate::core::orchestrator::Orchestrator;
use crate::environment::Environment;

/// Builder for an [`Orchestrator`].
///
/// ```rust
/// use std::time::Duration;
/// use livenessvisor::{
///     AdapterRegistry, BackoffPolicy, Environment, Orchestrator, OrchestratorConfig,
///     ProviderConfig,
/// };
///
/// let mut cfg = OrchestratorConfig::default();
/// cfg.backoff = BackoffPolicy::none();
///
/// let orchestrator = Orchestrator::builder(Environment::new(AdapterRegistry::with_defaults()))
///     .with_queue(vec![ProviderConfig::new("Mock", Duration::from_secs(5))])
///     .with_config(cfg)
///     .build();
/// assert_eq!(orchestrator.config().backoff.next(3), Duration::ZERO);
/// ```
#[derive(Debug)]
pub struct OrchestratorBuilder {
    env: Environment,
    cfg: OrchestratorConfig,
    queue: Vec<ProviderConfig>,
}

impl OrchestratorBuilder {
    /// Creates a builder with an empty queue and the default configuration.
    pub fn new(env: Environment) -> Self {
        Self {
            env,
            cfg: OrchestratorConfig::default(),
            queue: Vec::new(),
        }
    }

    /// Sets the provider queue, in fallback order.
    pub fn with_queue(mut self, queue: Vec<ProviderConfig>) -> Self {
        self.queue = queue;
        self
    }

    /// Appends one provider to the queue.
    pub fn push(mut self, config: ProviderConfig) -> Self {
        self.queue.push(config);
        self
    }

    pub fn with_config(mut self, cfg: OrchestratorConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn build(self) -> Orchestrator {
        Orchestrator::from_parts(self.env, self.cfg, self.queue)
    }
}
