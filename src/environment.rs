//! # Dependency bundle for an orchestrator.
//!
//! [`Environment`] carries the [`AdapterFactory`] and an optional log sink. It is built once
//! by the caller and handed to [`Orchestrator::builder`](crate::Orchestrator::builder).
//!
//! The sink is best-effort and fire-and-forget: it is called inline with a formatted message
//! and never influences the run. Structured diagnostics are emitted separately through
//! `tracing`; [`Environment::with_tracing`] routes the sink into `tracing` as well.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use livenessvisor::{AdapterRegistry, Environment};
//!
//! let lines = Arc::new(Mutex::new(Vec::<String>::new()));
//! let sink = Arc::clone(&lines);
//! let env = Environment::new(AdapterRegistry::with_defaults())
//!     .with_logger(move |msg| sink.lock().unwrap().push(msg.to_owned()));
//!
//! env.log("hello");
//! assert_eq!(lines.lock().unwrap().as_slice(), ["hello"]);
//! ```

use std::fmt;
use std::sync::Arc;

use crate::adapters::AdapterFactory;

/// Log sink: receives one formatted line per call.
pub type LogSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Factory plus optional logger.
#[derive(Clone)]
pub struct Environment {
    factory: Arc<dyn AdapterFactory>,
    logger: Option<LogSink>,
}

impl Environment {
    /// Creates an environment without a logger.
    pub fn new<F: AdapterFactory>(factory: F) -> Self {
        Self::from_arc(Arc::new(factory))
    }

    /// Creates an environment from a shared factory.
    pub fn from_arc(factory: Arc<dyn AdapterFactory>) -> Self {
        Self {
            factory,
            logger: None,
        }
    }

    /// Installs `sink` as the logger.
    pub fn with_logger(mut self, sink: impl Fn(&str) + Send + Sync + 'static) -> Self {
        self.logger = Some(Arc::new(sink));
        self
    }

    /// Installs a logger that forwards every line to `tracing::info!`.
    pub fn with_tracing(self) -> Self {
        self.with_logger(|msg| tracing::info!(target: "livenessvisor", "{msg}"))
    }

    pub fn factory(&self) -> &dyn AdapterFactory {
        self.factory.as_ref()
    }

    pub fn has_logger(&self) -> bool {
        self.logger.is_some()
    }

    /// Sends `message` to the sink, if any.
    pub fn log(&self, message: &str) {
        if let Some(sink) = &self.logger {
            sink(message);
        }
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("providers", &self.factory.providers())
            .field("logger", &self.logger.is_some())
            .finish()
    }
}

/// Stdout log sink (demo/reference only).
///
/// ## Example output
/// ```text
/// [Orchestrator] Attempting provider: VendorA
/// [Orchestrator] Configuration failed for VendorA: configuration failed: Invalid API key
/// [Orchestrator] Attempting provider: Mock
/// [Orchestrator] Liveness check completed by Mock
/// ```
#[cfg(feature = "logging")]
#[derive(Default, Debug)]
pub struct LogWriter;

#[cfg(feature = "logging")]
impl LogWriter {
    /// Returns a sink printing each line to stdout.
    #[must_use]
    pub fn sink() -> LogSink {
        Arc::new(|msg: &str| println!("{msg}"))
    }
}
