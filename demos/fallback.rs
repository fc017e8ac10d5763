//! # Example: fallback
//!
//! Runs one check over the bundled providers. VendorA is misconfigured (empty API key), VendorB
//! may fail its SDK initialization, and the Mock provider always succeeds, so the run falls
//! back until one of them completes.
//!
//! ## Flow
//! ```text
//! Orchestrator::start()
//!   ├─► VendorA: configure → ConfigurationFailed("Invalid API key")
//!   │     └─► Failed(ProviderSpecific(VendorA, -1)), backoff
//!   ├─► VendorB: configure (10% init failure) → 5 guided steps → Completed
//!   └─► Mock: only reached when VendorB failed
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example fallback --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use livenessvisor::{
    AdapterRegistry, Environment, LivenessEvent, LogWriter, Orchestrator, PresentationHandle,
    ProviderConfig, Surface, VendorAAdapter, VendorBAdapter,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Environment: bundled providers, stdout logger
    let env = Environment::new(AdapterRegistry::with_defaults());
    let sink = LogWriter::sink();
    let env = env.with_logger(move |line| sink(line));

    // 2. Queue in fallback order
    let orchestrator = Orchestrator::builder(env)
        .push(VendorAAdapter::config(""))
        .push(VendorBAdapter::config("client", "secret").with_setting("step_interval_ms", 300))
        .push(
            ProviderConfig::new("Mock", Duration::from_secs(5))
                .with_setting("simulated_delay_ms", 500),
        )
        .build();

    // 3. Run against a surface we own
    let surface = Arc::new(Surface::new("demo"));
    let mut events = orchestrator.start(PresentationHandle::new(&surface)).await;
    while let Some(event) = events.next().await {
        match event {
            LivenessEvent::Started => println!("-> started"),
            LivenessEvent::Progress(p) => println!("-> progress {:>3.0}%", p * 100.0),
            LivenessEvent::InstructionChanged(text) => println!("-> {text}"),
            LivenessEvent::Completed(result) => println!(
                "-> completed by {} (confidence {:.2}, {} metadata entries)",
                result.provider(),
                result.confidence(),
                result.metadata().len()
            ),
            LivenessEvent::Failed(err) => println!("-> failed [{}]: {err}", err.as_label()),
        }
    }
    println!("final state: {:?}", orchestrator.state().await);

    orchestrator.dispose().await;
    Ok(())
}
