//! # Example: custom_provider
//!
//! Plugs a hand-written provider into the registry. The provider walks three steps and then
//! completes; it is placed behind a hanging Mock so the run shows a timeout first.
//!
//! ## Run
//! ```bash
//! cargo run --example custom_provider
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use livenessvisor::{
    AdapterCore, AdapterRef, AdapterRegistry, Environment, EventStream, LivenessError,
    LivenessEvent, LivenessResult, MockAdapter, MockBehavior, Orchestrator, PresentationHandle,
    ProviderAdapter, ProviderConfig, Session, Surface,
};

/// Three-step provider that never fails.
struct Blink {
    core: AdapterCore,
}

#[async_trait]
impl ProviderAdapter for Blink {
    fn provider(&self) -> &str {
        self.core.provider()
    }

    async fn configure(&self, _config: &ProviderConfig) -> Result<(), LivenessError> {
        self.core.accept_configuration()
    }

    async fn start_check(&self, context: PresentationHandle) -> Result<EventStream, LivenessError> {
        let provider = self.core.provider().to_owned();
        self.core.start_session(context, move |session| async move {
            let outcome = blink(&session, provider).await;
            session.conclude(outcome).await;
        })
    }

    async fn reset(&self) {
        self.core.reset();
    }

    async fn dispose(&self) {
        self.core.terminate();
    }

    fn is_configured(&self) -> bool {
        self.core.is_configured()
    }
}

async fn blink(session: &Session, provider: String) -> Result<LivenessResult, LivenessError> {
    session.emit(LivenessEvent::Started).await?;
    for (i, text) in ["Look up", "Blink", "Hold still"].into_iter().enumerate() {
        session.pause(Duration::from_millis(200)).await?;
        session.checkpoint()?;
        session.emit(LivenessEvent::instruction(text)).await?;
        session
            .emit(LivenessEvent::progress((i + 1) as f64 / 3.0))
            .await?;
    }
    Ok(LivenessResult::new(provider, 0.97).with_metadata("steps", 3))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let registry = AdapterRegistry::new()
        .register("Stuck", |cfg: &ProviderConfig| {
            Arc::new(MockAdapter::with_behavior(cfg.provider(), MockBehavior::Hang)) as AdapterRef
        })
        .register("Blink", |cfg: &ProviderConfig| {
            Arc::new(Blink {
                core: AdapterCore::new(cfg.provider()),
            }) as AdapterRef
        });

    let env = Environment::new(registry).with_tracing();
    let orchestrator = Orchestrator::new(
        env,
        vec![
            ProviderConfig::new("Stuck", Duration::from_millis(300)),
            ProviderConfig::new("Blink", Duration::from_secs(5)),
        ],
    );

    let surface = Arc::new(Surface::new("demo"));
    let mut events = orchestrator.start(PresentationHandle::new(&surface)).await;
    while let Some(event) = events.next().await {
        println!("{:<20} {event:?}", event.as_label());
    }

    orchestrator.dispose().await;
    Ok(())
}
