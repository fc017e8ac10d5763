//! # Orchestrator: ordered fallback across providers.
//!
//! The [`Orchestrator`] owns a queue of [`ProviderConfig`]s and, per run, tries them strictly in
//! order until one completes a check. It is itself the single outward source of events: every
//! run is one [`EventStream`] carrying the active provider's events plus one `Failed` per
//! abandoned provider and, when nothing succeeded, one terminal `Failed`.
//!
//! ## Run loop
//! ```text
//! start(ctx) ──► spawn run task (token = lifetime.child_token())
//!
//! loop over queue (forward-only cursor) {
//!   ├─► factory.create_adapter(cfg)     None  → log, next (no event, no backoff)
//!   ├─► race(configure, configure_timeout)
//!   │       error / deadline            → Failed(ProviderSpecific), backoff, next
//!   ├─► ctx.is_live()?                  no    → Failed(ContextLost), stop
//!   ├─► start_check(ctx)                error → Failed(ProviderSpecific), backoff, next
//!   └─► race(relay adapter stream, cfg.timeout)
//!           Completed                   → run succeeded
//!           Failed(ContextLost)         → Failed(ContextLost), stop
//!           deadline                    → Failed(Timeout), backoff, next
//!           stream ended                → Failed(ProviderSpecific), backoff, next
//!       adapter stream shut down before moving on
//! }
//! queue exhausted → Failed(NoAvailableProvider)
//! ```
//!
//! ## Rules
//! - Attempts are **sequential**; the previous adapter's session task has stopped (or was
//!   aborted after `grace`) before the next provider is created.
//! - Per-attempt failures are reported once: an adapter that already emitted its own `Failed`
//!   gets no extra summary event.
//! - A `Completed` observed together with the provider deadline wins.
//! - A dead presentation context stops the run after any failed attempt; no further adapter is
//!   created against it.
//! - Dropping or cancelling the run stream cancels the run; an explicit `cancel()` is answered
//!   with a final `Failed(Cancelled)`.
//! - One active run per orchestrator: `start` cancels and awaits the previous run.
//! - State lives behind one async mutex, locked only for short bookkeeping steps.
//!
//! ## Example
//! ```rust
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! use std::sync::Arc;
//! use std::time::Duration;
//! use livenessvisor::{
//!     AdapterRegistry, Environment, Orchestrator, PresentationHandle, ProviderConfig, Surface,
//! };
//!
//! let env = Environment::new(AdapterRegistry::with_defaults());
//! let orchestrator = Orchestrator::builder(env)
//!     .with_queue(vec![
//!         ProviderConfig::new("VendorA", Duration::from_secs(30)), // no api_key: fails
//!         ProviderConfig::new("Mock", Duration::from_secs(5))
//!             .with_setting("simulated_delay_ms", 10),
//!     ])
//!     .build();
//!
//! let surface = Arc::new(Surface::new("main"));
//! let result = orchestrator
//!     .perform_check(PresentationHandle::new(&surface))
//!     .await
//!     .unwrap();
//! assert_eq!(result.provider(), "Mock");
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use futures::{FutureExt, StreamExt};
use tokio::sync::{Mutex, MutexGuard};
use tokio::{select, task, time};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::adapters::AdapterRef;
use crate::config::{OrchestratorConfig, ProviderConfig};
use crate::core::builder::OrchestratorBuilder;
use crate::core::race::race;
use crate::core::state::RunState;
use crate::environment::Environment;
use crate::error::{LivenessError, RaceError};
use crate::events::{EventSender, EventStream, LivenessEvent, LivenessResult};
use crate::presentation::PresentationHandle;

/// `configure` returned an error, or the configuration itself is invalid.
const CODE_CONFIGURE: i32 = -1;
/// `configure` did not finish before the configuration deadline.
const CODE_CONFIGURE_DEADLINE: i32 = -2;
/// The adapter stream ended without `Completed` or `Failed`.
const CODE_STREAM_ENDED: i32 = -3;
/// `start_check` was rejected.
const CODE_START_REJECTED: i32 = -4;

/// Composite liveness check over an ordered provider queue.
///
/// Cheap to share behind an `Arc`; every method takes `&self`.
pub struct Orchestrator {
    inner: Arc<Inner>,
}

struct Inner {
    env: Environment,
    cfg: OrchestratorConfig,
    state: Mutex<State>,
    lifetime: CancellationToken,
}

struct State {
    queue: Vec<ProviderConfig>,
    index: usize,
    adapters: Vec<AdapterRef>,
    presentation: Option<PresentationHandle>,
    phase: RunState,
    active: Option<ActiveRun>,
    /// Bumped by every start/reset/dispose; a run only records its phase while current.
    generation: u64,
    disposed: bool,
}

struct ActiveRun {
    token: CancellationToken,
    done: CancellationToken,
}

impl ActiveRun {
    /// Cancels the run and waits up to `grace` for its task to finish.
    async fn stop(self, grace: Duration) {
        self.token.cancel();
        if time::timeout(grace, self.done.cancelled()).await.is_err() {
            warn!(grace_ms = grace.as_millis() as u64, "previous run did not stop within grace");
        }
    }
}

/// How one queue entry ended.
enum Attempt {
    Completed,
    /// No adapter for this provider.
    Skipped,
    /// Per-provider failure; `None` when the adapter already reported it on the stream.
    Failed(Option<LivenessError>),
    ContextLost,
    Cancelled,
}

/// How a whole run ended.
enum RunOutcome {
    Succeeded(String),
    Exhausted,
    ContextLost,
    Cancelled,
}

impl Orchestrator {
    /// Creates an orchestrator with the default [`OrchestratorConfig`].
    pub fn new(env: Environment, queue: Vec<ProviderConfig>) -> Self {
        Self::builder(env).with_queue(queue).build()
    }

    /// Returns a builder for an orchestrator over `env`.
    pub fn builder(env: Environment) -> OrchestratorBuilder {
        OrchestratorBuilder::new(env)
    }

    pub(crate) fn from_parts(
        env: Environment,
        cfg: OrchestratorConfig,
        queue: Vec<ProviderConfig>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                env,
                cfg,
                state: Mutex::new(State {
                    queue,
                    index: 0,
                    adapters: Vec::new(),
                    presentation: None,
                    phase: RunState::Idle,
                    active: None,
                    generation: 0,
                    disposed: false,
                }),
                lifetime: CancellationToken::new(),
            }),
        }
    }

    /// Starts a run against `context` and returns its event stream.
    ///
    /// A run already in flight is cancelled first. On a disposed orchestrator the stream
    /// holds a single `Failed(InvalidState)`.
    pub async fn start(&self, context: PresentationHandle) -> EventStream {
        let previous = {
            let mut st = self.inner.state.lock().await;
            if st.disposed {
                return disposed_stream();
            }
            st.active.take()
        };
        if let Some(previous) = previous {
            previous.stop(self.inner.cfg.grace).await;
        }

        let run = self.inner.lifetime.child_token();
        let done = CancellationToken::new();
        let generation = {
            let mut st = self.inner.state.lock().await;
            if st.disposed {
                return disposed_stream();
            }
            let next = ActiveRun {
                token: run.clone(),
                done: done.clone(),
            };
            if let Some(racing) = st.active.replace(next) {
                racing.token.cancel();
            }
            st.generation += 1;
            st.presentation = Some(context);
            st.index = 0;
            st.phase = RunState::Idle;
            st.generation
        };

        let inner = Arc::clone(&self.inner);
        EventStream::spawn(self.inner.cfg.event_capacity_clamped(), run, move |tx| async move {
            let _done = done.drop_guard();
            inner.drive(tx, generation).await;
        })
    }

    /// Runs a check to its end and returns the first result, or the run's terminal error.
    pub async fn perform_check(
        &self,
        context: PresentationHandle,
    ) -> Result<LivenessResult, LivenessError> {
        self.start(context).await.into_result().await
    }

    /// Cancels the active run, resets every adapter created so far and rewinds the queue.
    ///
    /// The queue itself is kept; the presentation context is dropped.
    pub async fn reset(&self) {
        let (active, adapters) = {
            let mut st = self.inner.state.lock().await;
            st.generation += 1;
            st.index = 0;
            st.presentation = None;
            if !st.disposed {
                st.phase = RunState::Idle;
            }
            (st.active.take(), st.adapters.clone())
        };
        if let Some(active) = active {
            active.stop(self.inner.cfg.grace).await;
        }
        for adapter in &adapters {
            adapter.reset().await;
        }
        self.inner.log("Reset");
        debug!(adapters = adapters.len(), "orchestrator reset");
    }

    /// Tears the orchestrator down. Idempotent.
    ///
    /// Cancels any run in flight, then disposes and drops every adapter.
    pub async fn dispose(&self) {
        let (active, adapters) = {
            let mut st = self.inner.state.lock().await;
            if st.disposed {
                return;
            }
            st.disposed = true;
            st.generation += 1;
            st.index = 0;
            st.presentation = None;
            st.phase = RunState::Disposed;
            (st.active.take(), std::mem::take(&mut st.adapters))
        };
        self.inner.lifetime.cancel();
        if let Some(active) = active {
            active.stop(self.inner.cfg.grace).await;
        }
        for adapter in &adapters {
            adapter.dispose().await;
        }
        self.inner.log("Disposed");
        info!(adapters = adapters.len(), "orchestrator disposed");
    }

    /// Replaces the queue and rewinds the index.
    ///
    /// A run in flight sees the new queue from its next step on; its cursor keeps moving
    /// forward.
    pub async fn update_queue(&self, queue: Vec<ProviderConfig>) {
        let mut st = self.inner.state.lock().await;
        debug!(len = queue.len(), "queue updated");
        st.queue = queue;
        st.index = 0;
    }

    pub async fn state(&self) -> RunState {
        self.inner.state.lock().await.phase
    }

    /// Index of the queue entry most recently attempted.
    pub async fn index(&self) -> usize {
        self.inner.state.lock().await.index
    }

    /// Number of adapters instantiated and not yet disposed.
    pub async fn adapter_count(&self) -> usize {
        self.inner.state.lock().await.adapters.len()
    }

    pub async fn queue(&self) -> Vec<ProviderConfig> {
        self.inner.state.lock().await.queue.clone()
    }

    pub async fn is_disposed(&self) -> bool {
        self.inner.state.lock().await.disposed
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.inner.cfg
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("env", &self.inner.env)
            .field("cfg", &self.inner.cfg)
            .finish_non_exhaustive()
    }
}

fn disposed_stream() -> EventStream {
    EventStream::from_events([LivenessEvent::Failed(LivenessError::invalid_state(
        "orchestrator disposed",
    ))])
}

impl Inner {
    fn log(&self, message: &str) {
        self.env.log(&format!("[Orchestrator] {message}"));
    }

    async fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().await
    }

    /// Run task body: walks the queue, then reports the run's outcome.
    async fn drive(self: Arc<Self>, tx: EventSender, generation: u64) {
        let outcome = self.walk(&tx, generation).await;

        let phase = match &outcome {
            RunOutcome::Succeeded(_) => RunState::Succeeded,
            RunOutcome::Exhausted => RunState::Exhausted,
            RunOutcome::ContextLost => RunState::ContextLost,
            RunOutcome::Cancelled => RunState::Cancelled,
        };
        {
            let mut st = self.lock().await;
            if st.generation == generation {
                st.phase = phase;
            }
        }

        match outcome {
            RunOutcome::Succeeded(provider) => {
                self.log(&format!("Liveness check completed by {provider}"));
                info!(%provider, "run succeeded");
            }
            RunOutcome::Exhausted => {
                self.log("All providers failed");
                info!("run exhausted the provider queue");
                tx.send(LivenessEvent::Failed(LivenessError::NoAvailableProvider))
                    .await;
            }
            RunOutcome::ContextLost => {
                self.log("Presentation context lost");
                info!("run stopped: presentation context lost");
                tx.send(LivenessEvent::Failed(LivenessError::ContextLost))
                    .await;
            }
            RunOutcome::Cancelled => {
                debug!("run cancelled");
                tx.finish(LivenessEvent::Failed(LivenessError::Cancelled));
            }
        }
    }

    async fn walk(&self, tx: &EventSender, generation: u64) -> RunOutcome {
        let mut cursor = 0usize;
        let mut failures = 0u32;

        loop {
            if tx.is_cancelled() {
                return RunOutcome::Cancelled;
            }
            let config = {
                let mut st = self.lock().await;
                if st.generation != generation {
                    return RunOutcome::Cancelled;
                }
                let Some(config) = st.queue.get(cursor).cloned() else {
                    return RunOutcome::Exhausted;
                };
                st.index = cursor;
                st.phase = RunState::Attempting(cursor);
                config
            };

            match self.attempt(tx, &config, cursor).await {
                Attempt::Completed => return RunOutcome::Succeeded(config.provider().to_owned()),
                Attempt::ContextLost => return RunOutcome::ContextLost,
                Attempt::Cancelled => return RunOutcome::Cancelled,
                Attempt::Skipped => cursor += 1,
                Attempt::Failed(err) => {
                    if let Some(err) = err {
                        if !tx.send(LivenessEvent::Failed(err)).await {
                            return RunOutcome::Cancelled;
                        }
                    }
                    if tx.is_cancelled() {
                        return RunOutcome::Cancelled;
                    }
                    if !self.context_live().await {
                        return RunOutcome::ContextLost;
                    }
                    cursor += 1;

                    let more = self.lock().await.queue.len() > cursor;
                    if more {
                        let delay = self.cfg.backoff.next(failures);
                        failures = failures.saturating_add(1);
                        debug!(delay_ms = delay.as_millis() as u64, "backoff before next provider");
                        select! {
                            biased;
                            _ = tx.token().cancelled() => return RunOutcome::Cancelled,
                            _ = time::sleep(delay) => {}
                        }
                    }
                }
            }
        }
    }

    async fn context_live(&self) -> bool {
        self.lock()
            .await
            .presentation
            .as_ref()
            .is_some_and(PresentationHandle::is_live)
    }

    async fn attempt(&self, tx: &EventSender, config: &ProviderConfig, index: usize) -> Attempt {
        let provider = config.provider();
        self.log(&format!("Attempting provider: {provider}"));
        debug!(%provider, index, "attempting provider");

        let Some(adapter) = self.env.factory().create_adapter(config) else {
            self.log(&format!("Failed to create adapter for {provider}"));
            warn!(%provider, index, "no adapter for provider, skipping");
            return Attempt::Skipped;
        };
        self.lock().await.adapters.push(Arc::clone(&adapter));

        if let Err(outcome) = self.configure(&adapter, config, tx.token()).await {
            return outcome;
        }
        self.log(&format!("Successfully configured {provider}"));

        let context = self.lock().await.presentation.clone();
        let Some(context) = context.filter(PresentationHandle::is_live) else {
            warn!(%provider, index, "presentation context is gone");
            return Attempt::ContextLost;
        };

        let started = select! {
            biased;
            _ = tx.token().cancelled() => return Attempt::Cancelled,
            started = adapter.start_check(context) => started,
        };
        let stream = match started {
            Ok(stream) => stream,
            Err(LivenessError::ContextLost) => return Attempt::ContextLost,
            Err(err) => {
                self.log(&format!("Provider {provider} failed: {err}"));
                warn!(%provider, index, error = %err, "start_check rejected");
                return Attempt::Failed(Some(LivenessError::provider_specific(
                    provider,
                    CODE_START_REJECTED,
                    format!("Vendor failed: {err}"),
                )));
            }
        };

        self.relay(tx, stream, config, index).await
    }

    /// Races `configure` against the configuration deadline.
    async fn configure(
        &self,
        adapter: &AdapterRef,
        config: &ProviderConfig,
        token: &CancellationToken,
    ) -> Result<(), Attempt> {
        let provider = config.provider();
        let outcome = match config.validate() {
            Ok(()) => race(adapter.configure(config), self.cfg.configure_timeout, token).await,
            Err(err) => Ok(Err(err)),
        };

        let err = match outcome {
            Ok(Ok(())) => return Ok(()),
            Err(RaceError::Cancelled) => return Err(Attempt::Cancelled),
            Ok(Err(err)) => LivenessError::provider_specific(
                provider,
                CODE_CONFIGURE,
                format!("Vendor failed: {err}"),
            ),
            Err(RaceError::Elapsed(deadline)) => LivenessError::provider_specific(
                provider,
                CODE_CONFIGURE_DEADLINE,
                format!("Vendor failed: configuration did not finish within {deadline:?}"),
            ),
        };
        self.log(&format!("Configuration failed for {provider}: {err}"));
        warn!(%provider, error = %err, "configuration failed");
        Err(Attempt::Failed(Some(err)))
    }

    /// Forwards the adapter stream outward until it completes, ends or times out.
    ///
    /// The adapter stream is shut down before returning.
    async fn relay(
        &self,
        tx: &EventSender,
        mut stream: EventStream,
        config: &ProviderConfig,
        index: usize,
    ) -> Attempt {
        let provider = config.provider();
        let mut relay = Relay::default();
        let raced = race(relay.pump(&mut stream, tx), config.timeout(), tx.token()).await;
        if let Err(RaceError::Elapsed(_)) = raced {
            // The session task may have finished on the same tick as the deadline.
            task::yield_now().await;
            relay.drain(&mut stream, tx).await;
        }

        let outcome = if let Some(result) = relay.completed.take() {
            if relay.forwarded || tx.send(LivenessEvent::Completed(result)).await {
                Attempt::Completed
            } else {
                Attempt::Cancelled
            }
        } else if relay.closed || tx.is_cancelled() {
            Attempt::Cancelled
        } else {
            match raced {
                Err(RaceError::Cancelled) => Attempt::Cancelled,
                _ if relay.failed == Some(LivenessError::ContextLost) => {
                    warn!(%provider, index, "presentation context lost mid-check");
                    Attempt::ContextLost
                }
                _ if relay.failed.is_some() => {
                    let reported = relay.failed.as_ref().map(ToString::to_string);
                    self.log(&format!(
                        "Stream error for {provider}: {}",
                        reported.unwrap_or_default()
                    ));
                    warn!(%provider, index, "provider reported failure");
                    Attempt::Failed(None)
                }
                Ok(()) => {
                    self.log(&format!("Stream for {provider} ended without a result"));
                    warn!(%provider, index, "stream ended without a result");
                    Attempt::Failed(Some(LivenessError::provider_specific(
                        provider,
                        CODE_STREAM_ENDED,
                        "Vendor failed: stream ended without a result",
                    )))
                }
                Err(RaceError::Elapsed(deadline)) => {
                    self.log(&format!("Provider {provider} timed out"));
                    warn!(%provider, index, timeout_ms = deadline.as_millis() as u64, "provider timed out");
                    Attempt::Failed(Some(LivenessError::timeout(provider)))
                }
            }
        };

        stream.shutdown(self.cfg.grace).await;
        outcome
    }
}

/// Bookkeeping for one adapter stream being forwarded.
#[derive(Default)]
struct Relay {
    completed: Option<LivenessResult>,
    failed: Option<LivenessError>,
    /// `Completed` already reached the outward stream.
    forwarded: bool,
    /// The outward stream stopped accepting events.
    closed: bool,
}

impl Relay {
    async fn pump(&mut self, stream: &mut EventStream, tx: &EventSender) {
        while let Some(event) = stream.next().await {
            if !self.forward(event, tx).await {
                return;
            }
        }
    }

    /// Forwards whatever the adapter already queued, without waiting for more.
    async fn drain(&mut self, stream: &mut EventStream, tx: &EventSender) {
        if self.forwarded || self.closed {
            return;
        }
        while let Some(Some(event)) = stream.next().now_or_never() {
            if !self.forward(event, tx).await {
                return;
            }
        }
    }

    /// Returns `false` once nothing more should be read from the adapter.
    async fn forward(&mut self, event: LivenessEvent, tx: &EventSender) -> bool {
        match &event {
            LivenessEvent::Completed(result) => self.completed = Some(result.clone()),
            // reported once, by the run itself
            LivenessEvent::Failed(LivenessError::ContextLost) => {
                self.failed = Some(LivenessError::ContextLost);
                return true;
            }
            LivenessEvent::Failed(err) => self.failed = Some(err.clone()),
            _ => {}
        }
        let terminal = matches!(event, LivenessEvent::Completed(_));
        if !tx.send(event).await {
            self.closed = true;
            return false;
        }
        if terminal {
            self.forwarded = true;
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{AdapterRegistry, MockAdapter, MockBehavior};
    use crate::presentation::Surface;

    fn orchestrator(queue: Vec<ProviderConfig>) -> Orchestrator {
        let env = Environment::new(AdapterRegistry::with_defaults());
        Orchestrator::new(env, queue)
    }

    #[tokio::test(start_paused = true)]
    async fn disposed_orchestrator_rejects_start() {
        let orch = orchestrator(vec![]);
        orch.dispose().await;
        let surface = Arc::new(Surface::new("s"));
        let events: Vec<_> = orch
            .start(PresentationHandle::new(&surface))
            .await
            .collect()
            .await;
        assert_eq!(
            events,
            vec![LivenessEvent::Failed(LivenessError::invalid_state(
                "orchestrator disposed"
            ))]
        );
        assert_eq!(orch.state().await, RunState::Disposed);
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_config_counts_as_configuration_failure() {
        let orch = orchestrator(vec![ProviderConfig::new("Mock", Duration::ZERO)]);
        let surface = Arc::new(Surface::new("s"));
        let events: Vec<_> = orch
            .start(PresentationHandle::new(&surface))
            .await
            .collect()
            .await;
        assert!(matches!(
            &events[0],
            LivenessEvent::Failed(LivenessError::ProviderSpecific { code: CODE_CONFIGURE, .. })
        ));
        assert_eq!(
            events[1],
            LivenessEvent::Failed(LivenessError::NoAvailableProvider)
        );
        assert_eq!(orch.state().await, RunState::Exhausted);
    }

    #[tokio::test(start_paused = true)]
    async fn adapter_failure_is_not_reported_twice() {
        let factory = |cfg: &ProviderConfig| -> Option<AdapterRef> {
            let behavior = MockBehavior::Fail {
                code: 7,
                message: "boom".into(),
            };
            Some(Arc::new(MockAdapter::with_behavior(cfg.provider(), behavior)))
        };
        let orch = Orchestrator::new(
            Environment::new(factory),
            vec![ProviderConfig::new("Only", Duration::from_secs(1))],
        );
        let surface = Arc::new(Surface::new("s"));
        let events: Vec<_> = orch
            .start(PresentationHandle::new(&surface))
            .await
            .collect()
            .await;
        assert_eq!(
            events,
            vec![
                LivenessEvent::Started,
                LivenessEvent::Failed(LivenessError::provider_specific("Only", 7, "boom")),
                LivenessEvent::Failed(LivenessError::NoAvailableProvider),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn completion_on_the_deadline_tick_wins() {
        let factory = |cfg: &ProviderConfig| -> Option<AdapterRef> {
            Some(Arc::new(MockAdapter::with_behavior(
                cfg.provider(),
                MockBehavior::Succeed {
                    delay: Duration::from_secs(1),
                },
            )))
        };
        let orch = Orchestrator::new(
            Environment::new(factory),
            vec![ProviderConfig::new("Tie", Duration::from_secs(1))],
        );
        let surface = Arc::new(Surface::new("s"));

        let events: Vec<_> = orch
            .start(PresentationHandle::new(&surface))
            .await
            .collect()
            .await;

        assert_eq!(events.len(), 2, "{events:?}");
        assert_eq!(events[0], LivenessEvent::Started);
        assert_eq!(
            events[1].as_result().map(LivenessResult::provider),
            Some("Tie")
        );
        assert_eq!(orch.state().await, RunState::Succeeded);
    }

    #[tokio::test(start_paused = true)]
    async fn restart_cancels_previous_run() {
        let factory = |cfg: &ProviderConfig| -> Option<AdapterRef> {
            Some(Arc::new(MockAdapter::with_behavior(
                cfg.provider(),
                MockBehavior::Hang,
            )))
        };
        let orch = Orchestrator::new(
            Environment::new(factory),
            vec![ProviderConfig::new("Hang", Duration::from_secs(60))],
        );
        let surface = Arc::new(Surface::new("s"));

        let mut first = orch.start(PresentationHandle::new(&surface)).await;
        assert_eq!(first.next().await, Some(LivenessEvent::Started));

        let _second = orch.start(PresentationHandle::new(&surface)).await;
        assert_eq!(
            first.next().await,
            Some(LivenessEvent::Failed(LivenessError::Cancelled))
        );
        assert_eq!(first.next().await, None);
    }
}
