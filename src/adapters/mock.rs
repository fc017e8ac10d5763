//! # Configurable mock provider.
//!
//! [`MockAdapter`] simulates a provider whose outcome is chosen up front ([`MockBehavior`]) or
//! read from its configuration's settings. A shared [`MockProbe`] counts lifecycle calls and
//! tracks whether a session task is still alive, which makes teardown observable in tests.
//!
//! ## Settings (when no explicit behavior is given)
//! | key                   | type   | default | effect                                    |
//! |-----------------------|--------|---------|-------------------------------------------|
//! | `fail_configuration`  | string | –       | `configure` fails with this reason        |
//! | `hang`                | bool   | false   | session never terminates on its own       |
//! | `should_succeed`      | bool   | true    | `false` → session ends with `Failed(999)` |
//! | `simulated_delay_ms`  | int    | 2000    | delay between `Started` and `Completed`   |

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::adapters::adapter::ProviderAdapter;
use crate::adapters::core::{lock, AdapterCore, Session};
use crate::config::{ProviderConfig, SettingsValue};
use crate::error::LivenessError;
use crate::events::{EventStream, LivenessEvent, LivenessResult};
use crate::presentation::PresentationHandle;

/// What a [`MockAdapter`] does when configured and started.
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// `Started`, wait `delay`, `Completed` with confidence 1.0.
    Succeed { delay: Duration },
    /// `Started`, then `Failed(ProviderSpecific(code, message))`.
    Fail { code: i32, message: String },
    /// `configure` fails with `ConfigurationFailed(reason)`.
    FailConfiguration(String),
    /// `configure` never returns.
    HangConfiguration,
    /// `Started`, then nothing until cancelled.
    Hang,
    /// Emits exactly these events, then ends.
    Script(Vec<LivenessEvent>),
}

impl MockBehavior {
    /// Derives a behavior from `config`'s settings (see module docs).
    pub fn from_settings(config: &ProviderConfig) -> Self {
        if let Some(reason) = config.str_setting("fail_configuration") {
            return MockBehavior::FailConfiguration(reason.to_owned());
        }
        let flag = |key: &str| config.setting(key).and_then(SettingsValue::as_bool);
        if flag("hang") == Some(true) {
            return MockBehavior::Hang;
        }
        if flag("should_succeed") == Some(false) {
            return MockBehavior::Fail {
                code: 999,
                message: "Simulated failure".into(),
            };
        }
        let delay_ms = config
            .setting("simulated_delay_ms")
            .and_then(SettingsValue::as_int)
            .unwrap_or(2000)
            .max(0) as u64;
        MockBehavior::Succeed {
            delay: Duration::from_millis(delay_ms),
        }
    }
}

#[derive(Debug, Default)]
struct Counters {
    configures: AtomicUsize,
    starts: AtomicUsize,
    resets: AtomicUsize,
    disposes: AtomicUsize,
    running: AtomicUsize,
}

/// Shared lifecycle counters for one or more mock adapters.
#[derive(Debug, Clone, Default)]
pub struct MockProbe {
    counters: Arc<Counters>,
}

impl MockProbe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn configures(&self) -> usize {
        self.counters.configures.load(Ordering::SeqCst)
    }

    pub fn starts(&self) -> usize {
        self.counters.starts.load(Ordering::SeqCst)
    }

    pub fn resets(&self) -> usize {
        self.counters.resets.load(Ordering::SeqCst)
    }

    pub fn disposes(&self) -> usize {
        self.counters.disposes.load(Ordering::SeqCst)
    }

    /// `true` while any session task of the observed adapters is alive.
    pub fn is_running(&self) -> bool {
        self.counters.running.load(Ordering::SeqCst) > 0
    }

    fn enter(&self) -> RunningGuard {
        self.counters.running.fetch_add(1, Ordering::SeqCst);
        RunningGuard {
            counters: Arc::clone(&self.counters),
        }
    }
}

/// Decrements the running count when the session task ends, however it ends.
struct RunningGuard {
    counters: Arc<Counters>,
}

impl Drop for RunningGuard {
    fn drop(&mut self) {
        self.counters.running.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Simulated provider for tests and demos.
///
/// ## Example
/// ```rust
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// use std::sync::Arc;
/// use std::time::Duration;
/// use livenessvisor::{
///     MockAdapter, PresentationHandle, ProviderAdapter, ProviderConfig, Surface,
/// };
///
/// let adapter = MockAdapter::new("Mock");
/// let cfg = ProviderConfig::new("Mock", Duration::from_secs(10))
///     .with_setting("simulated_delay_ms", 10);
/// adapter.configure(&cfg).await.unwrap();
///
/// let surface = Arc::new(Surface::new("main"));
/// let stream = adapter.start_check(PresentationHandle::new(&surface)).await.unwrap();
/// let result = stream.into_result().await.unwrap();
/// assert_eq!(result.provider(), "Mock");
/// assert_eq!(result.confidence(), 1.0);
/// # }
/// ```
#[derive(Debug)]
pub struct MockAdapter {
    core: AdapterCore,
    preset: Option<MockBehavior>,
    behavior: Mutex<Option<MockBehavior>>,
    probe: MockProbe,
}

impl MockAdapter {
    /// Provider identity the default registry uses for this adapter.
    pub const PROVIDER: &'static str = "Mock";

    /// Settings-driven mock serving `provider`.
    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            core: AdapterCore::new(provider),
            preset: None,
            behavior: Mutex::new(None),
            probe: MockProbe::new(),
        }
    }

    /// Mock with a fixed behavior; settings are ignored.
    pub fn with_behavior(provider: impl Into<String>, behavior: MockBehavior) -> Self {
        Self {
            preset: Some(behavior),
            ..Self::new(provider)
        }
    }

    /// Reports into `probe` instead of a private one.
    pub fn with_probe(mut self, probe: MockProbe) -> Self {
        self.probe = probe;
        self
    }

    pub fn probe(&self) -> MockProbe {
        self.probe.clone()
    }

    pub fn state(&self) -> crate::adapters::AdapterState {
        self.core.state()
    }
}

#[async_trait]
impl ProviderAdapter for MockAdapter {
    fn provider(&self) -> &str {
        self.core.provider()
    }

    async fn configure(&self, config: &ProviderConfig) -> Result<(), LivenessError> {
        self.core.ensure_usable()?;
        self.probe.counters.configures.fetch_add(1, Ordering::SeqCst);

        let behavior = self
            .preset
            .clone()
            .unwrap_or_else(|| MockBehavior::from_settings(config));
        match behavior {
            MockBehavior::FailConfiguration(reason) => Err(LivenessError::configuration(reason)),
            MockBehavior::HangConfiguration => std::future::pending().await,
            behavior => {
                *lock(&self.behavior) = Some(behavior);
                self.core.accept_configuration()
            }
        }
    }

    async fn start_check(&self, context: PresentationHandle) -> Result<EventStream, LivenessError> {
        let behavior = lock(&self.behavior).clone();
        let behavior = behavior.ok_or_else(|| {
            LivenessError::invalid_state(format!("{} adapter not configured", self.provider()))
        })?;
        let provider = self.core.provider().to_owned();
        let running = self.probe.enter();

        let stream = self.core.start_session(context, move |session| async move {
            let _running = running;
            simulate(session, provider, behavior).await;
        })?;
        self.probe.counters.starts.fetch_add(1, Ordering::SeqCst);
        Ok(stream)
    }

    async fn reset(&self) {
        self.probe.counters.resets.fetch_add(1, Ordering::SeqCst);
        *lock(&self.behavior) = None;
        self.core.reset();
    }

    async fn dispose(&self) {
        self.probe.counters.disposes.fetch_add(1, Ordering::SeqCst);
        *lock(&self.behavior) = None;
        self.core.terminate();
    }

    fn is_configured(&self) -> bool {
        self.core.is_configured()
    }
}

async fn simulate(session: Session, provider: String, behavior: MockBehavior) {
    if let MockBehavior::Script(events) = behavior {
        for event in events {
            if session.emit(event).await.is_err() {
                return;
            }
        }
        return;
    }

    let outcome = run_steps(&session, &provider, behavior).await;
    session.conclude(outcome).await;
}

async fn run_steps(
    session: &Session,
    provider: &str,
    behavior: MockBehavior,
) -> Result<LivenessResult, LivenessError> {
    session.emit(LivenessEvent::Started).await?;
    match behavior {
        MockBehavior::Succeed { delay } => {
            session.pause(delay).await?;
            Ok(LivenessResult::new(provider, 1.0).with_metadata("test", true))
        }
        MockBehavior::Fail { code, message } => {
            Err(LivenessError::provider_specific(provider, code, message))
        }
        MockBehavior::Hang => {
            session.events().token().cancelled().await;
            Err(LivenessError::Cancelled)
        }
        MockBehavior::FailConfiguration(_)
        | MockBehavior::HangConfiguration
        | MockBehavior::Script(_) => Err(LivenessError::invalid_state(format!(
            "{provider} adapter not configured"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;

    use crate::presentation::Surface;

    fn cfg() -> ProviderConfig {
        ProviderConfig::new("Mock", Duration::from_secs(10))
    }

    #[test]
    fn settings_select_behavior() {
        assert_eq!(
            MockBehavior::from_settings(&cfg().with_setting("should_succeed", false)),
            MockBehavior::Fail {
                code: 999,
                message: "Simulated failure".into()
            }
        );
        assert_eq!(
            MockBehavior::from_settings(&cfg().with_setting("simulated_delay_ms", 100)),
            MockBehavior::Succeed {
                delay: Duration::from_millis(100)
            }
        );
        assert_eq!(
            MockBehavior::from_settings(&cfg().with_setting("fail_configuration", "no key")),
            MockBehavior::FailConfiguration("no key".into())
        );
    }

    #[tokio::test]
    async fn start_before_configure_is_invalid() {
        let adapter = MockAdapter::new("Mock");
        let surface = Arc::new(Surface::new("s"));
        let err = adapter
            .start_check(PresentationHandle::new(&surface))
            .await
            .unwrap_err();
        assert!(matches!(err, LivenessError::InvalidState { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn failing_session_emits_started_then_failed() {
        let adapter = MockAdapter::new("Mock");
        adapter
            .configure(&cfg().with_setting("should_succeed", false))
            .await
            .unwrap();
        let surface = Arc::new(Surface::new("s"));
        let events: Vec<_> = adapter
            .start_check(PresentationHandle::new(&surface))
            .await
            .unwrap()
            .collect()
            .await;
        assert_eq!(
            events,
            vec![
                LivenessEvent::Started,
                LivenessEvent::Failed(LivenessError::provider_specific(
                    "Mock",
                    999,
                    "Simulated failure"
                )),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn dispose_stops_session_and_terminates() {
        let adapter = MockAdapter::with_behavior("Mock", MockBehavior::Hang);
        let probe = adapter.probe();
        adapter.configure(&cfg()).await.unwrap();
        let surface = Arc::new(Surface::new("s"));
        let mut stream = adapter
            .start_check(PresentationHandle::new(&surface))
            .await
            .unwrap();
        assert_eq!(stream.next().await, Some(LivenessEvent::Started));
        assert!(probe.is_running());

        adapter.dispose().await;
        assert_eq!(
            stream.next().await,
            Some(LivenessEvent::Failed(LivenessError::Cancelled))
        );
        assert_eq!(stream.next().await, None);
        assert!(!probe.is_running());
        assert_eq!(probe.disposes(), 1);
        assert!(adapter.configure(&cfg()).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn session_is_running_before_its_first_poll() {
        let adapter = MockAdapter::with_behavior("Mock", MockBehavior::Hang);
        let probe = adapter.probe();
        adapter.configure(&cfg()).await.unwrap();
        let surface = Arc::new(Surface::new("s"));

        let stream = adapter
            .start_check(PresentationHandle::new(&surface))
            .await
            .unwrap();
        assert!(probe.is_running());

        stream.shutdown(Duration::from_secs(1)).await;
        assert!(!probe.is_running());
    }
}
