//! # VendorB reference adapter.
//!
//! Simulated client-credentials provider with a flaky SDK initialization and a five-step
//! guided session. Each step reports its progress and instruction together.
//!
//! ## Settings
//! - `client_id`, `client_secret` (string, required, non-empty)
//! - `init_failure_rate` (double in `[0, 1]`, default 0.1) chance that SDK init fails
//! - `step_interval_ms` (int, default 1000) delay before each step

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use tokio::time;

use crate::adapters::adapter::ProviderAdapter;
use crate::adapters::core::{lock, session_id, AdapterCore, Session};
use crate::config::{ProviderConfig, SettingsValue};
use crate::error::LivenessError;
use crate::events::{EventStream, LivenessEvent, LivenessResult};
use crate::presentation::PresentationHandle;

const INIT_DELAY: Duration = Duration::from_millis(200);
const DEFAULT_STEP: Duration = Duration::from_secs(1);
const DEFAULT_INIT_FAILURE_RATE: f64 = 0.1;

const STEPS: [(f64, &str); 5] = [
    (0.2, "Center your face in the frame"),
    (0.4, "Move closer to the camera"),
    (0.6, "Blink twice"),
    (0.8, "Turn your head slowly"),
    (1.0, "Processing..."),
];

#[derive(Debug)]
struct Sdk {
    handle: Option<String>,
    step: Duration,
}

/// Client-credentials reference provider.
#[derive(Debug)]
pub struct VendorBAdapter {
    core: AdapterCore,
    sdk: Mutex<Sdk>,
}

impl VendorBAdapter {
    pub const PROVIDER: &'static str = "VendorB";

    pub fn new() -> Self {
        Self {
            core: AdapterCore::new(Self::PROVIDER),
            sdk: Mutex::new(Sdk {
                handle: None,
                step: DEFAULT_STEP,
            }),
        }
    }

    /// Queue entry for this provider with a 45 s check timeout.
    pub fn config(client_id: impl Into<String>, client_secret: impl Into<String>) -> ProviderConfig {
        ProviderConfig::new(Self::PROVIDER, Duration::from_secs(45))
            .with_setting("client_id", client_id.into())
            .with_setting("client_secret", client_secret.into())
    }

    /// Handle of the initialized SDK; `None` until configured and after reset.
    pub fn sdk_handle(&self) -> Option<String> {
        lock(&self.sdk).handle.clone()
    }
}

impl Default for VendorBAdapter {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty<'a>(config: &'a ProviderConfig, key: &str) -> Option<&'a str> {
    config.str_setting(key).filter(|s| !s.is_empty())
}

#[async_trait]
impl ProviderAdapter for VendorBAdapter {
    fn provider(&self) -> &str {
        self.core.provider()
    }

    async fn configure(&self, config: &ProviderConfig) -> Result<(), LivenessError> {
        self.core.ensure_usable()?;
        time::sleep(INIT_DELAY).await;

        if non_empty(config, "client_id").is_none() || non_empty(config, "client_secret").is_none()
        {
            return Err(LivenessError::configuration("Invalid credentials"));
        }

        let failure_rate = config
            .setting("init_failure_rate")
            .and_then(SettingsValue::as_double)
            .unwrap_or(DEFAULT_INIT_FAILURE_RATE);
        let failure_rate = if failure_rate.is_nan() {
            0.0
        } else {
            failure_rate.clamp(0.0, 1.0)
        };
        if rand::rng().random_bool(failure_rate) {
            return Err(LivenessError::configuration("Network connectivity issue"));
        }

        let step = config
            .setting("step_interval_ms")
            .and_then(SettingsValue::as_int)
            .map_or(DEFAULT_STEP, |ms| Duration::from_millis(ms.max(0) as u64));
        {
            let mut sdk = lock(&self.sdk);
            sdk.handle = Some(session_id("SDK_Handle"));
            sdk.step = step;
        }
        self.core.accept_configuration()
    }

    async fn start_check(&self, context: PresentationHandle) -> Result<EventStream, LivenessError> {
        let step = lock(&self.sdk).step;
        self.core.start_session(context, move |session| async move {
            let outcome = guide(&session, step).await;
            session.conclude(outcome).await;
        })
    }

    async fn reset(&self) {
        self.core.reset();
    }

    async fn dispose(&self) {
        self.core.terminate();
        lock(&self.sdk).handle = None;
    }

    fn is_configured(&self) -> bool {
        self.core.is_configured()
    }
}

async fn guide(session: &Session, step: Duration) -> Result<LivenessResult, LivenessError> {
    session.emit(LivenessEvent::Started).await?;

    for (progress, instruction) in STEPS {
        session.pause(step).await?;
        session.checkpoint()?;
        session.emit(LivenessEvent::progress(progress)).await?;
        session.emit(LivenessEvent::instruction(instruction)).await?;
    }

    Ok(LivenessResult::new(VendorBAdapter::PROVIDER, 0.98)
        .with_metadata("sessionId", session_id(VendorBAdapter::PROVIDER))
        .with_metadata("faceQuality", 0.92)
        .with_metadata("livenessScore", 0.99)
        .with_metadata("processingTime", 5.2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use futures::StreamExt;

    use crate::presentation::Surface;

    fn reliable() -> ProviderConfig {
        VendorBAdapter::config("id", "secret").with_setting("init_failure_rate", 0.0)
    }

    #[tokio::test(start_paused = true)]
    async fn missing_secret_is_rejected() {
        let adapter = VendorBAdapter::new();
        let err = adapter
            .configure(&VendorBAdapter::config("id", ""))
            .await
            .unwrap_err();
        assert_eq!(err, LivenessError::configuration("Invalid credentials"));
        assert!(adapter.sdk_handle().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn certain_init_failure_reports_network_issue() {
        let adapter = VendorBAdapter::new();
        let cfg = VendorBAdapter::config("id", "secret").with_setting("init_failure_rate", 1.0);
        assert_eq!(
            adapter.configure(&cfg).await,
            Err(LivenessError::configuration("Network connectivity issue"))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn guided_session_completes_with_rich_metadata() {
        let adapter = VendorBAdapter::new();
        adapter.configure(&reliable()).await.unwrap();
        assert!(adapter.sdk_handle().is_some());

        let surface = Arc::new(Surface::new("s"));
        let started = time::Instant::now();
        let events: Vec<_> = adapter
            .start_check(PresentationHandle::new(&surface))
            .await
            .unwrap()
            .collect()
            .await;

        assert!(started.elapsed() >= Duration::from_secs(5));
        assert_eq!(events.len(), 1 + 2 * STEPS.len() + 1);
        assert_eq!(events[1], LivenessEvent::Progress(0.2));
        assert_eq!(
            events[2],
            LivenessEvent::instruction("Center your face in the frame")
        );
        let result = events.last().and_then(LivenessEvent::as_result).unwrap();
        assert_eq!(result.confidence(), 0.98);
        assert_eq!(
            result.metadata().get("livenessScore").and_then(SettingsValue::as_double),
            Some(0.99)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn dispose_drops_sdk_handle() {
        let adapter = VendorBAdapter::new();
        adapter.configure(&reliable()).await.unwrap();
        adapter.dispose().await;
        assert!(adapter.sdk_handle().is_none());
        assert!(!adapter.is_configured());
    }
}
