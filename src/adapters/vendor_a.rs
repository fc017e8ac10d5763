//! # VendorA reference adapter.
//!
//! Simulated API-key provider. Configuration validates `api_key` and pays a short SDK
//! initialization delay; a session walks progress from 0.0 to 1.0 in tenths and changes
//! the instruction at 0.3, 0.6 and 0.9.
//!
//! ## Settings
//! - `api_key` (string, required, non-empty)
//! - `step_interval_ms` (int, default 500) delay between progress steps

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time;

use crate::adapters::adapter::ProviderAdapter;
use crate::adapters::core::{lock, session_id, AdapterCore, Session};
use crate::config::{ProviderConfig, SettingsValue};
use crate::error::LivenessError;
use crate::events::{EventStream, LivenessEvent, LivenessResult};
use crate::presentation::PresentationHandle;

const INIT_DELAY: Duration = Duration::from_millis(100);
const DEFAULT_STEP: Duration = Duration::from_millis(500);
const CONFIDENCE: f64 = 0.95;

/// API-key based reference provider.
#[derive(Debug)]
pub struct VendorAAdapter {
    core: AdapterCore,
    step: Mutex<Duration>,
}

impl VendorAAdapter {
    pub const PROVIDER: &'static str = "VendorA";

    pub fn new() -> Self {
        Self {
            core: AdapterCore::new(Self::PROVIDER),
            step: Mutex::new(DEFAULT_STEP),
        }
    }

    /// Queue entry for this provider with a 30 s check timeout.
    pub fn config(api_key: impl Into<String>) -> ProviderConfig {
        ProviderConfig::new(Self::PROVIDER, Duration::from_secs(30))
            .with_setting("api_key", api_key.into())
    }
}

impl Default for VendorAAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderAdapter for VendorAAdapter {
    fn provider(&self) -> &str {
        self.core.provider()
    }

    async fn configure(&self, config: &ProviderConfig) -> Result<(), LivenessError> {
        self.core.ensure_usable()?;
        match config.str_setting("api_key") {
            Some(key) if !key.is_empty() => {}
            _ => return Err(LivenessError::configuration("Invalid API key")),
        }
        let step = config
            .setting("step_interval_ms")
            .and_then(SettingsValue::as_int)
            .map_or(DEFAULT_STEP, |ms| Duration::from_millis(ms.max(0) as u64));

        time::sleep(INIT_DELAY).await;
        *lock(&self.step) = step;
        self.core.accept_configuration()
    }

    async fn start_check(&self, context: PresentationHandle) -> Result<EventStream, LivenessError> {
        let step = *lock(&self.step);
        self.core.start_session(context, move |session| async move {
            let outcome = walk(&session, step).await;
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

fn instruction_at(step: u32) -> Option<&'static str> {
    match step {
        3 => Some("Please turn your head left"),
        6 => Some("Please turn your head right"),
        9 => Some("Please smile"),
        _ => None,
    }
}

async fn walk(session: &Session, step: Duration) -> Result<LivenessResult, LivenessError> {
    session.checkpoint()?;
    session.emit(LivenessEvent::Started).await?;

    for i in 0..=10u32 {
        session.pause(step).await?;
        session.checkpoint()?;
        session.emit(LivenessEvent::progress(f64::from(i) / 10.0)).await?;
        if let Some(text) = instruction_at(i) {
            session.emit(LivenessEvent::instruction(text)).await?;
        }
    }

    Ok(LivenessResult::new(VendorAAdapter::PROVIDER, CONFIDENCE)
        .with_metadata("sessionId", session_id(VendorAAdapter::PROVIDER)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use futures::StreamExt;

    use crate::presentation::Surface;

    #[tokio::test(start_paused = true)]
    async fn empty_api_key_is_rejected() {
        let adapter = VendorAAdapter::new();
        let err = adapter.configure(&VendorAAdapter::config("")).await.unwrap_err();
        assert_eq!(err, LivenessError::configuration("Invalid API key"));
        assert!(!adapter.is_configured());
    }

    #[tokio::test(start_paused = true)]
    async fn session_reports_progress_and_instructions() {
        let adapter = VendorAAdapter::new();
        adapter.configure(&VendorAAdapter::config("key")).await.unwrap();
        let surface = Arc::new(Surface::new("s"));
        let events: Vec<_> = adapter
            .start_check(PresentationHandle::new(&surface))
            .await
            .unwrap()
            .collect()
            .await;

        assert_eq!(events.first(), Some(&LivenessEvent::Started));
        let progress = events
            .iter()
            .filter(|e| matches!(e, LivenessEvent::Progress(_)))
            .count();
        assert_eq!(progress, 11);
        let instructions: Vec<_> = events
            .iter()
            .filter_map(|e| match e {
                LivenessEvent::InstructionChanged(s) => Some(s.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(
            instructions,
            [
                "Please turn your head left",
                "Please turn your head right",
                "Please smile"
            ]
        );
        let result = events.last().and_then(LivenessEvent::as_result).unwrap();
        assert_eq!(result.confidence(), 0.95);
        assert!(result.metadata().contains_key("sessionId"));
    }

    #[tokio::test(start_paused = true)]
    async fn closing_the_surface_loses_context() {
        let adapter = VendorAAdapter::new();
        adapter.configure(&VendorAAdapter::config("key")).await.unwrap();
        let surface = Arc::new(Surface::new("s"));
        let mut stream = adapter
            .start_check(PresentationHandle::new(&surface))
            .await
            .unwrap();
        assert_eq!(stream.next().await, Some(LivenessEvent::Started));
        surface.close();
        assert_eq!(stream.into_result().await, Err(LivenessError::ContextLost));
    }
}
