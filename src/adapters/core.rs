//! # Shared adapter state machine.
//!
//! [`AdapterCore`] is the building block concrete adapters embed. It owns:
//! - the [`AdapterState`] (`Unconfigured → Configured → Running`, `Terminated` on dispose),
//! - the cancellation token of the current internal session task,
//! - the presentation handle of the current session.
//!
//! [`AdapterCore::start_session`] spawns the adapter's step loop bound to the returned
//! [`EventStream`]. The loop receives a [`Session`], whose helpers turn cancellation and a
//! vanished presentation context into errors at every step.
//!
//! ## Rules
//! - At most **one** session per adapter: starting a new one cancels the previous.
//! - `reset()` cancels the session and drops the context; `terminate()` additionally makes
//!   the adapter unusable.
//! - Dropping the session's stream cancels the session task.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::time;
use tokio_util::sync::CancellationToken;

use crate::error::LivenessError;
use crate::events::{EventSender, EventStream, LivenessEvent, LivenessResult};
use crate::presentation::PresentationHandle;

/// Adapter lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdapterState {
    Unconfigured,
    Configured,
    Running,
    Terminated,
}

struct CoreInner {
    state: AdapterState,
    session: Option<CancellationToken>,
    context: Option<PresentationHandle>,
}

/// State machine and session bookkeeping shared by adapters.
pub struct AdapterCore {
    provider: String,
    capacity: usize,
    inner: Mutex<CoreInner>,
}

impl AdapterCore {
    /// Default capacity of a session's event channel.
    pub const DEFAULT_CAPACITY: usize = 64;

    pub fn new(provider: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            capacity: Self::DEFAULT_CAPACITY,
            inner: Mutex::new(CoreInner {
                state: AdapterState::Unconfigured,
                session: None,
                context: None,
            }),
        }
    }

    pub fn provider(&self) -> &str {
        &self.provider
    }

    pub fn state(&self) -> AdapterState {
        lock(&self.inner).state
    }

    /// `true` in `Configured` and `Running`.
    pub fn is_configured(&self) -> bool {
        matches!(
            self.state(),
            AdapterState::Configured | AdapterState::Running
        )
    }

    /// Fails with `InvalidState` once the adapter was disposed.
    pub fn ensure_usable(&self) -> Result<(), LivenessError> {
        if self.state() == AdapterState::Terminated {
            return Err(LivenessError::invalid_state(format!(
                "{} adapter disposed",
                self.provider
            )));
        }
        Ok(())
    }

    /// Marks a successful (re)configuration. A running session is cancelled.
    pub fn accept_configuration(&self) -> Result<(), LivenessError> {
        self.ensure_usable()?;
        let mut inner = lock(&self.inner);
        if let Some(session) = inner.session.take() {
            session.cancel();
        }
        inner.state = AdapterState::Configured;
        Ok(())
    }

    /// Presentation handle of the current session, if any.
    pub fn context(&self) -> Option<PresentationHandle> {
        lock(&self.inner).context.clone()
    }

    /// Spawns `run` as the adapter's session task and returns its event stream.
    pub fn start_session<F, Fut>(
        &self,
        context: PresentationHandle,
        run: F,
    ) -> Result<EventStream, LivenessError>
    where
        F: FnOnce(Session) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let token = {
            let mut inner = lock(&self.inner);
            match inner.state {
                AdapterState::Unconfigured => {
                    return Err(LivenessError::invalid_state(format!(
                        "{} adapter not configured",
                        self.provider
                    )));
                }
                AdapterState::Terminated => {
                    return Err(LivenessError::invalid_state(format!(
                        "{} adapter disposed",
                        self.provider
                    )));
                }
                AdapterState::Configured | AdapterState::Running => {}
            }
            if let Some(previous) = inner.session.take() {
                previous.cancel();
            }
            let token = CancellationToken::new();
            inner.session = Some(token.clone());
            inner.context = Some(context.clone());
            inner.state = AdapterState::Running;
            token
        };

        Ok(EventStream::spawn(self.capacity, token, move |events| {
            run(Session { events, context })
        }))
    }

    /// Cancels the session, drops the context and returns to `Unconfigured`.
    pub fn reset(&self) {
        let mut inner = lock(&self.inner);
        if let Some(session) = inner.session.take() {
            session.cancel();
        }
        inner.context = None;
        if inner.state != AdapterState::Terminated {
            inner.state = AdapterState::Unconfigured;
        }
    }

    /// Resets and marks the adapter `Terminated`.
    pub fn terminate(&self) {
        self.reset();
        lock(&self.inner).state = AdapterState::Terminated;
    }
}

impl std::fmt::Debug for AdapterCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterCore")
            .field("provider", &self.provider)
            .field("state", &self.state())
            .finish()
    }
}

/// Handle given to an adapter's session task.
pub struct Session {
    events: EventSender,
    context: PresentationHandle,
}

impl Session {
    pub fn events(&self) -> &EventSender {
        &self.events
    }

    pub fn context(&self) -> &PresentationHandle {
        &self.context
    }

    /// Fails with `Cancelled` or `ContextLost` if the session must stop.
    pub fn checkpoint(&self) -> Result<(), LivenessError> {
        if self.events.is_cancelled() {
            return Err(LivenessError::Cancelled);
        }
        if !self.context.is_live() {
            return Err(LivenessError::ContextLost);
        }
        Ok(())
    }

    /// Sleeps for `delay`, waking early with `Cancelled`.
    pub async fn pause(&self, delay: Duration) -> Result<(), LivenessError> {
        tokio::select! {
            biased;
            _ = self.events.token().cancelled() => Err(LivenessError::Cancelled),
            _ = time::sleep(delay) => Ok(()),
        }
    }

    /// Emits a non-terminal event; `Cancelled` if nobody is listening anymore.
    pub async fn emit(&self, event: LivenessEvent) -> Result<(), LivenessError> {
        if self.events.send(event).await {
            Ok(())
        } else {
            Err(LivenessError::Cancelled)
        }
    }

    /// Emits the terminal event for `outcome` and ends the session.
    ///
    /// After cancellation the final `Failed` is delivered best-effort only.
    pub async fn conclude(self, outcome: Result<LivenessResult, LivenessError>) {
        match outcome {
            Ok(result) => {
                self.events.send(LivenessEvent::Completed(result)).await;
            }
            Err(err) if self.events.is_cancelled() => {
                self.events.finish(LivenessEvent::Failed(err));
            }
            Err(err) => {
                self.events.send(LivenessEvent::Failed(err)).await;
            }
        }
    }
}

pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Random session identifier, e.g. `VendorA-5f0c…`.
pub(crate) fn session_id(prefix: &str) -> String {
    format!("{prefix}-{:016x}", rand::random::<u64>())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use futures::StreamExt;

    use crate::presentation::Surface;

    #[tokio::test]
    async fn start_requires_configuration() {
        let core = AdapterCore::new("Test");
        let err = core
            .start_session(PresentationHandle::detached(), |_s| async {})
            .unwrap_err();
        assert!(matches!(err, LivenessError::InvalidState { .. }));
    }

    #[tokio::test]
    async fn reset_cancels_running_session() {
        let core = AdapterCore::new("Test");
        core.accept_configuration().unwrap();
        let surface = Arc::new(Surface::new("s"));
        let mut stream = core
            .start_session(PresentationHandle::new(&surface), |s| async move {
                let _ = s.emit(LivenessEvent::Started).await;
                let outcome = s.pause(Duration::from_secs(3600)).await;
                s.conclude(outcome.map(|_| LivenessResult::new("Test", 1.0))).await;
            })
            .unwrap();

        assert_eq!(stream.next().await, Some(LivenessEvent::Started));
        assert_eq!(core.state(), AdapterState::Running);
        core.reset();
        assert_eq!(
            stream.next().await,
            Some(LivenessEvent::Failed(LivenessError::Cancelled))
        );
        assert_eq!(stream.next().await, None);
        assert_eq!(core.state(), AdapterState::Unconfigured);
        assert!(core.context().is_none());
    }

    #[test]
    fn terminated_adapter_rejects_configuration() {
        let core = AdapterCore::new("Test");
        core.terminate();
        core.terminate();
        assert!(core.accept_configuration().is_err());
        assert!(!core.is_configured());
    }

    #[tokio::test]
    async fn checkpoint_reports_lost_context() {
        let core = AdapterCore::new("Test");
        core.accept_configuration().unwrap();
        let stream = core
            .start_session(PresentationHandle::detached(), |s| async move {
                let outcome = s.checkpoint().map(|_| LivenessResult::new("Test", 1.0));
                s.conclude(outcome).await;
            })
            .unwrap();
        assert_eq!(stream.into_result().await, Err(LivenessError::ContextLost));
    }
}
