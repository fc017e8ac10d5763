//! # Event sequences.
//!
//! [`EventStream`] is the single-consumer, cancellable sequence of [`LivenessEvent`]s used at
//! both seams of the system: adapters return one per check session, and the orchestrator
//! returns one per run. [`EventSender`] is the producing half handed to the task that feeds it.
//!
//! ## Architecture
//! ```text
//! producer task                                  consumer
//!   EventSender ──send()──► [bounded mpsc] ──────► EventStream (futures::Stream)
//!        │                                              │
//!        └──── token.cancelled() ◄──── cancel() / drop ─┘
//! ```
//!
//! ## Rules
//! - **Backpressure, no drops**: `send()` waits for capacity; events are never reordered.
//! - **Drop = cancel**: dropping the stream cancels the producer's token.
//! - `send()` returns `false` once the token is cancelled or the consumer is gone; the
//!   producer should unwind and may report a final event through `finish()`.
//! - `shutdown()` cancels and then waits (bounded by a grace period) for the producer task.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::{Stream, StreamExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;
use tokio_util::sync::{CancellationToken, DropGuard};

use super::event::{LivenessEvent, LivenessResult};
use crate::error::LivenessError;

/// Producing half of an [`EventStream`].
#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::Sender<LivenessEvent>,
    token: CancellationToken,
}

impl EventSender {
    /// Delivers `event`, waiting for channel capacity.
    ///
    /// Returns `false` if the stream was cancelled or its consumer dropped it.
    pub async fn send(&self, event: LivenessEvent) -> bool {
        if self.token.is_cancelled() {
            return false;
        }
        tokio::select! {
            biased;
            _ = self.token.cancelled() => false,
            res = self.tx.send(event) => res.is_ok(),
        }
    }

    /// Best-effort, non-blocking delivery of a final event.
    ///
    /// Used to report `Failed(Cancelled)` to a consumer that cancelled but is still reading.
    pub fn finish(&self, event: LivenessEvent) {
        let _ = self.tx.try_send(event);
    }

    /// Cancellation token shared with the consuming [`EventStream`].
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Single-consumer, cancellable sequence of [`LivenessEvent`]s.
pub struct EventStream {
    rx: mpsc::Receiver<LivenessEvent>,
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
    _guard: DropGuard,
}

impl EventStream {
    /// Spawns `producer` on the tokio runtime and returns the stream it feeds.
    ///
    /// The producer receives an [`EventSender`] bound to `token`; the stream ends when the
    /// producer returns (dropping its sender).
    pub fn spawn<F, Fut>(capacity: usize, token: CancellationToken, producer: F) -> Self
    where
        F: FnOnce(EventSender) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let sender = EventSender {
            tx,
            token: token.clone(),
        };
        let task = tokio::spawn(producer(sender));
        Self {
            rx,
            _guard: token.clone().drop_guard(),
            token,
            task: Some(task),
        }
    }

    /// A finished stream that yields `events` in order.
    ///
    /// ```rust
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() {
    /// use futures::StreamExt;
    /// use livenessvisor::{EventStream, LivenessEvent};
    ///
    /// let events: Vec<_> = EventStream::from_events([LivenessEvent::Started]).collect().await;
    /// assert_eq!(events, vec![LivenessEvent::Started]);
    /// # }
    /// ```
    pub fn from_events(events: impl IntoIterator<Item = LivenessEvent>) -> Self {
        let events: Vec<LivenessEvent> = events.into_iter().collect();
        let (tx, rx) = mpsc::channel(events.len().max(1));
        for ev in events {
            let _ = tx.try_send(ev);
        }
        let token = CancellationToken::new();
        Self {
            rx,
            _guard: token.clone().drop_guard(),
            token,
            task: None,
        }
    }

    /// Requests cancellation while staying attached.
    ///
    /// Events already queued, plus a final event reported through
    /// [`EventSender::finish`], can still be read until the stream ends.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Cancels the producer and waits up to `grace` for its task to exit.
    ///
    /// A producer still running after `grace` is aborted.
    pub async fn shutdown(mut self, grace: Duration) {
        self.token.cancel();
        self.rx.close();
        if let Some(mut task) = self.task.take() {
            if time::timeout(grace, &mut task).await.is_err() {
                task.abort();
            }
        }
    }

    /// Consumes the stream until the first `Completed` and returns its result.
    ///
    /// Per-attempt failures are skipped; if the stream ends without a result, the last
    /// `Failed` error is returned (the run's terminal error), or
    /// [`LivenessError::NoAvailableProvider`] if there was none.
    pub async fn into_result(mut self) -> Result<LivenessResult, LivenessError> {
        let mut last = None;
        while let Some(event) = self.next().await {
            match event {
                LivenessEvent::Completed(result) => return Ok(result),
                LivenessEvent::Failed(err) => last = Some(err),
                _ => {}
            }
        }
        Err(last.unwrap_or(LivenessError::NoAvailableProvider))
    }
}

impl Stream for EventStream {
    type Item = LivenessEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

impl std::fmt::Debug for EventStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStream")
            .field("cancelled", &self.token.is_cancelled())
            .field("has_task", &self.task.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dropping_the_stream_cancels_the_producer() {
        let token = CancellationToken::new();
        let observed = token.clone();
        let stream = EventStream::spawn(4, token, |tx| async move {
            tx.token().cancelled().await;
        });
        drop(stream);
        observed.cancelled().await;
        assert!(observed.is_cancelled());
    }

    #[tokio::test]
    async fn explicit_cancel_still_delivers_final_event() {
        let mut stream = EventStream::spawn(4, CancellationToken::new(), |tx| async move {
            tx.send(LivenessEvent::Started).await;
            tx.token().cancelled().await;
            tx.finish(LivenessEvent::Failed(LivenessError::Cancelled));
        });
        assert_eq!(stream.next().await, Some(LivenessEvent::Started));
        stream.cancel();
        assert_eq!(
            stream.next().await,
            Some(LivenessEvent::Failed(LivenessError::Cancelled))
        );
        assert_eq!(stream.next().await, None);
    }

    #[tokio::test]
    async fn into_result_returns_last_failure() {
        let stream = EventStream::from_events([
            LivenessEvent::Failed(LivenessError::timeout("A")),
            LivenessEvent::Failed(LivenessError::NoAvailableProvider),
        ]);
        assert_eq!(
            stream.into_result().await,
            Err(LivenessError::NoAvailableProvider)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_aborts_producer_ignoring_cancellation() {
        let stream = EventStream::spawn(1, CancellationToken::new(), |_tx| async move {
            time::sleep(Duration::from_secs(3600)).await;
        });
        let started = time::Instant::now();
        stream.shutdown(Duration::from_millis(100)).await;
        assert!(started.elapsed() < Duration::from_secs(1));
    }
}
