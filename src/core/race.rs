//! # Race an operation against a deadline.
//!
//! [`race`] runs one future against a timer and an external [`CancellationToken`] and returns
//! whichever finishes first. The two losing branches are dropped before `race` returns, so an
//! operation that lost never makes progress afterwards.
//!
//! ## Flow
//! ```text
//! race(op, deadline, cancel)
//!   select! (biased) {
//!     op              → Ok(output)
//!     cancel          → Err(RaceError::Cancelled)
//!     sleep(deadline) → Err(RaceError::Elapsed(deadline))
//!   }
//!   drop(losers)
//! ```
//!
//! ## Rules
//! - An operation that is ready in the same poll as the deadline **wins**.
//! - Outer cancellation beats the deadline.
//! - `deadline = 0` still polls the operation once.
//!
//! ## Example
//! ```rust
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use livenessvisor::{race, RaceError};
//!
//! let cancel = CancellationToken::new();
//!
//! let fast = race(async { 7 }, Duration::from_millis(50), &cancel).await;
//! assert_eq!(fast, Ok(7));
//!
//! let slow = race(std::future::pending::<()>(), Duration::from_millis(10), &cancel).await;
//! assert_eq!(slow, Err(RaceError::Elapsed(Duration::from_millis(10))));
//! # }
//! ```

use std::future::Future;
use std::time::Duration;

use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use crate::error::RaceError;

/// Runs `operation` until it completes, `deadline` elapses or `cancel` fires.
pub async fn race<F, T>(
    operation: F,
    deadline: Duration,
    cancel: &CancellationToken,
) -> Result<T, RaceError>
where
    F: Future<Output = T>,
{
    tokio::pin!(operation);
    let sleep = time::sleep(deadline);
    tokio::pin!(sleep);

    select! {
        biased;
        out = &mut operation => Ok(out),
        _ = cancel.cancelled() => Err(RaceError::Cancelled),
        _ = &mut sleep => Err(RaceError::Elapsed(deadline)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn operation_wins_before_deadline() {
        let cancel = CancellationToken::new();
        let out = race(
            async {
                time::sleep(Duration::from_millis(10)).await;
                "done"
            },
            Duration::from_secs(1),
            &cancel,
        )
        .await;
        assert_eq!(out, Ok("done"));
    }

    #[tokio::test(start_paused = true)]
    async fn deadline_drops_the_operation() {
        let cancel = CancellationToken::new();
        let dropped = Arc::new(AtomicBool::new(false));
        let flag = DropFlag(Arc::clone(&dropped));

        let started = time::Instant::now();
        let out = race(
            async move {
                let _flag = flag;
                std::future::pending::<()>().await;
            },
            Duration::from_secs(1),
            &cancel,
        )
        .await;

        assert_eq!(out, Err(RaceError::Elapsed(Duration::from_secs(1))));
        assert_eq!(started.elapsed(), Duration::from_secs(1));
        assert!(dropped.load(Ordering::SeqCst));
    }

    #[tokio::test(start_paused = true)]
    async fn outer_cancel_interrupts_both() {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            time::sleep(Duration::from_millis(100)).await;
            trigger.cancel();
        });

        let started = time::Instant::now();
        let out = race(std::future::pending::<()>(), Duration::from_secs(60), &cancel).await;
        assert_eq!(out, Err(RaceError::Cancelled));
        assert!(started.elapsed() < Duration::from_secs(1));
    }

    #[tokio::test(start_paused = true)]
    async fn ready_operation_beats_zero_deadline() {
        let cancel = CancellationToken::new();
        assert_eq!(race(async { 1 }, Duration::ZERO, &cancel).await, Ok(1));
    }
}
