//! # Presentation context handles.
//!
//! A check runs against an externally owned surface (a screen, a view, a session window).
//! The core never owns it: it holds a [`PresentationHandle`], a weak reference plus a liveness
//! query, and re-checks [`PresentationHandle::is_live`] before any step that needs the surface.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use livenessvisor::{PresentationHandle, Surface};
//!
//! let surface = Arc::new(Surface::new("main"));
//! let handle = PresentationHandle::new(&surface);
//! assert!(handle.is_live());
//!
//! surface.close();
//! assert!(!handle.is_live());
//!
//! let other = Arc::new(Surface::new("other"));
//! let handle = PresentationHandle::new(&other);
//! drop(other);
//! assert!(!handle.is_live());
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

/// Externally owned surface a check presents to.
pub trait Presentation: Send + Sync + 'static {
    /// Whether the surface can still be presented to.
    fn is_live(&self) -> bool;
}

/// Non-owning, liveness-checkable reference to a [`Presentation`].
#[derive(Clone)]
pub struct PresentationHandle {
    inner: Weak<dyn Presentation>,
}

impl PresentationHandle {
    /// Downgrades `context` into a handle.
    pub fn new<P: Presentation>(context: &Arc<P>) -> Self {
        let inner: Weak<dyn Presentation> = Arc::downgrade(context) as Weak<dyn Presentation>;
        Self { inner }
    }

    /// Downgrades an already type-erased context.
    pub fn from_dyn(context: &Arc<dyn Presentation>) -> Self {
        Self {
            inner: Arc::downgrade(context),
        }
    }

    /// A handle that is never live.
    pub fn detached() -> Self {
        let inner: Weak<dyn Presentation> = Weak::<Surface>::new();
        Self { inner }
    }

    /// `true` while the context is alive and reports itself live.
    pub fn is_live(&self) -> bool {
        self.inner.upgrade().is_some_and(|ctx| ctx.is_live())
    }
}

impl fmt::Debug for PresentationHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresentationHandle")
            .field("live", &self.is_live())
            .finish()
    }
}

/// Minimal [`Presentation`] that stays live until closed or dropped.
#[derive(Debug)]
pub struct Surface {
    name: String,
    open: AtomicBool,
}

impl Surface {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            open: AtomicBool::new(true),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Marks the surface as gone; handles stop reporting it live.
    pub fn close(&self) {
        self.open.store(false, Ordering::Release);
    }
}

impl Presentation for Surface {
    fn is_live(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_is_never_live() {
        assert!(!PresentationHandle::detached().is_live());
    }

    #[test]
    fn dyn_handle_tracks_owner() {
        let ctx: Arc<dyn Presentation> = Arc::new(Surface::new("s"));
        let handle = PresentationHandle::from_dyn(&ctx);
        assert!(handle.is_live());
        drop(ctx);
        assert!(!handle.is_live());
    }
}
