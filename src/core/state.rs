/// Observable phase of an [`Orchestrator`](crate::Orchestrator).
///
/// ```text
/// Idle ──start──► Attempting(0) ──► Attempting(1) ──► … ──► Succeeded | Exhausted
///                      │
///                      └──► ContextLost | Cancelled           (any attempt)
///
/// any ──dispose──► Disposed
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// No run started since creation or the last reset.
    Idle,
    /// Working on the queue entry at this index.
    Attempting(usize),
    /// A provider completed the check.
    Succeeded,
    /// Every queue entry failed or was skipped.
    Exhausted,
    /// The presentation context disappeared before a check could start.
    ContextLost,
    /// The consumer cancelled or dropped the run.
    Cancelled,
    /// The orchestrator was disposed.
    Disposed,
}

impl RunState {
    /// `true` once a run has ended (or the orchestrator is gone).
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RunState::Idle | RunState::Attempting(_))
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Attempting(_) => "attempting",
            RunState::Succeeded => "succeeded",
            RunState::Exhausted => "exhausted",
            RunState::ContextLost => "context_lost",
            RunState::Cancelled => "cancelled",
            RunState::Disposed => "disposed",
        }
    }
}
