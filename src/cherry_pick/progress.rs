//! Progress reporting for cherry-pick runs

use super::CherryPickState;

/// Receives state transitions and messages while a plan executes
pub trait ProgressCallback {
    /// Called on every state transition, after the transition happened
    fn on_state(&self, state: &CherryPickState);

    /// Free-form status message
    fn on_message(&self, _message: &str) {}
}

/// Progress callback that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_state(&self, _state: &CherryPickState) {}
}
