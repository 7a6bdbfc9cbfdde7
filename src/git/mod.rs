//! Local working copy operations
//!
//! The orchestrator drives a working copy through `GitRunner` so tests can
//! substitute a recording fake for the real `git` binary.

mod cli;

pub use cli::GitCli;

use crate::error::Result;

/// Version-control operations on a single working copy
///
/// Methods take `&mut self`: the runner is the exclusive handle to the
/// working copy for the duration of a run.
pub trait GitRunner {
    /// Switch to an existing local branch
    fn checkout(&mut self, branch: &str) -> Result<()>;

    /// Create local `branch` tracking `remote_ref` and switch to it
    fn create_tracking_branch(&mut self, branch: &str, remote_ref: &str) -> Result<()>;

    /// Fast-forward the current branch to its upstream; never merges or rebases
    fn fast_forward_pull(&mut self) -> Result<()>;

    /// Create `name` from HEAD and switch to it
    fn create_branch(&mut self, name: &str) -> Result<()>;

    /// Apply the commit `sha` onto the current branch tip
    ///
    /// On conflict the working copy is left mid-cherry-pick.
    fn cherry_pick(&mut self, sha: &str) -> Result<()>;
}
