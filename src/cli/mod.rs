//! CLI command implementations

mod context;
mod create;
mod list;
pub mod style;

pub use create::{CreateOptions, run_create};
pub use list::{ListOptions, OutputFormat, run_list};

use anstream::eprintln;
use cherrypicker::cherry_pick::{CherryPickState, ProgressCallback};
use style::{Stylize, check};

/// Progress reporter for `create`, writing to stderr
///
/// Git's own output is interleaved on the same streams, so every line is
/// printed immediately rather than drawn with a progress bar.
pub struct CliProgress {
    release_branch: String,
    branch_name: String,
}

impl CliProgress {
    /// Reporter for a run of `release_branch` onto `branch_name`
    pub fn new(release_branch: impl Into<String>, branch_name: impl Into<String>) -> Self {
        Self {
            release_branch: release_branch.into(),
            branch_name: branch_name.into(),
        }
    }
}

impl ProgressCallback for CliProgress {
    fn on_state(&self, state: &CherryPickState) {
        match state {
            CherryPickState::ReleaseBranchCheckedOut => {
                eprintln!("{} On {}", check(), self.release_branch.accent());
            }
            CherryPickState::Synced => {
                eprintln!("{} {} is up to date", check(), self.release_branch.accent());
            }
            CherryPickState::WorkingBranchCreated => {
                eprintln!("{} Created {}", check(), self.branch_name.accent());
            }
            CherryPickState::Idle
            | CherryPickState::Applying(_)
            | CherryPickState::Done
            | CherryPickState::Failed { .. } => {}
        }
    }

    fn on_message(&self, message: &str) {
        eprintln!();
        eprintln!("{}", message.emphasis());
    }
}
