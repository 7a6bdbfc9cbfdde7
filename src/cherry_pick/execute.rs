//! Cherry-pick execution - effectful operations
//!
//! Drives a working copy through
//! `Idle → ReleaseBranchCheckedOut → Synced → WorkingBranchCreated →
//! Applying(1..=N) → Done`, stopping at the first commit that does not apply.
//! A failed cherry-pick is left in place for the user to resolve; nothing is
//! aborted, rolled back or retried.

use super::progress::ProgressCallback;
use crate::cancel::CancellationFlag;
use crate::error::{Error, Result};
use crate::git::GitRunner;
use crate::plan::CherryPickPlan;
use tracing::{debug, info, warn};

/// Where a cherry-pick run is
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CherryPickState {
    /// Nothing done yet
    Idle,
    /// Working copy is on the release branch
    ReleaseBranchCheckedOut,
    /// Release branch fast-forwarded to the remote
    Synced,
    /// Working branch created from the synced release branch
    WorkingBranchCreated,
    /// About to apply the commit at this 1-based position
    Applying(usize),
    /// Every commit applied
    Done,
    /// Commit at `position` did not apply; working copy left mid-cherry-pick
    Failed {
        /// 1-based position of the failing commit
        position: usize,
        /// Sha of the failing commit
        sha: String,
        /// Failure reported by git
        cause: String,
    },
}

impl std::fmt::Display for CherryPickState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::ReleaseBranchCheckedOut => write!(f, "release branch checked out"),
            Self::Synced => write!(f, "synced"),
            Self::WorkingBranchCreated => write!(f, "working branch created"),
            Self::Applying(position) => write!(f, "applying #{position}"),
            Self::Done => write!(f, "done"),
            Self::Failed { position, sha, .. } => write!(f, "failed at #{position} ({sha})"),
        }
    }
}

/// Options for executing a plan
#[derive(Debug, Clone)]
pub struct ExecuteOptions {
    /// Remote the release branch is tracked from
    pub remote: String,
    /// Name of the working branch to create
    pub branch_name: String,
}

/// How a run that reached the working branch ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CherryPickStatus {
    /// All commits applied
    Done,
    /// Commit at `position` failed to apply
    Failed {
        /// 1-based position of the failing commit
        position: usize,
        /// Sha of the failing commit
        sha: String,
        /// Failure reported by git
        cause: String,
    },
    /// Cancelled before applying the commit at `position`
    Cancelled {
        /// 1-based position of the first commit not attempted
        position: usize,
    },
}

/// Result of executing a plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CherryPickOutcome {
    /// Working branch the commits were applied to
    pub branch: String,
    /// Shas applied successfully, in order
    pub applied: Vec<String>,
    /// Number of commits in the plan
    pub total: usize,
    /// How the run ended
    pub status: CherryPickStatus,
}

impl CherryPickOutcome {
    /// Check if every planned commit was applied
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, CherryPickStatus::Done)
    }

    /// Terminal state of the run, if it reached one
    pub fn final_state(&self) -> Option<CherryPickState> {
        match &self.status {
            CherryPickStatus::Done => Some(CherryPickState::Done),
            CherryPickStatus::Failed {
                position,
                sha,
                cause,
            } => Some(CherryPickState::Failed {
                position: *position,
                sha: sha.clone(),
                cause: cause.clone(),
            }),
            CherryPickStatus::Cancelled { .. } => None,
        }
    }

    /// Convert a halted run into an error carrying position and sha
    pub fn into_result(self) -> Result<Self> {
        match self.status {
            CherryPickStatus::Failed {
                position,
                sha,
                cause,
            } => Err(Error::CherryPickHalted {
                position,
                total: self.total,
                sha,
                cause,
            }),
            CherryPickStatus::Cancelled { .. } => Err(Error::Cancelled),
            CherryPickStatus::Done => Ok(self),
        }
    }
}

/// Execute a cherry-pick plan (EFFECTFUL)
///
/// Failures while preparing the working branch are returned as errors; the
/// run halts before any commit is applied. Once the working branch exists,
/// the run ends in a [`CherryPickOutcome`] whose status tells whether every
/// commit applied or where it stopped.
pub fn execute_cherry_pick_plan(
    plan: &CherryPickPlan,
    git: &mut dyn GitRunner,
    options: &ExecuteOptions,
    progress: &dyn ProgressCallback,
    cancel: &CancellationFlag,
) -> Result<CherryPickOutcome> {
    plan.validate()?;
    let total = plan.commits.len();
    let release = plan.release_branch.as_str();
    progress.on_state(&CherryPickState::Idle);

    cancel.check()?;
    if let Err(checkout_err) = git.checkout(release) {
        debug!(release, error = %checkout_err, "no local release branch, creating tracking branch");
        let remote_ref = format!("{}/{release}", options.remote);
        git.create_tracking_branch(release, &remote_ref)
            .map_err(|e| {
                e.context(format!(
                    "checking out {release} (checkout failed: {checkout_err})"
                ))
            })?;
    }
    progress.on_state(&CherryPickState::ReleaseBranchCheckedOut);

    cancel.check()?;
    git.fast_forward_pull()
        .map_err(|e| e.context(format!("pulling latest {release}")))?;
    progress.on_state(&CherryPickState::Synced);

    cancel.check()?;
    git.create_branch(&options.branch_name)
        .map_err(|e| e.context(format!("creating branch {}", options.branch_name)))?;
    progress.on_state(&CherryPickState::WorkingBranchCreated);
    info!(branch = %options.branch_name, release, total, "working branch created");

    let mut applied = Vec::with_capacity(total);
    for (i, commit) in plan.commits.iter().enumerate() {
        let position = i + 1;

        if cancel.is_cancelled() {
            warn!(position, total, "cancelled before applying commit");
            return Ok(CherryPickOutcome {
                branch: options.branch_name.clone(),
                applied,
                total,
                status: CherryPickStatus::Cancelled { position },
            });
        }

        progress.on_state(&CherryPickState::Applying(position));
        progress.on_message(&format!("[{position}/{total}] Cherry-picking {}", commit.sha));

        if let Err(e) = git.cherry_pick(&commit.sha) {
            let cause = e.to_string();
            warn!(position, total, sha = %commit.sha, %cause, "cherry-pick failed");
            let status = CherryPickStatus::Failed {
                position,
                sha: commit.sha.clone(),
                cause,
            };
            let outcome = CherryPickOutcome {
                branch: options.branch_name.clone(),
                applied,
                total,
                status,
            };
            if let Some(state) = outcome.final_state() {
                progress.on_state(&state);
            }
            return Ok(outcome);
        }

        debug!(position, sha = %commit.sha, "applied commit");
        applied.push(commit.sha.clone());
    }

    progress.on_state(&CherryPickState::Done);
    info!(branch = %options.branch_name, applied = applied.len(), "cherry-pick complete");

    Ok(CherryPickOutcome {
        branch: options.branch_name.clone(),
        applied,
        total,
        status: CherryPickStatus::Done,
    })
}
