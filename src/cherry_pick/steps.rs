//! Cherry-pick steps - pure description of what a run will do
//!
//! Used for `--dry-run` output and for naming the working branch. No I/O.

use crate::plan::CherryPickPlan;
use chrono::{DateTime, TimeZone};

/// Prefix for generated working branch names
pub const DEFAULT_BRANCH_PREFIX: &str = "cherrypick";

/// Default remote the release branch is tracked from
pub const DEFAULT_REMOTE: &str = "origin";

/// A single step of a cherry-pick run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CherryPickStep {
    /// Switch to the release branch, creating it from the remote if needed
    CheckoutRelease {
        /// Release branch name
        branch: String,
        /// Remote ref used when no local branch exists
        remote_ref: String,
    },
    /// Fast-forward the release branch
    Sync,
    /// Create and switch to the working branch
    CreateBranch {
        /// Working branch name
        name: String,
    },
    /// Cherry-pick one commit
    Apply {
        /// 1-based position in the plan
        position: usize,
        /// Number of commits in the plan
        total: usize,
        /// Commit sha
        sha: String,
        /// Commit subject
        message: String,
    },
}

impl std::fmt::Display for CherryPickStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CheckoutRelease { branch, remote_ref } => {
                write!(f, "checkout {branch} (or create from {remote_ref})")
            }
            Self::Sync => write!(f, "pull --ff-only"),
            Self::CreateBranch { name } => write!(f, "create branch {name}"),
            Self::Apply {
                position,
                total,
                sha,
                message,
            } => write!(f, "[{position}/{total}] cherry-pick {} {message}", short_sha(sha)),
        }
    }
}

/// First 12 characters of a sha
pub fn short_sha(sha: &str) -> &str {
    sha.get(..12).unwrap_or(sha)
}

/// Working branch name for a run started at `now`
///
/// Second resolution, so separate runs never collide.
pub fn working_branch_name<Tz: TimeZone>(prefix: &str, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("{prefix}-{}", now.format("%Y%m%d-%H%M%S"))
}

/// Every step a run of `plan` performs, in order
#[must_use]
pub fn plan_steps(plan: &CherryPickPlan, remote: &str, branch_name: &str) -> Vec<CherryPickStep> {
    let total = plan.commits.len();
    let mut steps = vec![
        CherryPickStep::CheckoutRelease {
            branch: plan.release_branch.clone(),
            remote_ref: format!("{remote}/{}", plan.release_branch),
        },
        CherryPickStep::Sync,
        CherryPickStep::CreateBranch {
            name: branch_name.to_string(),
        },
    ];
    steps.extend(
        plan.commits
            .iter()
            .enumerate()
            .map(|(i, commit)| CherryPickStep::Apply {
                position: i + 1,
                total,
                sha: commit.sha.clone(),
                message: commit.message.clone(),
            }),
    );
    steps
}
