//! Recording git runner for orchestrator tests

use cherrypicker::error::{Error, Result};
use cherrypicker::git::GitRunner;
use std::collections::HashSet;

/// A git operation the orchestrator asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GitCall {
    Checkout(String),
    CreateTrackingBranch(String, String),
    Pull,
    CreateBranch(String),
    CherryPick(String),
}

/// Git runner that records calls instead of touching a working copy
///
/// Features:
/// - Local branches that don't exist (checkout fails)
/// - Pull and branch creation failures
/// - Shas that conflict on cherry-pick
#[derive(Debug, Default)]
pub struct MockGitRunner {
    pub calls: Vec<GitCall>,
    missing_branches: HashSet<String>,
    fail_tracking: bool,
    fail_pull: bool,
    fail_create_branch: bool,
    conflicts: HashSet<String>,
}

impl MockGitRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `checkout(branch)` fail as if no local branch exists
    pub fn without_local_branch(mut self, branch: &str) -> Self {
        self.missing_branches.insert(branch.to_string());
        self
    }

    /// Make the tracking-branch fallback fail too
    pub fn failing_tracking(mut self) -> Self {
        self.fail_tracking = true;
        self
    }

    /// Make `fast_forward_pull` fail
    pub fn failing_pull(mut self) -> Self {
        self.fail_pull = true;
        self
    }

    /// Make `create_branch` fail
    pub fn failing_create_branch(mut self) -> Self {
        self.fail_create_branch = true;
        self
    }

    /// Make cherry-picking `sha` conflict
    pub fn conflicting(mut self, sha: &str) -> Self {
        self.conflicts.insert(sha.to_string());
        self
    }

    /// Shas passed to `cherry_pick`, in order
    pub fn cherry_picked(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                GitCall::CherryPick(sha) => Some(sha.clone()),
                _ => None,
            })
            .collect()
    }
}

impl GitRunner for MockGitRunner {
    fn checkout(&mut self, branch: &str) -> Result<()> {
        self.calls.push(GitCall::Checkout(branch.to_string()));
        if self.missing_branches.contains(branch) {
            return Err(Error::Git(format!(
                "`git checkout {branch}` exited with exit status: 1"
            )));
        }
        Ok(())
    }

    fn create_tracking_branch(&mut self, branch: &str, remote_ref: &str) -> Result<()> {
        self.calls.push(GitCall::CreateTrackingBranch(
            branch.to_string(),
            remote_ref.to_string(),
        ));
        if self.fail_tracking {
            return Err(Error::Git(format!("invalid reference: {remote_ref}")));
        }
        Ok(())
    }

    fn fast_forward_pull(&mut self) -> Result<()> {
        self.calls.push(GitCall::Pull);
        if self.fail_pull {
            return Err(Error::Git("Not possible to fast-forward, aborting.".to_string()));
        }
        Ok(())
    }

    fn create_branch(&mut self, name: &str) -> Result<()> {
        self.calls.push(GitCall::CreateBranch(name.to_string()));
        if self.fail_create_branch {
            return Err(Error::Git(format!("a branch named '{name}' already exists")));
        }
        Ok(())
    }

    fn cherry_pick(&mut self, sha: &str) -> Result<()> {
        self.calls.push(GitCall::CherryPick(sha.to_string()));
        if self.conflicts.contains(sha) {
            return Err(Error::Git(format!("could not apply {sha}")));
        }
        Ok(())
    }
}
