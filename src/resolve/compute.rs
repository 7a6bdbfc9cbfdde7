//! Missing commit set computation - pure, no I/O
//!
//! Merges the ordered branch diff with the label index. Filtering keeps the
//! diff order exactly, so the result is always a valid replay order.

use crate::resolve::label_index::LabelIndex;
use crate::types::{Commit, MissingCommit, MissingCommitSet};

/// How to filter the diff against a label index
#[derive(Debug, Clone, Copy)]
pub enum CommitFilter<'a> {
    /// Keep every commit, no PR annotation
    All,
    /// Keep commits that are merge commits of labeled PRs, annotated with the PR
    WithLabel(&'a LabelIndex),
    /// Keep commits that are not merge commits of labeled PRs
    WithoutLabel(&'a LabelIndex),
}

/// Compute the missing commit set (PURE - no I/O, easily testable)
///
/// Runs in time linear in `diff.len()`.
#[must_use]
pub fn compute_missing_commits(diff: Vec<Commit>, filter: CommitFilter<'_>) -> MissingCommitSet {
    match filter {
        CommitFilter::All => diff.into_iter().map(MissingCommit::bare).collect(),
        CommitFilter::WithLabel(index) => diff
            .into_iter()
            .filter_map(|commit| {
                let pr = index.get(&commit.sha)?.clone();
                Some(MissingCommit {
                    commit,
                    pull_request: Some(pr),
                })
            })
            .collect(),
        CommitFilter::WithoutLabel(index) => diff
            .into_iter()
            .filter(|commit| !index.contains(&commit.sha))
            .map(MissingCommit::bare)
            .collect(),
    }
}
