//! Missing commit resolution
//!
//! Three pieces, leaf-first:
//! 1. Branch diff - every commit on head missing from the release branch
//! 2. Label index - merged PRs with a label, keyed by merge commit sha
//! 3. Compute - pure merge of the two into the ordered missing commit set

mod compute;
mod diff;
mod label_index;
mod pages;

pub use compute::{CommitFilter, compute_missing_commits};
pub use diff::fetch_branch_diff;
pub use label_index::{
    DEFAULT_DETAIL_CONCURRENCY, LabelIndex, LabelIndexOptions, build_label_index,
};
pub use pages::{ComparePages, LabelSearchPages, PageSource, Paginator};

use crate::cancel::CancellationFlag;
use crate::error::Result;
use crate::platform::PlatformService;
use crate::types::{FilterMode, MissingCommitSet};
use tracing::info;

/// Default branch commits are ported from
pub const DEFAULT_HEAD_BRANCH: &str = "main";

/// Options for missing commit resolution
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Branch the commits live on
    pub head_branch: String,
    /// Label index options (used only when filtering by label)
    pub label_index: LabelIndexOptions,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            head_branch: DEFAULT_HEAD_BRANCH.to_string(),
            label_index: LabelIndexOptions::default(),
        }
    }
}

/// Resolve the commits on the head branch that `release_branch` is missing
///
/// For label modes the label index is built first, then the diff is fetched
/// and filtered. The result is in diff order. Any fetch failure fails the
/// whole resolution.
pub async fn resolve_missing_commits(
    platform: &dyn PlatformService,
    release_branch: &str,
    mode: &FilterMode,
    options: &ResolveOptions,
    cancel: &CancellationFlag,
) -> Result<MissingCommitSet> {
    info!(
        repo = %platform.config().full_name(),
        release_branch,
        head = %options.head_branch,
        %mode,
        "resolving missing commits"
    );

    let index = match mode.label() {
        Some(label) => Some(
            build_label_index(platform, label, &options.label_index, cancel)
                .await
                .map_err(|e| e.context(format!("listing PRs with label {label:?}")))?,
        ),
        None => None,
    };

    let diff = fetch_branch_diff(platform, release_branch, &options.head_branch, cancel)
        .await
        .map_err(|e| e.context("comparing branches"))?;

    let filter = match (mode, index.as_ref()) {
        (FilterMode::WithLabel(_), Some(index)) => CommitFilter::WithLabel(index),
        (FilterMode::WithoutLabel(_), Some(index)) => CommitFilter::WithoutLabel(index),
        _ => CommitFilter::All,
    };

    let missing = compute_missing_commits(diff, filter);
    info!(count = missing.len(), "resolved missing commits");
    Ok(missing)
}
