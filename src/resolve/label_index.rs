//! Label index: merged PRs carrying a label, keyed by merge commit sha

use crate::cancel::CancellationFlag;
use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::resolve::pages::{LabelSearchPages, Paginator};
use crate::types::LabeledPullRequest;
use futures::stream::{self, StreamExt, TryStreamExt};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Default number of PR detail fetches in flight at once
pub const DEFAULT_DETAIL_CONCURRENCY: usize = 4;

/// Options for building a label index
#[derive(Debug, Clone)]
pub struct LabelIndexOptions {
    /// Max concurrent PR detail fetches (values below 1 are treated as 1)
    pub detail_concurrency: usize,
}

impl Default for LabelIndexOptions {
    fn default() -> Self {
        Self {
            detail_concurrency: DEFAULT_DETAIL_CONCURRENCY,
        }
    }
}

/// Merged PRs carrying a label, keyed by merge commit sha
#[derive(Debug, Clone, Default)]
pub struct LabelIndex {
    label: String,
    by_merge_sha: HashMap<String, LabeledPullRequest>,
}

impl LabelIndex {
    /// Create an empty index for `label`
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            by_merge_sha: HashMap::new(),
        }
    }

    /// Label this index was built for
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Add a PR under its merge commit sha
    ///
    /// PRs that are not merged or have no merge commit are skipped and
    /// `false` is returned. A PR sharing a merge sha with an earlier entry
    /// replaces it.
    pub fn insert(&mut self, pr: LabeledPullRequest) -> bool {
        let sha = match pr.merge_commit_sha.as_deref() {
            Some(sha) if pr.merged && !sha.is_empty() => sha.to_string(),
            _ => {
                warn!(
                    pr = pr.number,
                    label = %self.label,
                    "search matched PR that is not merged, skipping"
                );
                return false;
            }
        };

        if let Some(previous) = self.by_merge_sha.insert(sha.clone(), pr) {
            debug!(%sha, replaced = previous.number, "merge sha already indexed, later PR wins");
        }
        true
    }

    /// PR whose merge commit is `sha`
    pub fn get(&self, sha: &str) -> Option<&LabeledPullRequest> {
        self.by_merge_sha.get(sha)
    }

    /// Whether `sha` is the merge commit of a labeled PR
    pub fn contains(&self, sha: &str) -> bool {
        self.by_merge_sha.contains_key(sha)
    }

    /// Number of indexed merge commits
    pub fn len(&self) -> usize {
        self.by_merge_sha.len()
    }

    /// Whether the index is empty
    pub fn is_empty(&self) -> bool {
        self.by_merge_sha.is_empty()
    }
}

/// Build the label index for `label`
///
/// Pages through the merged-PR search, then fetches each hit individually to
/// learn its merge commit sha. Detail fetches run up to
/// `options.detail_concurrency` at a time but are consumed in search order.
/// The first failed fetch fails the whole build, and so does a search that
/// yields fewer PRs than it reports matching (GitHub stops paging searches at
/// 1000 results).
pub async fn build_label_index(
    platform: &dyn PlatformService,
    label: &str,
    options: &LabelIndexOptions,
    cancel: &CancellationFlag,
) -> Result<LabelIndex> {
    debug!(label, "building label index");

    let mut search = Paginator::new(LabelSearchPages { platform, label }, cancel);
    let mut numbers = Vec::new();
    while let Some(page) = search.next_page().await? {
        numbers.extend(page);
    }
    if let Some(total) = search.reported_total()
        && (numbers.len() as u64) < total
    {
        return Err(Error::GitHubApi(format!(
            "search for label {label:?} returned {} of {total} PRs; results are incomplete",
            numbers.len()
        )));
    }
    debug!(label, matches = numbers.len(), "search complete, fetching PR details");

    let details: Vec<LabeledPullRequest> = stream::iter(numbers)
        .map(move |number| async move {
            cancel.check()?;
            platform
                .get_pull_request(number)
                .await
                .map_err(|e| e.context(format!("getting PR #{number}")))
        })
        .buffered(options.detail_concurrency.max(1))
        .try_collect()
        .await?;

    let mut index = LabelIndex::new(label);
    for pr in details {
        index.insert(pr);
    }

    debug!(label, indexed = index.len(), "built label index");
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pr(number: u64, sha: Option<&str>, merged: bool) -> LabeledPullRequest {
        LabeledPullRequest {
            number,
            title: format!("PR {number}"),
            merge_commit_sha: sha.map(ToString::to_string),
            merged,
            labels: vec!["backport".to_string()],
            html_url: format!("https://github.com/acme/widgets/pull/{number}"),
        }
    }

    #[test]
    fn test_insert_indexes_by_merge_sha() {
        let mut index = LabelIndex::new("backport");
        assert!(index.insert(pr(7, Some("abc"), true)));

        assert!(index.contains("abc"));
        assert_eq!(index.get("abc").map(|p| p.number), Some(7));
        assert_eq!(index.len(), 1);
        assert_eq!(index.label(), "backport");
    }

    #[test]
    fn test_insert_skips_unmerged() {
        let mut index = LabelIndex::new("backport");
        assert!(!index.insert(pr(1, Some("test-merge-sha"), false)));
        assert!(!index.insert(pr(2, None, true)));
        assert!(!index.insert(pr(3, Some(""), true)));
        assert!(index.is_empty());
    }

    #[test]
    fn test_duplicate_sha_later_wins() {
        let mut index = LabelIndex::new("backport");
        index.insert(pr(1, Some("abc"), true));
        index.insert(pr(2, Some("abc"), true));

        assert_eq!(index.len(), 1);
        assert_eq!(index.get("abc").map(|p| p.number), Some(2));
    }
}
