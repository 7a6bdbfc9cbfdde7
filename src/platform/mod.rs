//! Platform services for the hosted repository
//!
//! Provides one-page-at-a-time access to the branch comparison, PR search and
//! PR detail endpoints. Pagination loops live in `resolve`, not here.

mod detection;
mod factory;
mod github;

pub use detection::parse_repo_ref;
pub use factory::create_platform_service;
pub use github::{GitHubService, has_next_page, search_query};

use crate::error::Result;
use crate::types::{Commit, LabeledPullRequest, Page, PlatformConfig};
use async_trait::async_trait;

/// Platform service trait for the paginated fetches the resolver needs
///
/// Each call returns exactly one page plus whether another page follows.
/// Implementations must not retry; failures propagate to the caller.
#[async_trait]
pub trait PlatformService: Send + Sync {
    /// Commits reachable from `head` but not from `base`, one page at a time
    ///
    /// Pages are 1-based. Within a page, commits are in the order the
    /// comparison emits them (oldest first).
    async fn compare_commits(&self, base: &str, head: &str, page: u32) -> Result<Page<Commit>>;

    /// Numbers of merged PRs carrying `label`, one search page at a time
    ///
    /// Search results do not include merge commit shas; callers resolve
    /// those with [`get_pull_request`](Self::get_pull_request).
    async fn search_merged_prs_with_label(&self, label: &str, page: u32) -> Result<Page<u64>>;

    /// Full details for a single PR, including its merge commit sha
    async fn get_pull_request(&self, number: u64) -> Result<LabeledPullRequest>;

    /// Get the platform configuration
    fn config(&self) -> &PlatformConfig;
}
