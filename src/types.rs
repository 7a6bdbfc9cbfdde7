//! Core types for cherrypicker

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A commit on the head branch that the release branch does not contain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Full commit sha
    pub sha: String,
    /// First line of the commit message
    pub message: String,
    /// Author display name
    pub author: String,
    /// Author timestamp
    pub date: DateTime<Utc>,
    /// Web URL for the commit, when the platform provides one
    pub html_url: Option<String>,
}

impl Commit {
    /// Reduce a full commit message to its subject line
    pub fn subject_line(message: &str) -> &str {
        message.lines().next().unwrap_or_default()
    }
}

/// A pull request as seen by the label index
///
/// Built from an individual PR lookup because search results do not carry
/// the merge commit sha.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledPullRequest {
    /// PR number
    pub number: u64,
    /// PR title
    pub title: String,
    /// Sha of the commit that landed the PR (None if not merged)
    pub merge_commit_sha: Option<String>,
    /// Whether the PR is merged
    pub merged: bool,
    /// Label names on the PR
    pub labels: Vec<String>,
    /// Web URL for the PR
    pub html_url: String,
}

/// A missing commit, optionally annotated with the PR that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingCommit {
    /// The commit itself
    pub commit: Commit,
    /// Originating PR (set only when filtering by label)
    pub pull_request: Option<LabeledPullRequest>,
}

impl MissingCommit {
    /// Missing commit without PR annotation
    pub const fn bare(commit: Commit) -> Self {
        Self {
            commit,
            pull_request: None,
        }
    }

    /// Number of the originating PR, if annotated
    pub fn pr_number(&self) -> Option<u64> {
        self.pull_request.as_ref().map(|pr| pr.number)
    }
}

/// Ordered missing commits, oldest first, in replay order
pub type MissingCommitSet = Vec<MissingCommit>;

/// One page of results from a paginated API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Items on this page, in API order
    pub items: Vec<T>,
    /// Whether the API reported another page after this one
    pub has_next: bool,
    /// Size of the whole result set, when the API reports one
    pub total_count: Option<u64>,
}

impl<T> Page<T> {
    /// Page that is not followed by any other
    pub const fn last(items: Vec<T>) -> Self {
        Self {
            items,
            has_next: false,
            total_count: None,
        }
    }

    /// Page followed by at least one more
    pub const fn more(items: Vec<T>) -> Self {
        Self {
            items,
            has_next: true,
            total_count: None,
        }
    }

    /// Attach the reported size of the whole result set
    #[must_use]
    pub fn with_total_count(mut self, total_count: Option<u64>) -> Self {
        self.total_count = total_count;
        self
    }
}

/// Which missing commits to keep
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterMode {
    /// Every missing commit
    All,
    /// Only commits whose PR carries the label
    WithLabel(String),
    /// Only commits whose PR does not carry the label
    WithoutLabel(String),
}

impl FilterMode {
    /// Build a mode from mutually exclusive `--with-label` / `--without-label` values
    ///
    /// A blank label means no filter.
    pub fn from_flags(with_label: Option<String>, without_label: Option<String>) -> Self {
        let non_blank = |label: Option<String>| label.filter(|l| !l.trim().is_empty());
        match (non_blank(with_label), non_blank(without_label)) {
            (Some(label), _) => Self::WithLabel(label),
            (None, Some(label)) => Self::WithoutLabel(label),
            (None, None) => Self::All,
        }
    }

    /// Label this mode filters on, if any
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::All => None,
            Self::WithLabel(label) | Self::WithoutLabel(label) => Some(label),
        }
    }
}

impl std::fmt::Display for FilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::WithLabel(label) => write!(f, "with label {label:?}"),
            Self::WithoutLabel(label) => write!(f, "without label {label:?}"),
        }
    }
}

/// Repository the platform service talks to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformConfig {
    /// Repository owner (user or organization)
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom host (None for github.com)
    pub host: Option<String>,
}

impl PlatformConfig {
    /// `owner/repo`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Browser URL of the repository
    pub fn web_url(&self) -> String {
        let host = self.host.as_deref().unwrap_or("github.com");
        format!("https://{host}/{}/{}", self.owner, self.repo)
    }
}
