//! Shared test helpers

#![allow(dead_code, unused_imports)]

mod mock_git;
mod mock_platform;

pub use mock_git::{GitCall, MockGitRunner};
pub use mock_platform::MockPlatformService;

use chrono::{DateTime, TimeZone, Utc};
use cherrypicker::types::{Commit, LabeledPullRequest, PlatformConfig};

/// Platform config for `acme/widgets` on github.com
pub fn github_config() -> PlatformConfig {
    PlatformConfig {
        owner: "acme".to_string(),
        repo: "widgets".to_string(),
        host: None,
    }
}

/// Fixed timestamp, `minutes` after a base time
pub fn at(minutes: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 8, minutes, 0).unwrap()
}

/// Commit with a message derived from its sha
pub fn make_commit(sha: &str) -> Commit {
    Commit {
        sha: sha.to_string(),
        message: format!("Change {sha}"),
        author: "Ada".to_string(),
        date: at(0),
        html_url: None,
    }
}

/// Merged PR whose merge commit is `sha`
pub fn make_pr(number: u64, sha: &str) -> LabeledPullRequest {
    LabeledPullRequest {
        number,
        title: format!("PR {number}"),
        merge_commit_sha: Some(sha.to_string()),
        merged: true,
        labels: vec!["backport".to_string()],
        html_url: format!("https://github.com/acme/widgets/pull/{number}"),
    }
}

/// PR that matched a search but never merged
pub fn make_unmerged_pr(number: u64) -> LabeledPullRequest {
    LabeledPullRequest {
        merge_commit_sha: None,
        merged: false,
        ..make_pr(number, "")
    }
}
