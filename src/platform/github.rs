//! GitHub platform service implementation

use crate::error::{Error, Result};
use crate::platform::PlatformService;
use crate::types::{Commit, LabeledPullRequest, Page, PlatformConfig};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use octocrab::Octocrab;
use reqwest::Client;
use reqwest::header::LINK;
use serde::Deserialize;
use tracing::debug;

/// Page size requested from every paginated endpoint
const PER_PAGE: u8 = 100;

// REST response types for the compare endpoint

#[derive(Deserialize)]
struct CompareResponse {
    #[serde(default)]
    commits: Vec<CompareCommit>,
}

#[derive(Deserialize)]
struct CompareCommit {
    sha: String,
    html_url: Option<String>,
    commit: CommitDetail,
}

#[derive(Deserialize)]
struct CommitDetail {
    #[serde(default)]
    message: String,
    author: Option<CommitAuthor>,
}

#[derive(Deserialize)]
struct CommitAuthor {
    name: Option<String>,
    date: Option<DateTime<Utc>>,
}

impl From<CompareCommit> for Commit {
    fn from(c: CompareCommit) -> Self {
        let (author, date) = c
            .commit
            .author
            .map(|a| (a.name.unwrap_or_default(), a.date.unwrap_or_default()))
            .unwrap_or_default();
        Self {
            message: Self::subject_line(&c.commit.message).to_string(),
            sha: c.sha,
            author,
            date,
            html_url: c.html_url,
        }
    }
}

/// GitHub service using octocrab
///
/// Search and PR lookups go through octocrab. The compare endpoint is called
/// with raw HTTP so the `Link` header can be read for pagination.
pub struct GitHubService {
    client: Octocrab,
    config: PlatformConfig,
    /// Token for raw HTTP requests (compare)
    token: String,
    /// HTTP client for raw requests (compare)
    http_client: Client,
    /// API base URL for raw requests, without trailing slash
    api_base: String,
}

impl GitHubService {
    /// Create a new GitHub service
    pub fn new(token: &str, owner: String, repo: String, host: Option<String>) -> Result<Self> {
        let api_base = host.as_ref().map_or_else(
            || "https://api.github.com".to_string(),
            |h| format!("https://{h}/api/v3"),
        );
        Self::with_api_base(
            token,
            PlatformConfig { owner, repo, host },
            &api_base,
        )
    }

    /// Create a service against an explicit API base URL
    pub fn with_api_base(token: &str, config: PlatformConfig, api_base: &str) -> Result<Self> {
        let api_base = api_base.trim_end_matches('/').to_string();

        let client = Octocrab::builder()
            .personal_token(token.to_string())
            .base_uri(api_base.as_str())
            .map_err(|e| Error::GitHubApi(e.to_string()))?
            .build()
            .map_err(|e| Error::GitHubApi(e.to_string()))?;

        let http_client = Client::builder()
            .user_agent("cherrypicker")
            .build()
            .map_err(|e| Error::GitHubApi(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            config,
            token: token.to_string(),
            http_client,
            api_base,
        })
    }
}

/// Whether a `Link` response header advertises a next page
pub fn has_next_page(link_header: Option<&str>) -> bool {
    link_header.is_some_and(|link| {
        link.split(',')
            .any(|part| part.split(';').skip(1).any(|param| param.trim() == "rel=\"next\""))
    })
}

/// Search query for merged PRs in `config`'s repository carrying `label`
pub fn search_query(config: &PlatformConfig, label: &str) -> String {
    let label = if label.chars().any(char::is_whitespace) {
        format!("\"{label}\"")
    } else {
        label.to_string()
    };
    format!(
        "repo:{}/{} is:pr is:merged label:{label}",
        config.owner, config.repo
    )
}

#[async_trait]
impl PlatformService for GitHubService {
    async fn compare_commits(&self, base: &str, head: &str, page: u32) -> Result<Page<Commit>> {
        debug!(base, head, page, "comparing branches");

        let url = format!(
            "{}/repos/{}/{}/compare/{}...{}?per_page={PER_PAGE}&page={page}",
            self.api_base,
            self.config.owner,
            self.config.repo,
            urlencoding::encode(base),
            urlencoding::encode(head)
        );

        let response = self
            .http_client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28")
            .send()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to compare {base}...{head}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::GitHubApi(format!(
                "compare {base}...{head} returned {status}: {body}"
            )));
        }

        let has_next = has_next_page(
            response
                .headers()
                .get(LINK)
                .and_then(|value| value.to_str().ok()),
        );

        let body = response
            .text()
            .await
            .map_err(|e| Error::GitHubApi(format!("Failed to read comparison: {e}")))?;
        let comparison: CompareResponse = serde_json::from_str(&body)
            .map_err(|e| Error::GitHubApi(format!("Failed to parse comparison: {e}")))?;

        let items: Vec<Commit> = comparison.commits.into_iter().map(Commit::from).collect();
        debug!(page, count = items.len(), has_next, "compared branches");
        Ok(Page {
            items,
            has_next,
            total_count: None,
        })
    }

    async fn search_merged_prs_with_label(&self, label: &str, page: u32) -> Result<Page<u64>> {
        let query = search_query(&self.config, label);
        debug!(%query, page, "searching merged PRs");

        let results = self
            .client
            .search()
            .issues_and_pull_requests(&query)
            .sort("created")
            .order("desc")
            .per_page(PER_PAGE)
            .page(page)
            .send()
            .await?;

        if results.incomplete_results == Some(true) {
            return Err(Error::GitHubApi(format!(
                "search results incomplete for {query:?} (page {page}); GitHub timed out the query"
            )));
        }

        let items: Vec<u64> = results.items.iter().map(|issue| issue.number).collect();
        let has_next = results.next.is_some();
        debug!(page, count = items.len(), has_next, total = ?results.total_count, "searched merged PRs");
        Ok(Page {
            items,
            has_next,
            total_count: results.total_count,
        })
    }

    async fn get_pull_request(&self, number: u64) -> Result<LabeledPullRequest> {
        debug!(number, "getting PR");

        let pr = self
            .client
            .pulls(&self.config.owner, &self.config.repo)
            .get(number)
            .await?;

        let result = LabeledPullRequest {
            number: pr.number,
            title: pr.title.unwrap_or_default(),
            merge_commit_sha: pr.merge_commit_sha.filter(|sha| !sha.is_empty()),
            merged: pr.merged_at.is_some() || pr.merged.unwrap_or(false),
            labels: pr
                .labels
                .unwrap_or_default()
                .into_iter()
                .map(|label| label.name)
                .collect(),
            html_url: pr
                .html_url
                .as_ref()
                .map(ToString::to_string)
                .unwrap_or_default(),
        };

        debug!(number, merged = result.merged, sha = ?result.merge_commit_sha, "got PR");
        Ok(result)
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
