//! Mock platform service for testing

use async_trait::async_trait;
use cherrypicker::error::{Error, Result};
use cherrypicker::platform::PlatformService;
use cherrypicker::types::{Commit, LabeledPullRequest, Page, PlatformConfig};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Simple mock platform service for testing
///
/// Serves canned pages and PR details.
///
/// Features:
/// - Compare and search responses split into pages
/// - Call tracking for verification
/// - Error injection per page or per PR
/// - Peak in-flight PR detail fetches, for concurrency checks
pub struct MockPlatformService {
    config: PlatformConfig,
    compare_pages: Mutex<Vec<Vec<Commit>>>,
    search_pages: Mutex<Vec<Vec<u64>>>,
    search_total_count: Mutex<Option<u64>>,
    pr_details: Mutex<HashMap<u64, LabeledPullRequest>>,
    // Call tracking
    compare_calls: Mutex<Vec<(String, String, u32)>>,
    search_calls: Mutex<Vec<(String, u32)>>,
    get_pr_calls: Mutex<Vec<u64>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
    // Error injection
    error_on_compare_page: Mutex<Option<(u32, String)>>,
    error_on_search_page: Mutex<Option<(u32, String)>>,
    error_on_get_pr: Mutex<HashMap<u64, String>>,
}

impl MockPlatformService {
    /// Create a new mock with the given config
    pub fn with_config(config: PlatformConfig) -> Self {
        Self {
            config,
            compare_pages: Mutex::new(Vec::new()),
            search_pages: Mutex::new(Vec::new()),
            search_total_count: Mutex::new(None),
            pr_details: Mutex::new(HashMap::new()),
            compare_calls: Mutex::new(Vec::new()),
            search_calls: Mutex::new(Vec::new()),
            get_pr_calls: Mutex::new(Vec::new()),
            in_flight: AtomicUsize::new(0),
            peak_in_flight: AtomicUsize::new(0),
            error_on_compare_page: Mutex::new(None),
            error_on_search_page: Mutex::new(None),
            error_on_get_pr: Mutex::new(HashMap::new()),
        }
    }

    /// Create a mock for `acme/widgets`
    pub fn new() -> Self {
        Self::with_config(super::github_config())
    }

    // === Response setup ===

    /// Serve `pages` from `compare_commits`, one entry per page
    pub fn set_compare_pages(&self, pages: Vec<Vec<Commit>>) {
        *self.compare_pages.lock().unwrap() = pages;
    }

    /// Serve `pages` from `search_merged_prs_with_label`, one entry per page
    pub fn set_search_pages(&self, pages: Vec<Vec<u64>>) {
        *self.search_pages.lock().unwrap() = pages;
    }

    /// Report `total` as the search's `total_count` on every page
    pub fn set_search_total_count(&self, total: u64) {
        *self.search_total_count.lock().unwrap() = Some(total);
    }

    /// Set the response for `get_pull_request`
    pub fn set_pr(&self, pr: LabeledPullRequest) {
        self.pr_details.lock().unwrap().insert(pr.number, pr);
    }

    // === Error injection methods ===

    /// Make `compare_commits` fail on `page`
    pub fn fail_compare_page(&self, page: u32, msg: &str) {
        *self.error_on_compare_page.lock().unwrap() = Some((page, msg.to_string()));
    }

    /// Make `search_merged_prs_with_label` fail on `page`
    pub fn fail_search_page(&self, page: u32, msg: &str) {
        *self.error_on_search_page.lock().unwrap() = Some((page, msg.to_string()));
    }

    /// Make `get_pull_request` fail for `number`
    pub fn fail_get_pr(&self, number: u64, msg: &str) {
        self.error_on_get_pr
            .lock()
            .unwrap()
            .insert(number, msg.to_string());
    }

    // === Call inspection ===

    /// `(base, head, page)` for every compare call, in order
    pub fn get_compare_calls(&self) -> Vec<(String, String, u32)> {
        self.compare_calls.lock().unwrap().clone()
    }

    /// `(label, page)` for every search call, in order
    pub fn get_search_calls(&self) -> Vec<(String, u32)> {
        self.search_calls.lock().unwrap().clone()
    }

    /// PR numbers looked up, in call order
    pub fn get_pr_calls(&self) -> Vec<u64> {
        self.get_pr_calls.lock().unwrap().clone()
    }

    /// Most PR detail fetches observed in flight at once
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    /// Forget recorded calls, keeping responses
    pub fn reset_calls(&self) {
        self.compare_calls.lock().unwrap().clear();
        self.search_calls.lock().unwrap().clear();
        self.get_pr_calls.lock().unwrap().clear();
        self.peak_in_flight.store(0, Ordering::SeqCst);
    }
}

impl Default for MockPlatformService {
    fn default() -> Self {
        Self::new()
    }
}

fn page_of<T: Clone>(pages: &[Vec<T>], page: u32) -> Page<T> {
    let index = page.saturating_sub(1) as usize;
    let items = pages.get(index).cloned().unwrap_or_default();
    Page {
        items,
        has_next: index + 1 < pages.len(),
        total_count: None,
    }
}

#[async_trait]
impl PlatformService for MockPlatformService {
    async fn compare_commits(&self, base: &str, head: &str, page: u32) -> Result<Page<Commit>> {
        self.compare_calls
            .lock()
            .unwrap()
            .push((base.to_string(), head.to_string(), page));

        if let Some((fail_page, msg)) = self.error_on_compare_page.lock().unwrap().clone()
            && fail_page == page
        {
            return Err(Error::GitHubApi(msg));
        }

        Ok(page_of(&self.compare_pages.lock().unwrap(), page))
    }

    async fn search_merged_prs_with_label(&self, label: &str, page: u32) -> Result<Page<u64>> {
        self.search_calls
            .lock()
            .unwrap()
            .push((label.to_string(), page));

        if let Some((fail_page, msg)) = self.error_on_search_page.lock().unwrap().clone()
            && fail_page == page
        {
            return Err(Error::GitHubApi(msg));
        }

        let total = *self.search_total_count.lock().unwrap();
        Ok(page_of(&self.search_pages.lock().unwrap(), page).with_total_count(total))
    }

    async fn get_pull_request(&self, number: u64) -> Result<LabeledPullRequest> {
        self.get_pr_calls.lock().unwrap().push(number);

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if let Some(msg) = self.error_on_get_pr.lock().unwrap().get(&number) {
            return Err(Error::GitHubApi(msg.clone()));
        }

        self.pr_details
            .lock()
            .unwrap()
            .get(&number)
            .cloned()
            .ok_or_else(|| Error::GitHubApi(format!("PR #{number} not found")))
    }

    fn config(&self) -> &PlatformConfig {
        &self.config
    }
}
