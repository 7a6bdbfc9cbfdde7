//! Lazy page sequences over the platform's paginated endpoints
//!
//! A `Paginator` yields pages one at a time until the source reports no
//! next page. It holds no results itself, so accumulation and merging stay
//! with the caller, and `restart` replays the sequence from page 1.

use crate::cancel::CancellationFlag;
use crate::error::Result;
use crate::platform::PlatformService;
use crate::types::{Commit, Page};
use async_trait::async_trait;
use tracing::debug;

/// Something that can fetch page `n` of a result set
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Item type on each page
    type Item: Send;

    /// Fetch a single 1-based page
    async fn fetch_page(&self, page: u32) -> Result<Page<Self::Item>>;

    /// Short description for error context, e.g. `compare v1.2...main`
    fn describe(&self) -> String;
}

/// Finite page sequence over a [`PageSource`]
pub struct Paginator<'a, S: PageSource> {
    source: S,
    next: Option<u32>,
    reported_total: Option<u64>,
    cancel: &'a CancellationFlag,
}

impl<'a, S: PageSource> Paginator<'a, S> {
    /// Start a sequence at page 1
    pub const fn new(source: S, cancel: &'a CancellationFlag) -> Self {
        Self {
            source,
            next: Some(1),
            reported_total: None,
            cancel,
        }
    }

    /// Reset to page 1
    pub const fn restart(&mut self) {
        self.next = Some(1);
        self.reported_total = None;
    }

    /// Result set size reported by the most recent page that carried one
    pub const fn reported_total(&self) -> Option<u64> {
        self.reported_total
    }

    /// Whether the sequence has been drained
    pub const fn is_exhausted(&self) -> bool {
        self.next.is_none()
    }

    /// Fetch the next page, or `None` once the source reported the last one
    ///
    /// A failed fetch leaves the sequence where it was; the error carries the
    /// source description and page number.
    pub async fn next_page(&mut self) -> Result<Option<Vec<S::Item>>> {
        let Some(page) = self.next else {
            return Ok(None);
        };
        self.cancel.check()?;

        let fetched = self
            .source
            .fetch_page(page)
            .await
            .map_err(|e| e.context(format!("{} page {page}", self.source.describe())))?;

        self.next = fetched.has_next.then_some(page + 1);
        if fetched.total_count.is_some() {
            self.reported_total = fetched.total_count;
        }
        Ok(Some(fetched.items))
    }

    /// Drain every remaining page, concatenated in page order
    ///
    /// Any failure discards what was already fetched.
    pub async fn collect_all(mut self) -> Result<Vec<S::Item>> {
        let mut items = Vec::new();
        let mut pages = 0u32;
        while let Some(page_items) = self.next_page().await? {
            items.extend(page_items);
            pages += 1;
        }
        debug!(source = %self.source.describe(), pages, count = items.len(), "collected all pages");
        Ok(items)
    }
}

/// Pages of the branch comparison
pub struct ComparePages<'p> {
    /// Platform to fetch from
    pub platform: &'p dyn PlatformService,
    /// Branch the commits are missing from
    pub base: &'p str,
    /// Branch the commits are on
    pub head: &'p str,
}

#[async_trait]
impl<'p> PageSource for ComparePages<'p> {
    type Item = Commit;

    async fn fetch_page(&self, page: u32) -> Result<Page<Commit>> {
        self.platform.compare_commits(self.base, self.head, page).await
    }

    fn describe(&self) -> String {
        format!("compare {}...{}", self.base, self.head)
    }
}

/// Pages of the merged-PR label search
pub struct LabelSearchPages<'p> {
    /// Platform to fetch from
    pub platform: &'p dyn PlatformService,
    /// Label to search for
    pub label: &'p str,
}

#[async_trait]
impl<'p> PageSource for LabelSearchPages<'p> {
    type Item = u64;

    async fn fetch_page(&self, page: u32) -> Result<Page<u64>> {
        self.platform.search_merged_prs_with_label(self.label, page).await
    }

    fn describe(&self) -> String {
        format!("search merged PRs labeled {:?}", self.label)
    }
}
