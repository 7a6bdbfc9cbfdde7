//! Branch diff resolution

use crate::cancel::CancellationFlag;
use crate::error::Result;
use crate::platform::PlatformService;
use crate::resolve::pages::{ComparePages, Paginator};
use crate::types::Commit;
use tracing::debug;

/// Fetch every commit reachable from `head` but not from `base`
///
/// Commits come back in comparison order (oldest first), concatenated across
/// pages without re-sorting. This is the order commits are later replayed
/// in, so a truncated list is never returned: any page failure fails the
/// whole call.
pub async fn fetch_branch_diff(
    platform: &dyn PlatformService,
    base: &str,
    head: &str,
    cancel: &CancellationFlag,
) -> Result<Vec<Commit>> {
    debug!(base, head, "fetching branch diff");

    let commits = Paginator::new(
        ComparePages {
            platform,
            base,
            head,
        },
        cancel,
    )
    .collect_all()
    .await?;

    debug!(base, head, count = commits.len(), "fetched branch diff");
    Ok(commits)
}
