//! Sync run: fetch the published catalog, rebuild it, publish on change

use crate::catalog::CatalogDocument;
use crate::config::TrackedEntries;
use crate::error::SyncError;
use crate::github::ReleaseFeed;
use crate::logging::{log_info, log_publish};
use crate::pipeline::{build, EntryStatus, MergeOutcome};
use crate::store::CatalogStore;

#[derive(Debug)]
pub enum SyncOutcome {
    Unchanged,
    Published,
    /// Dry run; the candidate was built but not written
    Skipped {
        catalog: CatalogDocument,
        changed: bool,
    },
}

fn log_summary(outcome: &MergeOutcome) {
    let resolved = outcome.count(|s| matches!(s, EntryStatus::Resolved));
    let fell_back = outcome.count(|s| matches!(s, EntryStatus::FellBack(_)));
    let omitted = outcome.count(|s| matches!(s, EntryStatus::Omitted(_)));
    log_info(&format!(
        "{} resolved, {} kept from previous catalog, {} omitted",
        resolved, fell_back, omitted
    ));
}

/// Run one sync. Per-entry release failures are absorbed; only a failed
/// catalog fetch or publish aborts the run.
pub fn run(
    tracked: &TrackedEntries,
    store: &impl CatalogStore,
    feed: &impl ReleaseFeed,
    dry_run: bool,
) -> Result<SyncOutcome, SyncError> {
    let current = store.fetch_current()?;
    log_info(&format!(
        "Current catalog has {} localizations, {} tracked",
        current.localizations.len(),
        tracked.len()
    ));

    let outcome = build(tracked, &current, feed);
    log_summary(&outcome);

    if dry_run {
        return Ok(SyncOutcome::Skipped {
            catalog: outcome.catalog,
            changed: outcome.changed,
        });
    }

    if !outcome.changed {
        log_info("No changes to the localizations");
        return Ok(SyncOutcome::Unchanged);
    }

    store.publish(&outcome.catalog)?;
    log_publish("Gist updated successfully");
    Ok(SyncOutcome::Published)
}
