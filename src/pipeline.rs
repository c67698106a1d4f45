//! Catalog merge pipeline
//!
//! Resolves every tracked entry, falls back to the published entry when a
//! release cannot be resolved, and works out whether the catalog changed.

use crate::catalog::{CatalogDocument, CatalogEntry};
use crate::config::{TrackedEntries, TrackedEntry};
use crate::error::ResolutionError;
use crate::github::ReleaseFeed;
use crate::logging::{log_fetch, log_warning};
use crate::resolver::{resolve, ResolvedRelease};

/// What happened to a single tracked entry during a build
#[derive(Debug)]
pub enum EntryStatus {
    Resolved,
    /// Resolution failed; the published version, notes and URL were kept
    FellBack(ResolutionError),
    /// Resolution failed and nothing was published before
    Omitted(ResolutionError),
}

#[derive(Debug)]
pub struct EntryReport {
    pub id: String,
    pub status: EntryStatus,
}

/// Result of a pipeline run
#[derive(Debug)]
pub struct MergeOutcome {
    pub catalog: CatalogDocument,
    pub changed: bool,
    pub reports: Vec<EntryReport>,
}

impl MergeOutcome {
    pub fn count(&self, matches: impl Fn(&EntryStatus) -> bool) -> usize {
        self.reports.iter().filter(|r| matches(&r.status)).count()
    }
}

fn entry_from(tracked: &TrackedEntry, release: ResolvedRelease) -> CatalogEntry {
    CatalogEntry {
        id: tracked.id.clone(),
        version: release.version,
        name: tracked.name.clone(),
        flag: tracked.flag.clone(),
        icon: tracked.icon.clone(),
        description: release.description,
        authors: tracked.authors.clone(),
        url: release.download_url,
        size: Some(release.size),
        fonts: tracked.fonts.clone(),
        format: tracked.format,
    }
}

/// Reuse the published release fields; the size is not carried over
fn fallback_entry(tracked: &TrackedEntry, previous: &CatalogEntry) -> CatalogEntry {
    CatalogEntry {
        id: tracked.id.clone(),
        version: previous.version.clone(),
        name: tracked.name.clone(),
        flag: tracked.flag.clone(),
        icon: tracked.icon.clone(),
        description: previous.description.clone(),
        authors: tracked.authors.clone(),
        url: previous.url.clone(),
        size: None,
        fonts: tracked.fonts.clone(),
        format: tracked.format,
    }
}

/// Build the candidate catalog from the tracked entries.
///
/// Entries keep declaration order. A failing entry never stops the others.
pub fn build(
    tracked: &TrackedEntries,
    current: &CatalogDocument,
    feed: &impl ReleaseFeed,
) -> MergeOutcome {
    let mut localizations = Vec::with_capacity(tracked.len());
    let mut reports = Vec::with_capacity(tracked.len());

    for entry in tracked {
        let filter = entry.localization_asset.as_deref();
        let status = match resolve(feed, &entry.repo, filter) {
            Ok(release) => {
                log_fetch(&format!("{}: {} ({})", entry.id, release.version, entry.repo));
                localizations.push(entry_from(entry, release));
                EntryStatus::Resolved
            }
            Err(e) => {
                log_warning(&format!(
                    "Error getting latest release for {}: {}",
                    entry.id, e
                ));
                match current.get(&entry.id) {
                    Some(previous) => {
                        localizations.push(fallback_entry(entry, previous));
                        EntryStatus::FellBack(e)
                    }
                    None => EntryStatus::Omitted(e),
                }
            }
        };
        reports.push(EntryReport {
            id: entry.id.clone(),
            status,
        });
    }

    let catalog = CatalogDocument::new(localizations);
    let changed = !catalog.same_entries(current);

    MergeOutcome {
        catalog,
        changed,
        reports,
    }
}
