//! Release resolution
//!
//! Turns a project's latest GitHub release into the version, notes and
//! download archive that go into the catalog.

use crate::error::ResolutionError;
use crate::github::{GithubAsset, ReleaseFeed};

/// Asset whose content replaces the release notes
pub const NOTES_ASSET: &str = "readme.md";
/// Only assets with this suffix are offered for download
pub const ARCHIVE_EXTENSION: &str = ".zip";

/// Latest release of a tracked project, reduced to what the catalog needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRelease {
    pub version: String,
    pub description: String,
    pub download_url: String,
    pub size: u64,
}

/// Assets picked out of a release's asset list
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct AssetSelection<'a> {
    pub notes: Option<&'a GithubAsset>,
    pub download: Option<&'a GithubAsset>,
}

/// Pick the notes asset and the download archive.
///
/// Without a filter the first archive wins. With a filter only an archive
/// whose name matches it (case-insensitive) is selected, wherever it sits in
/// the list.
pub fn select_assets<'a>(assets: &'a [GithubAsset], filter: Option<&str>) -> AssetSelection<'a> {
    let mut selection = AssetSelection::default();

    for asset in assets {
        if asset.name.eq_ignore_ascii_case(NOTES_ASSET) {
            selection.notes = Some(asset);
        }

        if !asset.name.ends_with(ARCHIVE_EXTENSION) {
            continue;
        }

        match filter {
            None => {
                if selection.download.is_none() {
                    selection.download = Some(asset);
                }
            }
            Some(wanted) => {
                if asset.name.eq_ignore_ascii_case(wanted) {
                    selection.download = Some(asset);
                }
            }
        }
    }

    selection
}

/// Resolve the latest release of `repo`
pub fn resolve(
    feed: &impl ReleaseFeed,
    repo: &str,
    filter: Option<&str>,
) -> Result<ResolvedRelease, ResolutionError> {
    let release = feed.latest_release(repo)?;
    let selection = select_assets(&release.assets, filter);

    let download = selection.download.ok_or_else(|| ResolutionError::NoDataUrl {
        repo: repo.to_string(),
    })?;

    let description = match selection.notes {
        Some(notes) => feed.fetch_text(&notes.browser_download_url)?,
        None => release.body.unwrap_or_default(),
    };

    Ok(ResolvedRelease {
        version: release.tag_name,
        description,
        download_url: download.browser_download_url.clone(),
        size: download.size,
    })
}
