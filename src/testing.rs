//! In-memory release feed and catalog store used by unit tests

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::catalog::CatalogDocument;
use crate::error::{FetchCurrentError, PublishError, ResolutionError};
use crate::github::{GithubAsset, GithubRelease, ReleaseFeed};
use crate::store::CatalogStore;

/// Asset served from a predictable URL; size is the name length
pub fn asset(name: &str) -> GithubAsset {
    GithubAsset {
        name: name.to_string(),
        browser_download_url: format!("https://downloads.example.org/{}", name),
        size: name.len() as u64,
    }
}

pub fn release(tag: &str, body: Option<&str>, assets: Vec<GithubAsset>) -> GithubRelease {
    GithubRelease {
        tag_name: tag.to_string(),
        body: body.map(str::to_string),
        assets,
    }
}

/// Repos without a release answer with HTTP 404
#[derive(Default)]
pub struct FakeFeed {
    releases: HashMap<String, GithubRelease>,
    texts: HashMap<String, String>,
    unreachable: Vec<String>,
}

impl FakeFeed {
    pub fn with_release(mut self, repo: &str, release: GithubRelease) -> Self {
        self.releases.insert(repo.to_string(), release);
        self
    }

    pub fn with_text(mut self, url: &str, text: &str) -> Self {
        self.texts.insert(url.to_string(), text.to_string());
        self
    }

    pub fn with_unreachable(mut self, repo: &str) -> Self {
        self.unreachable.push(repo.to_string());
        self
    }
}

impl ReleaseFeed for FakeFeed {
    fn latest_release(&self, repo: &str) -> Result<GithubRelease, ResolutionError> {
        let url = format!("https://api.example.org/repos/{}/releases/latest", repo);
        if self.unreachable.iter().any(|r| r == repo) {
            return Err(ResolutionError::Transport {
                url,
                reason: "connection refused".to_string(),
            });
        }
        self.releases
            .get(repo)
            .cloned()
            .ok_or(ResolutionError::Status { url, status: 404 })
    }

    fn fetch_text(&self, url: &str) -> Result<String, ResolutionError> {
        self.texts.get(url).cloned().ok_or(ResolutionError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}

/// Store holding one document; records every publish
pub struct FakeStore {
    current: Option<CatalogDocument>,
    reject_with: Option<(u16, String)>,
    pub published: RefCell<Vec<CatalogDocument>>,
    pub fetches: Cell<usize>,
}

impl FakeStore {
    pub fn new(current: CatalogDocument) -> Self {
        Self {
            current: Some(current),
            reject_with: None,
            published: RefCell::new(Vec::new()),
            fetches: Cell::new(0),
        }
    }

    /// Store whose current document cannot be read
    pub fn unreadable() -> Self {
        Self {
            current: None,
            ..Self::new(CatalogDocument::default())
        }
    }

    pub fn rejecting(mut self, status: u16, body: &str) -> Self {
        self.reject_with = Some((status, body.to_string()));
        self
    }
}

impl CatalogStore for FakeStore {
    fn fetch_current(&self) -> Result<CatalogDocument, FetchCurrentError> {
        self.fetches.set(self.fetches.get() + 1);
        self.current.clone().ok_or(FetchCurrentError::Status {
            url: "https://raw.example.org/localizations.json".to_string(),
            status: 500,
        })
    }

    fn publish(&self, document: &CatalogDocument) -> Result<(), PublishError> {
        if let Some((status, body)) = &self.reject_with {
            return Err(PublishError::Rejected {
                status: *status,
                body: body.clone(),
            });
        }
        self.published.borrow_mut().push(document.clone());
        Ok(())
    }
}
