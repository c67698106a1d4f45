//! GitHub release feed
//!
//! Release/asset types shared by the resolver, plus the blocking API client.

use serde::Deserialize;

use crate::error::ResolutionError;

/// GitHub release metadata
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct GithubRelease {
    pub tag_name: String,
    pub body: Option<String>,
    pub assets: Vec<GithubAsset>,
}

/// GitHub release asset
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct GithubAsset {
    pub name: String,
    pub browser_download_url: String,
    pub size: u64,
}

/// Source of release metadata and asset contents
pub trait ReleaseFeed {
    /// Latest published release of `repo` (`owner/name`)
    fn latest_release(&self, repo: &str) -> Result<GithubRelease, ResolutionError>;

    /// Download a text asset
    fn fetch_text(&self, url: &str) -> Result<String, ResolutionError>;
}

#[cfg(feature = "remote")]
pub use client::GithubApi;

/// Sent with every request; GitHub rejects anonymous user agents
#[cfg(feature = "remote")]
pub(crate) const USER_AGENT: &str = concat!("catalog-sync/", env!("CARGO_PKG_VERSION"));

#[cfg(feature = "remote")]
pub(crate) const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(60);

#[cfg(feature = "remote")]
mod client {
    use super::{GithubRelease, ReleaseFeed, REQUEST_TIMEOUT, USER_AGENT};
    use crate::config::DEFAULT_API_URL;
    use crate::error::ResolutionError;

    /// Blocking client for the GitHub releases API
    pub struct GithubApi {
        agent: ureq::Agent,
        api_url: String,
    }

    impl Default for GithubApi {
        fn default() -> Self {
            Self::new(DEFAULT_API_URL)
        }
    }

    impl GithubApi {
        pub fn new(api_url: impl Into<String>) -> Self {
            Self {
                agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
                api_url: api_url.into(),
            }
        }

        fn get(&self, url: &str) -> Result<ureq::Response, ResolutionError> {
            self.agent
                .get(url)
                .set("User-Agent", USER_AGENT)
                .call()
                .map_err(|e| match e {
                    ureq::Error::Status(status, _) => ResolutionError::Status {
                        url: url.to_string(),
                        status,
                    },
                    ureq::Error::Transport(t) => ResolutionError::Transport {
                        url: url.to_string(),
                        reason: t.to_string(),
                    },
                })
        }
    }

    impl ReleaseFeed for GithubApi {
        fn latest_release(&self, repo: &str) -> Result<GithubRelease, ResolutionError> {
            let url = format!(
                "{}/repos/{}/releases/latest",
                self.api_url.trim_end_matches('/'),
                repo
            );
            self.get(&url)?
                .into_json()
                .map_err(|e| ResolutionError::Decode {
                    repo: repo.to_string(),
                    reason: e.to_string(),
                })
        }

        fn fetch_text(&self, url: &str) -> Result<String, ResolutionError> {
            self.get(url)?
                .into_string()
                .map_err(|e| ResolutionError::Transport {
                    url: url.to_string(),
                    reason: e.to_string(),
                })
        }
    }
}
