//! Catalog store
//!
//! The published catalog lives in a GitHub gist: read through the raw file
//! URL, written with a gist PATCH.

use serde_json::json;

use crate::catalog::CatalogDocument;
use crate::config::StoreSettings;
use crate::error::{FetchCurrentError, PublishError};

/// Remote home of the catalog document
pub trait CatalogStore {
    fn fetch_current(&self) -> Result<CatalogDocument, FetchCurrentError>;

    /// Overwrite the remote document
    fn publish(&self, document: &CatalogDocument) -> Result<(), PublishError>;
}

/// Request body replacing the catalog file of a gist
pub fn gist_patch_body(
    file_name: &str,
    document: &CatalogDocument,
) -> Result<serde_json::Value, PublishError> {
    let content = document.to_json()?;
    Ok(json!({
        "files": {
            file_name: { "content": content }
        }
    }))
}

#[cfg(feature = "remote")]
pub use gist::GistStore;

#[cfg(feature = "remote")]
mod gist {
    use super::{gist_patch_body, CatalogStore};
    use crate::catalog::CatalogDocument;
    use crate::config::StoreSettings;
    use crate::error::{FetchCurrentError, PublishError};
    use crate::github::{REQUEST_TIMEOUT, USER_AGENT};

    /// Catalog stored as a file in a GitHub gist
    pub struct GistStore {
        agent: ureq::Agent,
        settings: StoreSettings,
    }

    impl GistStore {
        pub fn new(settings: StoreSettings) -> Self {
            Self {
                agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
                settings,
            }
        }
    }

    impl CatalogStore for GistStore {
        fn fetch_current(&self) -> Result<CatalogDocument, FetchCurrentError> {
            let url = self.settings.raw_file_url();
            let response = self
                .agent
                .get(&url)
                .set("User-Agent", USER_AGENT)
                .call()
                .map_err(|e| match e {
                    ureq::Error::Status(status, _) => FetchCurrentError::Status {
                        url: url.clone(),
                        status,
                    },
                    ureq::Error::Transport(t) => FetchCurrentError::Transport {
                        url: url.clone(),
                        reason: t.to_string(),
                    },
                })?;

            let content = response
                .into_string()
                .map_err(|e| FetchCurrentError::Transport {
                    url: url.clone(),
                    reason: e.to_string(),
                })?;

            Ok(CatalogDocument::from_json(&content)?)
        }

        fn publish(&self, document: &CatalogDocument) -> Result<(), PublishError> {
            let token = self
                .settings
                .token
                .as_deref()
                .ok_or_else(|| PublishError::Transport("no GitHub token configured".to_string()))?;
            let body = gist_patch_body(&self.settings.file_name, document)?;

            let result = self
                .agent
                .request("PATCH", &self.settings.gist_api_url())
                .set("User-Agent", USER_AGENT)
                .set("Authorization", &format!("token {}", token))
                .set("Accept", "application/vnd.github.v3+json")
                .send_json(body);

            match result {
                Ok(response) if response.status() == 200 => Ok(()),
                Ok(response) | Err(ureq::Error::Status(_, response)) => {
                    let status = response.status();
                    Err(PublishError::Rejected {
                        status,
                        body: response.into_string().unwrap_or_default(),
                    })
                }
                Err(ureq::Error::Transport(t)) => Err(PublishError::Transport(t.to_string())),
            }
        }
    }
}

/// Human readable location of the catalog, for log headers
pub fn describe(settings: &StoreSettings) -> String {
    format!("gist {}/{} ({})", settings.gist_owner, settings.gist_id, settings.file_name)
}
