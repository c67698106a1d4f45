//! Error types for the catalog sync job
//!
//! Per-entry release failures are contained by the merge pipeline; the rest
//! are fatal for the run and surface through [`SyncError`].

use std::path::PathBuf;

use thiserror::Error;

/// Failure to resolve the latest release of a single tracked project.
#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("failed to decode release feed for {repo}: {reason}")]
    Decode { repo: String, reason: String },

    #[error("No data URL found for {repo}")]
    NoDataUrl { repo: String },
}

/// Failure to read the currently published catalog.
#[derive(Error, Debug)]
pub enum FetchCurrentError {
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("current catalog is not a valid document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Failure to write the candidate catalog.
#[derive(Error, Debug)]
pub enum PublishError {
    #[error("Failed to update gist: {status} {body}")]
    Rejected { status: u16, body: String },

    #[error("publish request failed: {0}")]
    Transport(String),

    #[error("failed to encode catalog: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Failure to load the tracked-entry configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("entry '{id}': {reason}")]
    Invalid { id: String, reason: String },
}

/// Fatal errors that abort a sync run.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("cannot fetch current catalog: {0}")]
    FetchCurrent(#[from] FetchCurrentError),

    #[error(transparent)]
    Publish(#[from] PublishError),
}

impl SyncError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            SyncError::Publish(PublishError::Rejected { .. }) => 1,
            _ => 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let rejected = SyncError::from(PublishError::Rejected {
            status: 422,
            body: "Validation Failed".to_string(),
        });
        assert_eq!(rejected.exit_code(), 1);
        assert_eq!(
            rejected.to_string(),
            "Failed to update gist: 422 Validation Failed"
        );

        let fetch = SyncError::from(FetchCurrentError::Status {
            url: "https://example.invalid/raw".to_string(),
            status: 404,
        });
        assert_eq!(fetch.exit_code(), 2);

        let transport = SyncError::from(PublishError::Transport("timed out".to_string()));
        assert_eq!(transport.exit_code(), 2);
    }
}
