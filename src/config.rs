use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::catalog::{Font, Format};
use crate::error::ConfigError;

// ============================================================================
// Tracked Entries (localizations.toml)
// ============================================================================

/// A localization project declared in the config file.
/// The identifier is the TOML table name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackedEntry {
    #[serde(skip)]
    pub id: String,
    /// GitHub repository, `owner/name`
    pub repo: String,
    pub name: String,
    pub flag: String,
    pub icon: String,
    pub authors: Vec<String>,
    pub fonts: Font,
    pub format: Format,
    /// Asset to pick when a release ships more than one archive
    #[serde(default)]
    pub localization_asset: Option<String>,
}

impl TrackedEntry {
    fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: &str| ConfigError::Invalid {
            id: self.id.clone(),
            reason: reason.to_string(),
        };

        if self.id.trim().is_empty() {
            return Err(invalid("identifier must not be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(invalid("name must not be empty"));
        }

        let mut parts = self.repo.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(project), None) if !owner.is_empty() && !project.is_empty() => {}
            _ => return Err(invalid(&format!("repo '{}' is not in owner/name form", self.repo))),
        }

        if let Some(asset) = &self.localization_asset {
            if asset.trim().is_empty() {
                return Err(invalid("localization_asset must not be empty when set"));
            }
        }

        Ok(())
    }
}

/// All tracked entries, in declaration order
#[derive(Debug, Clone, Default)]
pub struct TrackedEntries {
    entries: Vec<TrackedEntry>,
}

impl TrackedEntries {
    /// Parse the config file contents
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let table: toml::Table = toml::from_str(content)?;

        let mut entries = Vec::with_capacity(table.len());
        for (id, value) in table {
            let mut entry: TrackedEntry = value.try_into().map_err(|e: toml::de::Error| {
                ConfigError::Invalid {
                    id: id.clone(),
                    reason: e.message().to_string(),
                }
            })?;
            entry.id = id;
            entry.validate()?;
            entries.push(entry);
        }

        Ok(Self { entries })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrackedEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<TrackedEntry>> for TrackedEntries {
    fn from(entries: Vec<TrackedEntry>) -> Self {
        Self { entries }
    }
}

impl<'a> IntoIterator for &'a TrackedEntries {
    type Item = &'a TrackedEntry;
    type IntoIter = std::slice::Iter<'a, TrackedEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// ============================================================================
// Store Settings
// ============================================================================

pub const DEFAULT_FILE_NAME: &str = "localizations.json";
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_RAW_URL: &str = "https://gist.githubusercontent.com";

/// Where the catalog lives and how to authenticate against it
#[derive(Debug, Clone)]
pub struct StoreSettings {
    pub gist_id: String,
    pub gist_owner: String,
    /// Only needed when publishing
    pub token: Option<String>,
    pub file_name: String,
    pub api_url: String,
    pub raw_url: String,
}

impl StoreSettings {
    pub fn new(gist_id: impl Into<String>, gist_owner: impl Into<String>) -> Self {
        Self {
            gist_id: gist_id.into(),
            gist_owner: gist_owner.into(),
            token: None,
            file_name: DEFAULT_FILE_NAME.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            raw_url: DEFAULT_RAW_URL.to_string(),
        }
    }

    /// Raw URL of the published catalog file
    pub fn raw_file_url(&self) -> String {
        format!(
            "{}/{}/{}/raw/{}",
            self.raw_url.trim_end_matches('/'),
            self.gist_owner,
            self.gist_id,
            self.file_name
        )
    }

    /// API endpoint used to update the gist
    pub fn gist_api_url(&self) -> String {
        format!("{}/gists/{}", self.api_url.trim_end_matches('/'), self.gist_id)
    }
}

/// Settings for a single run
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub config_path: PathBuf,
    pub store: StoreSettings,
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
[ukrainian]
repo = "team/limbus-ua"
name = "Українська"
flag = "https://cdn.example.org/ua.svg"
icon = "https://cdn.example.org/ua.png"
authors = ["first", "second"]
format = "new"
fonts = { url = "https://cdn.example.org/fonts.zip", hash = "abc" }

[korean-extended]
repo = "other/kr-ext"
name = "Korean Extended"
flag = "f"
icon = "i"
authors = []
format = "compatible"
localization_asset = "KR_Full.zip"
fonts = { url = "u", hash = "h" }

[arabic]
repo = "third/ar"
name = "Arabic"
flag = "f"
icon = "i"
authors = ["x"]
format = "compatible"
fonts = { url = "u", hash = "h" }
"#;

    #[test]
    fn test_parse_preserves_declaration_order() {
        let entries = TrackedEntries::from_toml(SAMPLE).unwrap();
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["ukrainian", "korean-extended", "arabic"]);

        let ua = entries.iter().next().unwrap();
        assert_eq!(ua.repo, "team/limbus-ua");
        assert_eq!(ua.format, Format::New);
        assert_eq!(ua.localization_asset, None);
        assert_eq!(ua.authors.len(), 2);

        let kr = entries.iter().nth(1).unwrap();
        assert_eq!(kr.localization_asset.as_deref(), Some("KR_Full.zip"));
    }

    #[test]
    fn test_rejects_unknown_format() {
        let content = SAMPLE.replace("format = \"new\"", "format = \"legacy\"");
        match TrackedEntries::from_toml(&content) {
            Err(ConfigError::Invalid { id, .. }) => assert_eq!(id, "ukrainian"),
            other => panic!("expected invalid entry, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_malformed_repo() {
        let content = SAMPLE.replace("repo = \"third/ar\"", "repo = \"third\"");
        match TrackedEntries::from_toml(&content) {
            Err(ConfigError::Invalid { id, reason }) => {
                assert_eq!(id, "arabic");
                assert!(reason.contains("owner/name"));
            }
            other => panic!("expected invalid entry, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_missing_field() {
        let content = SAMPLE.replace("name = \"Arabic\"\n", "");
        assert!(matches!(
            TrackedEntries::from_toml(&content),
            Err(ConfigError::Invalid { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let entries = TrackedEntries::load(file.path()).unwrap();
        assert_eq!(entries.len(), 3);

        let missing = TrackedEntries::load(Path::new("/nonexistent/localizations.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn test_store_urls() {
        let mut settings = StoreSettings::new("abc123", "owner");
        assert_eq!(
            settings.raw_file_url(),
            "https://gist.githubusercontent.com/owner/abc123/raw/localizations.json"
        );
        assert_eq!(settings.gist_api_url(), "https://api.github.com/gists/abc123");

        settings.api_url = "http://localhost:8080/".to_string();
        assert_eq!(settings.gist_api_url(), "http://localhost:8080/gists/abc123");
    }
}
