//! Published catalog document
//!
//! The JSON document consumed by the launcher: a list of localization
//! entries plus a format version.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Version of the document layout written by this crate
pub const FORMAT_VERSION: u32 = 1;

/// Compatibility mode of a localization package
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    Compatible,
    New,
}

/// Font bundle shipped alongside a localization
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Font {
    pub url: String,
    pub hash: String,
}

/// A single published localization
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    pub id: String,
    pub version: String,
    pub name: String,
    pub flag: String,
    pub icon: String,
    pub description: String,
    pub authors: Vec<String>,
    pub url: String,
    /// Archive size in bytes; `None` when carried over from a previous run
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(alias = "font")]
    pub fonts: Font,
    pub format: Format,
}

/// The whole catalog as stored remotely
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CatalogDocument {
    pub localizations: Vec<CatalogEntry>,
    pub format_version: u32,
}

impl Default for CatalogDocument {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl CatalogDocument {
    pub fn new(localizations: Vec<CatalogEntry>) -> Self {
        Self {
            localizations,
            format_version: FORMAT_VERSION,
        }
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Pretty-printed JSON with two-space indentation
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.localizations.iter().find(|e| e.id == id)
    }

    /// Entries keyed by identifier
    pub fn by_id(&self) -> BTreeMap<&str, &CatalogEntry> {
        self.localizations.iter().map(|e| (e.id.as_str(), e)).collect()
    }

    /// True when both documents hold the same entries, ignoring order
    pub fn same_entries(&self, other: &CatalogDocument) -> bool {
        self.by_id() == other.by_id()
    }
}

#[cfg(test)]
pub(crate) fn sample_entry(id: &str, version: &str) -> CatalogEntry {
    CatalogEntry {
        id: id.to_string(),
        version: version.to_string(),
        name: format!("{} localization", id),
        flag: format!("https://cdn.example.org/{}/flag.svg", id),
        icon: format!("https://cdn.example.org/{}/icon.png", id),
        description: format!("Release notes for {} {}", id, version),
        authors: vec!["translator".to_string()],
        url: format!("https://github.com/team/{}/releases/download/{}/{}.zip", id, version, id),
        size: Some(1024),
        fonts: Font {
            url: "https://cdn.example.org/fonts.zip".to_string(),
            hash: "d41d8cd98f00b204e9800998ecf8427e".to_string(),
        },
        format: Format::Compatible,
    }
}
