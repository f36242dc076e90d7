use crate::admonition::AdmonitionTable;
use crate::collate::{parse_locale, Collator, DEFAULT_LOCALE};
use crate::error::{NotesiteError, Result};
use crate::index::{IndexOptions, DEFAULT_NOTES_DIR, DEFAULT_URL_PREFIX};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const CONFIG_FILENAME: &str = "notesite.json";

/// Keys accepted by [`SiteConfig::get`] and [`SiteConfig::set`].
pub const CONFIG_KEYS: &[&str] = &["notes-dir", "url-prefix", "locale"];

/// Site configuration, stored in `<site root>/notesite.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteConfig {
    /// Notes root relative to the site root.
    #[serde(default = "default_notes_dir")]
    pub notes_dir: String,

    /// Prefix of every note URL, with leading and trailing slash.
    #[serde(default = "default_url_prefix")]
    pub url_prefix: String,

    /// Locale used to order titles and labels.
    #[serde(default = "default_locale")]
    pub locale: String,

    /// Admonition heading labels by kind name (e.g. `"tip": "Hint"`).
    #[serde(default)]
    pub admonition_labels: BTreeMap<String, String>,
}

fn default_notes_dir() -> String {
    DEFAULT_NOTES_DIR.to_string()
}

fn default_url_prefix() -> String {
    DEFAULT_URL_PREFIX.to_string()
}

fn default_locale() -> String {
    DEFAULT_LOCALE.to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            notes_dir: default_notes_dir(),
            url_prefix: default_url_prefix(),
            locale: default_locale(),
            admonition_labels: BTreeMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load config from the site root, or return defaults if not found
    pub fn load<P: AsRef<Path>>(site_root: P) -> Result<Self> {
        let config_path = site_root.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(NotesiteError::Io)?;
        let config: SiteConfig =
            serde_json::from_str(&content).map_err(NotesiteError::Serialization)?;
        Ok(config)
    }

    /// Save config to the site root
    pub fn save<P: AsRef<Path>>(&self, site_root: P) -> Result<()> {
        let site_root = site_root.as_ref();

        if !site_root.exists() {
            fs::create_dir_all(site_root).map_err(NotesiteError::Io)?;
        }

        let config_path = site_root.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(NotesiteError::Serialization)?;
        fs::write(config_path, content).map_err(NotesiteError::Io)?;
        Ok(())
    }

    /// Set the URL prefix (normalizes to start and end with a slash)
    pub fn set_url_prefix(&mut self, prefix: &str) {
        let trimmed = prefix.trim().trim_matches('/');
        self.url_prefix = if trimmed.is_empty() {
            "/".to_string()
        } else {
            format!("/{}/", trimmed)
        };
    }

    /// Set the notes directory (normalizes separators, no surrounding slashes)
    pub fn set_notes_dir(&mut self, dir: &str) -> Result<()> {
        let normalized = dir.trim().replace('\\', "/");
        let normalized = normalized.trim_matches('/');
        if normalized.is_empty() {
            return Err(NotesiteError::Config(
                "notes-dir must name a directory below the site root".to_string(),
            ));
        }
        self.notes_dir = normalized.to_string();
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "notes-dir" => Some(self.notes_dir.clone()),
            "url-prefix" => Some(self.url_prefix.clone()),
            "locale" => Some(self.locale.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "notes-dir" => self.set_notes_dir(value),
            "url-prefix" => {
                self.set_url_prefix(value);
                Ok(())
            }
            "locale" => {
                let locale = parse_locale(value).map_err(NotesiteError::Config)?;
                self.locale = locale.to_string();
                Ok(())
            }
            other => Err(NotesiteError::Config(format!(
                "Unknown config key: {} (expected one of: {})",
                other,
                CONFIG_KEYS.join(", ")
            ))),
        }
    }

    pub fn collator(&self) -> Collator {
        Collator::new(self.locale.clone())
    }

    pub fn index_options(&self) -> IndexOptions {
        IndexOptions {
            notes_dir: self.notes_dir.clone(),
            url_prefix: self.url_prefix.clone(),
            collator: self.collator(),
        }
    }

    /// The default admonition table with the configured label overrides.
    pub fn admonition_table(&self) -> AdmonitionTable {
        AdmonitionTable::default().with_labels(&self.admonition_labels)
    }
}
