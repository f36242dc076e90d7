//! # Admonition Kinds
//!
//! The closed set of callout kinds recognized in container directives, and the
//! style table that maps each kind to its heading label, icon and CSS class.
//!
//! The kind set is fixed. Only the labels are configurable (see
//! [`AdmonitionTable::with_label`]), so a site can ship English headings
//! instead of the default Traditional Chinese ones.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdmonitionKind {
    Note,
    Tip,
    Info,
    Warning,
    Danger,
}

impl AdmonitionKind {
    pub const ALL: [AdmonitionKind; 5] = [
        AdmonitionKind::Note,
        AdmonitionKind::Tip,
        AdmonitionKind::Info,
        AdmonitionKind::Warning,
        AdmonitionKind::Danger,
    ];

    /// The directive name, e.g. `note` in `:::note`.
    pub fn as_str(&self) -> &'static str {
        match self {
            AdmonitionKind::Note => "note",
            AdmonitionKind::Tip => "tip",
            AdmonitionKind::Info => "info",
            AdmonitionKind::Warning => "warning",
            AdmonitionKind::Danger => "danger",
        }
    }

    pub fn default_label(&self) -> &'static str {
        match self {
            AdmonitionKind::Note => "筆記",
            AdmonitionKind::Tip => "提示",
            AdmonitionKind::Info => "資訊",
            AdmonitionKind::Warning => "警告",
            AdmonitionKind::Danger => "危險",
        }
    }

    /// Bootstrap Icons class for the heading glyph.
    pub fn icon(&self) -> &'static str {
        match self {
            AdmonitionKind::Note => "bi-pencil-square",
            AdmonitionKind::Tip => "bi-lightbulb",
            AdmonitionKind::Info => "bi-info-circle",
            AdmonitionKind::Warning => "bi-exclamation-triangle",
            AdmonitionKind::Danger => "bi-x-octagon",
        }
    }

    pub fn class_name(&self) -> &'static str {
        self.as_str()
    }
}

impl std::fmt::Display for AdmonitionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AdmonitionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "note" => Ok(AdmonitionKind::Note),
            "tip" => Ok(AdmonitionKind::Tip),
            "info" => Ok(AdmonitionKind::Info),
            "warning" => Ok(AdmonitionKind::Warning),
            "danger" => Ok(AdmonitionKind::Danger),
            _ => Err(format!("Unknown admonition kind: {}", s)),
        }
    }
}

/// How one admonition kind is presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmonitionStyle {
    pub label: String,
    pub icon: String,
    pub class_name: String,
}

impl AdmonitionStyle {
    fn for_kind(kind: AdmonitionKind) -> Self {
        Self {
            label: kind.default_label().to_string(),
            icon: kind.icon().to_string(),
            class_name: kind.class_name().to_string(),
        }
    }
}

/// Kind → style lookup used by the rewriter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdmonitionTable {
    styles: BTreeMap<AdmonitionKind, AdmonitionStyle>,
}

static DEFAULT_TABLE: Lazy<AdmonitionTable> = Lazy::new(|| AdmonitionTable {
    styles: AdmonitionKind::ALL
        .iter()
        .map(|kind| (*kind, AdmonitionStyle::for_kind(*kind)))
        .collect(),
});

impl Default for AdmonitionTable {
    fn default() -> Self {
        DEFAULT_TABLE.clone()
    }
}

impl AdmonitionTable {
    /// Looks up a directive name. Unknown names yield `None`.
    pub fn lookup(&self, name: &str) -> Option<(AdmonitionKind, &AdmonitionStyle)> {
        let kind = AdmonitionKind::from_str(name).ok()?;
        self.styles.get(&kind).map(|style| (kind, style))
    }

    pub fn style(&self, kind: AdmonitionKind) -> &AdmonitionStyle {
        // Every kind is inserted at construction and never removed.
        &self.styles[&kind]
    }

    /// Replaces the default heading label of one kind.
    pub fn with_label(mut self, kind: AdmonitionKind, label: impl Into<String>) -> Self {
        if let Some(style) = self.styles.get_mut(&kind) {
            style.label = label.into();
        }
        self
    }

    /// Applies label overrides keyed by directive name, ignoring unknown names.
    pub fn with_labels<'a, I>(self, labels: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        labels.into_iter().fold(self, |table, (name, label)| {
            match AdmonitionKind::from_str(name) {
                Ok(kind) => table.with_label(kind, label.clone()),
                Err(_) => {
                    tracing::warn!(name = %name, "ignoring label for unknown admonition kind");
                    table
                }
            }
        })
    }
}
