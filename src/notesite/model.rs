use crate::admonition::AdmonitionTable;
use crate::render::{render_document, RenderedDocument};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Frontmatter as written in a note file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NoteFrontmatter {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<serde_yaml::Value>,
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub slug: Option<String>,
}

impl NoteFrontmatter {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            date: None,
            keywords: None,
            tags: None,
            slug: None,
        }
    }

    /// The date as text, whether YAML read it as a string or a number.
    pub fn raw_date(&self) -> Option<String> {
        match self.date.as_ref()? {
            serde_yaml::Value::String(s) => Some(s.clone()),
            serde_yaml::Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn with_date(mut self, date: &str) -> Self {
        self.date = Some(serde_yaml::Value::String(date.to_string()));
        self
    }

    pub fn with_slug(mut self, slug: &str) -> Self {
        self.slug = Some(slug.to_string());
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = Some(tags.iter().map(|t| t.to_string()).collect());
        self
    }
}

/// The frontmatter fields kept on an indexed note, with the date parsed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frontmatter {
    pub title: String,
    pub description: Option<String>,
    pub date: Option<DateTime<Utc>>,
    pub keywords: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NoteEntry {
    pub id: String,
    pub category: String,
    pub segments: Vec<String>,
    pub slug: String,
    pub url: String,
    pub frontmatter: Frontmatter,
    pub source_path: PathBuf,
    #[serde(skip)]
    pub body: String,
}

impl NoteEntry {
    /// Renders the body to HTML, admonitions included.
    pub fn render(&self, table: &AdmonitionTable) -> RenderedDocument {
        render_document(&self.body, table)
    }

    pub fn summary(&self) -> CategoryNoteItem {
        CategoryNoteItem {
            id: self.id.clone(),
            title: self.frontmatter.title.clone(),
            description: self.frontmatter.description.clone(),
            url: self.url.clone(),
            date: self.frontmatter.date,
            tags: self.frontmatter.tags.clone().unwrap_or_default(),
        }
    }
}

/// Contents of a `_category_.json` file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CategoryMeta {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub position: Option<f64>,
}

/// A note as listed in the navigation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryNoteItem {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub date: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryWithNotes {
    pub id: String,
    pub label: String,
    pub position: f64,
    pub notes: Vec<CategoryNoteItem>,
}
