use super::{CategoryDocument, NoteSource, SourceDocument};
use crate::error::Result;
use crate::model::{CategoryMeta, NoteFrontmatter};
use std::path::PathBuf;

/// In-memory note source for testing and development.
/// Documents come back in insertion order.
#[derive(Debug, Default, Clone)]
pub struct InMemorySource {
    documents: Vec<SourceDocument>,
    categories: Vec<CategoryDocument>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_document(&mut self, path: impl Into<PathBuf>, frontmatter: NoteFrontmatter, body: &str) {
        self.documents.push(SourceDocument {
            path: path.into(),
            frontmatter,
            body: body.to_string(),
        });
    }

    pub fn add_category(&mut self, path: impl Into<PathBuf>, meta: CategoryMeta) {
        self.categories.push(CategoryDocument {
            path: path.into(),
            meta,
        });
    }
}

impl NoteSource for InMemorySource {
    fn documents(&self) -> Result<Vec<SourceDocument>> {
        Ok(self.documents.clone())
    }

    fn categories(&self) -> Result<Vec<CategoryDocument>> {
        Ok(self.categories.clone())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub const SITE_ROOT: &str = "/site/docs/notes";

    pub struct SourceFixture {
        pub source: InMemorySource,
    }

    impl Default for SourceFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl SourceFixture {
        pub fn new() -> Self {
            Self {
                source: InMemorySource::new(),
            }
        }

        /// Adds a note at `<SITE_ROOT>/<rel>`.
        pub fn with_note(mut self, rel: &str, title: &str) -> Self {
            self.source.add_document(
                format!("{}/{}", SITE_ROOT, rel),
                NoteFrontmatter::new(title),
                "",
            );
            self
        }

        pub fn with_dated_note(mut self, rel: &str, title: &str, date: &str) -> Self {
            self.source.add_document(
                format!("{}/{}", SITE_ROOT, rel),
                NoteFrontmatter::new(title).with_date(date),
                "",
            );
            self
        }

        pub fn with_body(mut self, rel: &str, title: &str, body: &str) -> Self {
            self.source.add_document(
                format!("{}/{}", SITE_ROOT, rel),
                NoteFrontmatter::new(title),
                body,
            );
            self
        }

        /// Adds `<SITE_ROOT>/<category>/_category_.json`.
        pub fn with_category(mut self, category: &str, label: &str, position: Option<f64>) -> Self {
            self.source.add_category(
                format!("{}/{}/_category_.json", SITE_ROOT, category),
                CategoryMeta {
                    label: Some(label.to_string()),
                    position,
                },
            );
            self
        }
    }
}
