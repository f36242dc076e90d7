//! # API Facade
//!
//! `SiteApi` is the single entry point for everything a caller can ask of
//! the notes section. It owns the source, the configuration and the built
//! index.
//!
//! ## Lifecycle
//!
//! Loading is explicit and happens in two phases:
//!
//! 1. [`SiteApi::load`] reads every document and category file from the
//!    source and builds the index. Nothing is served before this completes.
//! 2. Queries (`all_notes`, `note_by_id`, `note_by_params`, `navigation`)
//!    read the finished index and never touch the source again.
//!
//! [`SiteApi::reload`] repeats phase 1 in full.
//!
//! ## What the API Does NOT Do
//!
//! - No stdout/stderr output or formatting; it returns data structures.
//! - No caching of rendered HTML; rendering runs on demand.
//!
//! ## Generic Over NoteSource
//!
//! - Production: `SiteApi<FileSource>`
//! - Testing: `SiteApi<InMemorySource>`

use crate::admonition::AdmonitionTable;
use crate::config::SiteConfig;
use crate::error::{NotesiteError, Result};
use crate::index::NoteIndex;
use crate::model::{CategoryWithNotes, NoteEntry};
use crate::render::{render_document, Heading, RenderedDocument};
use crate::source::NoteSource;
use serde::Serialize;

/// A note rendered for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedNote {
    pub id: String,
    pub title: String,
    pub url: String,
    pub html: String,
    pub headings: Vec<Heading>,
}

pub struct SiteApi<S: NoteSource> {
    source: S,
    config: SiteConfig,
    admonitions: AdmonitionTable,
    index: NoteIndex,
}

impl<S: NoteSource> SiteApi<S> {
    /// Scans the source and builds the index.
    pub fn load(source: S, config: SiteConfig) -> Result<Self> {
        let index = NoteIndex::from_source(&source, &config.index_options())?;
        let admonitions = config.admonition_table();
        Ok(Self {
            source,
            config,
            admonitions,
            index,
        })
    }

    /// Rebuilds the index from the source. On error the previous index stays.
    pub fn reload(&mut self) -> Result<()> {
        self.index = NoteIndex::from_source(&self.source, &self.config.index_options())?;
        Ok(())
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn all_notes(&self) -> &[NoteEntry] {
        self.index.all_notes()
    }

    pub fn note_by_id(&self, id: &str) -> Option<&NoteEntry> {
        self.index.note_by_id(id)
    }

    pub fn note_by_params<P: AsRef<str>>(&self, category: &str, segments: &[P]) -> Option<&NoteEntry> {
        self.index.note_by_params(category, segments)
    }

    /// Like [`Self::note_by_id`], but a miss is an error.
    pub fn require_note(&self, id: &str) -> Result<&NoteEntry> {
        self.note_by_id(id)
            .ok_or_else(|| NotesiteError::NoteNotFound(id.to_string()))
    }

    pub fn navigation(&self) -> &[CategoryWithNotes] {
        self.index.navigation()
    }

    pub fn render_note(&self, id: &str) -> Option<RenderedNote> {
        let note = self.note_by_id(id)?;
        let RenderedDocument { html, headings } = note.render(&self.admonitions);
        Some(RenderedNote {
            id: note.id.clone(),
            title: note.frontmatter.title.clone(),
            url: note.url.clone(),
            html,
            headings,
        })
    }

    /// Renders Markdown that is not part of the index.
    pub fn render_source(&self, markdown: &str) -> RenderedDocument {
        render_document(markdown, &self.admonitions)
    }
}
