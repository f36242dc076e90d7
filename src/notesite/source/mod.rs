//! # Note Sources
//!
//! This module defines where notes come from. The [`NoteSource`] trait hands
//! the indexer every Markdown note and every category metadata file in one
//! go, so the whole input set is known before any query is served.
//!
//! ## Implementations
//!
//! - [`fs::FileSource`]: walks `<site root>/<notes dir>` on disk
//!   - `*.md` files are notes (YAML frontmatter + Markdown body)
//!   - `_category_.json` files carry a category's label and position
//!
//! - [`memory::InMemorySource`]: documents held in memory, for tests
//!
//! ## Layout
//!
//! ```text
//! docs/notes/
//! ├── guides/
//! │   ├── _category_.json     # { "label": "Guides", "position": 1 }
//! │   ├── setup.md            # → guides/setup
//! │   └── advanced/
//! │       └── tuning.md       # → guides/advanced/tuning
//! └── journal/
//!     └── 2024-01-01.md       # → journal/2024-01-01
//! ```
//!
//! `FileSource` reports paths relative to the site root
//! (`docs/notes/guides/setup.md`). The indexer locates the notes root inside
//! each path, so a folder above the site that happens to be called
//! `docs/notes` never matches.

use crate::error::Result;
use crate::model::{CategoryMeta, NoteFrontmatter};
use std::path::PathBuf;

pub mod fs;
pub mod memory;

pub const CATEGORY_FILENAME: &str = "_category_.json";

/// A Markdown note as loaded from its source.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceDocument {
    pub path: PathBuf,
    pub frontmatter: NoteFrontmatter,
    pub body: String,
}

/// A category metadata file as loaded from its source.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryDocument {
    pub path: PathBuf,
    pub meta: CategoryMeta,
}

/// Abstract interface for loading the static note set.
pub trait NoteSource {
    /// All Markdown notes, in a stable order.
    fn documents(&self) -> Result<Vec<SourceDocument>>;

    /// All category metadata files, in a stable order.
    fn categories(&self) -> Result<Vec<CategoryDocument>>;
}
