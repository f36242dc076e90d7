//! # Note Index
//!
//! Builds the navigation structure of the notes section from the loaded
//! documents. Every note gets an identifier derived from its location:
//!
//! ```text
//! /site/docs/notes/guides/advanced/tuning.md
//!                  ^^^^^^ ^^^^^^^^ ^^^^^^
//!                  category  dirs   slug (or frontmatter `slug`)
//!
//! id  = guides/advanced/tuning
//! url = /notes/guides/advanced/tuning
//! ```
//!
//! Documents whose path does not contain the notes root, or that sit directly
//! in it without a category folder, are skipped. Skips are only visible in
//! debug logs.
//!
//! ## Ordering
//!
//! Inside a category, dated notes come first, newest first; undated notes
//! follow, ordered by title. Categories are ordered by their
//! `_category_.json` position, then by label. Categories without metadata
//! take the last position.
//!
//! The index is built once and never changes; every query reads the
//! precomputed structures.

use crate::collate::Collator;
use crate::error::Result;
use crate::model::{
    CategoryMeta, CategoryNoteItem, CategoryWithNotes, Frontmatter, NoteEntry,
};
use crate::source::{CategoryDocument, NoteSource, SourceDocument};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;

pub const DEFAULT_NOTES_DIR: &str = "docs/notes";
pub const DEFAULT_URL_PREFIX: &str = "/notes/";

/// Position given to categories without metadata, so they sort last.
pub const LAST_POSITION: f64 = f64::MAX;

const NOTE_SUFFIX: &str = ".md";

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

#[derive(Debug, Clone, PartialEq)]
pub struct IndexOptions {
    /// Notes root, relative to the site root (e.g. `docs/notes`).
    pub notes_dir: String,
    /// Prepended to each identifier to form the URL.
    pub url_prefix: String,
    pub collator: Collator,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            notes_dir: DEFAULT_NOTES_DIR.to_string(),
            url_prefix: DEFAULT_URL_PREFIX.to_string(),
            collator: Collator::default(),
        }
    }
}

impl IndexOptions {
    /// The text that marks the notes root inside a path, e.g. `/docs/notes/`.
    pub fn root_marker(&self) -> String {
        let dir = self.notes_dir.replace('\\', "/");
        format!("/{}/", dir.trim_matches('/'))
    }
}

/// Forward slashes only, always starting with `/`.
pub fn normalize_path(path: &Path) -> String {
    let normalized = path.to_string_lossy().replace('\\', "/");
    if normalized.starts_with('/') {
        normalized
    } else {
        format!("/{}", normalized)
    }
}

/// The part of `normalized` that follows the notes root marker.
pub fn relative_to_root<'a>(normalized: &'a str, marker: &str) -> Option<&'a str> {
    normalized.split(marker).nth(1).filter(|rest| !rest.is_empty())
}

/// Parses a frontmatter date. Dates without an offset are read as UTC.
pub fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.and_utc());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
        }
    }
    None
}

/// Derives the index entry of one document, or `None` if it has no place in
/// the notes tree.
pub fn derive_entry(doc: SourceDocument, options: &IndexOptions) -> Option<NoteEntry> {
    let normalized = normalize_path(&doc.path);
    let marker = options.root_marker();

    let Some(relative) = relative_to_root(&normalized, &marker) else {
        tracing::debug!(path = %normalized, root = %marker, "skipping note outside notes root");
        return None;
    };

    let mut segments: Vec<&str> = relative.split('/').collect();
    let file_name = segments.pop().filter(|name| !name.is_empty())?;
    let Some(category) = segments.first().filter(|c| !c.is_empty()) else {
        tracing::debug!(path = %normalized, "skipping note without a category folder");
        return None;
    };
    let category = category.to_string();

    let slug = doc.frontmatter.slug.clone().unwrap_or_else(|| {
        file_name
            .strip_suffix(NOTE_SUFFIX)
            .unwrap_or(file_name)
            .to_string()
    });

    let mut id_segments: Vec<String> = Vec::with_capacity(segments.len() + 1);
    id_segments.push(category.clone());
    id_segments.extend(segments[1..].iter().map(|s| s.to_string()));
    id_segments.push(slug.clone());

    let id = id_segments.join("/");
    let url = format!("{}{}", options.url_prefix, id);

    let date = doc.frontmatter.raw_date().and_then(|raw| {
        let parsed = parse_date(&raw);
        if parsed.is_none() {
            tracing::debug!(id = %id, date = %raw, "ignoring unparseable date");
        }
        parsed
    });

    let fm = doc.frontmatter;
    Some(NoteEntry {
        id,
        category,
        segments: id_segments,
        slug,
        url,
        frontmatter: Frontmatter {
            title: fm.title,
            description: fm.description,
            date,
            keywords: fm.keywords,
            tags: fm.tags,
        },
        source_path: doc.path,
        body: doc.body,
    })
}

/// Maps each category to its metadata.
///
/// A `_category_.json` directly inside the category folder wins over one in
/// a nested folder of the same category. Files directly in the notes root
/// belong to no category and are ignored.
pub fn category_metadata(
    documents: Vec<CategoryDocument>,
    options: &IndexOptions,
) -> HashMap<String, CategoryMeta> {
    let marker = options.root_marker();
    let mut found: HashMap<String, (bool, CategoryMeta)> = HashMap::new();

    for doc in documents {
        let normalized = normalize_path(&doc.path);
        let Some(relative) = relative_to_root(&normalized, &marker) else {
            tracing::debug!(path = %normalized, "skipping category file outside notes root");
            continue;
        };
        let segments: Vec<&str> = relative.split('/').collect();
        if segments.len() < 2 || segments[0].is_empty() {
            continue;
        }

        let direct = segments.len() == 2;
        let replace = match found.get(segments[0]) {
            Some((existing_direct, _)) => direct || !existing_direct,
            None => true,
        };
        if replace {
            found.insert(segments[0].to_string(), (direct, doc.meta));
        }
    }

    found
        .into_iter()
        .map(|(category, (_, meta))| (category, meta))
        .collect()
}

fn compare_notes(a: &CategoryNoteItem, b: &CategoryNoteItem, collator: &Collator) -> Ordering {
    match (a.date, b.date) {
        (Some(a_date), Some(b_date)) => b_date.cmp(&a_date),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => collator.compare(&a.title, &b.title),
    }
}

fn compare_categories(
    a: &CategoryWithNotes,
    b: &CategoryWithNotes,
    collator: &Collator,
) -> Ordering {
    match a.position.partial_cmp(&b.position) {
        Some(Ordering::Equal) | None => collator.compare(&a.label, &b.label),
        Some(ordering) => ordering,
    }
}

/// Groups notes by category and orders both levels.
pub fn group_notes(
    notes: &[NoteEntry],
    metadata: &HashMap<String, CategoryMeta>,
    collator: &Collator,
) -> Vec<CategoryWithNotes> {
    let mut groups: Vec<CategoryWithNotes> = Vec::new();
    let mut group_of: HashMap<&str, usize> = HashMap::new();

    for note in notes {
        let idx = *group_of.entry(note.category.as_str()).or_insert_with(|| {
            let meta = metadata.get(&note.category);
            groups.push(CategoryWithNotes {
                id: note.category.clone(),
                label: meta
                    .and_then(|m| m.label.clone())
                    .unwrap_or_else(|| note.category.clone()),
                position: meta.and_then(|m| m.position).unwrap_or(LAST_POSITION),
                notes: Vec::new(),
            });
            groups.len() - 1
        });
        groups[idx].notes.push(note.summary());
    }

    for group in &mut groups {
        group.notes.sort_by(|a, b| compare_notes(a, b, collator));
    }
    groups.sort_by(|a, b| compare_categories(a, b, collator));
    groups
}

/// The indexed notes section.
#[derive(Debug, Clone, Default)]
pub struct NoteIndex {
    notes: Vec<NoteEntry>,
    by_id: HashMap<String, usize>,
    navigation: Vec<CategoryWithNotes>,
}

impl NoteIndex {
    /// Loads everything from `source`, then builds the index.
    pub fn from_source<S: NoteSource>(source: &S, options: &IndexOptions) -> Result<Self> {
        let documents = source.documents()?;
        let categories = source.categories()?;
        Ok(Self::build(documents, categories, options))
    }

    pub fn build(
        documents: Vec<SourceDocument>,
        categories: Vec<CategoryDocument>,
        options: &IndexOptions,
    ) -> Self {
        let mut notes: Vec<NoteEntry> = Vec::new();
        let mut by_id: HashMap<String, usize> = HashMap::new();

        for doc in documents {
            let Some(entry) = derive_entry(doc, options) else {
                continue;
            };
            match by_id.get(&entry.id) {
                Some(&pos) => {
                    tracing::warn!(
                        id = %entry.id,
                        replaced = %notes[pos].source_path.display(),
                        by = %entry.source_path.display(),
                        "duplicate note identifier"
                    );
                    notes[pos] = entry;
                }
                None => {
                    by_id.insert(entry.id.clone(), notes.len());
                    notes.push(entry);
                }
            }
        }

        let metadata = category_metadata(categories, options);
        let navigation = group_notes(&notes, &metadata, &options.collator);

        tracing::info!(
            notes = notes.len(),
            categories = navigation.len(),
            "indexed notes"
        );

        Self {
            notes,
            by_id,
            navigation,
        }
    }

    /// Every note, in load order.
    pub fn all_notes(&self) -> &[NoteEntry] {
        &self.notes
    }

    pub fn note_by_id(&self, id: &str) -> Option<&NoteEntry> {
        self.by_id.get(id).map(|&pos| &self.notes[pos])
    }

    /// Looks up `category/segment/.../slug`.
    pub fn note_by_params<S: AsRef<str>>(&self, category: &str, segments: &[S]) -> Option<&NoteEntry> {
        let mut id = category.to_string();
        for segment in segments {
            id.push('/');
            id.push_str(segment.as_ref());
        }
        self.note_by_id(&id)
    }

    /// Categories with their notes, in display order.
    pub fn navigation(&self) -> &[CategoryWithNotes] {
        &self.navigation
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}
