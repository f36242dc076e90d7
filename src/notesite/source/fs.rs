use super::{CategoryDocument, NoteSource, SourceDocument, CATEGORY_FILENAME};
use crate::error::{NotesiteError, Result};
use crate::frontmatter::{parse_note_frontmatter, split_frontmatter};
use crate::model::CategoryMeta;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const NOTE_EXT: &str = "md";

/// Reads notes from `<site_root>/<notes_dir>`.
///
/// Documents are reported with paths relative to the site root, so the
/// indexer only ever looks for the notes root below the site.
pub struct FileSource {
    site_root: PathBuf,
    notes_root: PathBuf,
}

impl FileSource {
    pub fn for_site(site_root: &Path, notes_dir: &str) -> Self {
        Self {
            site_root: site_root.to_path_buf(),
            notes_root: site_root.join(notes_dir),
        }
    }

    /// Files under the notes root matching `keep`, sorted by path.
    ///
    /// A missing notes root yields no files.
    fn files_matching<F>(&self, keep: F) -> Result<Vec<PathBuf>>
    where
        F: Fn(&Path) -> bool,
    {
        if !self.notes_root.exists() {
            tracing::debug!(root = %self.notes_root.display(), "notes root does not exist");
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(&self.notes_root).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() && keep(entry.path()) {
                paths.push(entry.into_path());
            }
        }
        Ok(paths)
    }

    fn site_relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.site_root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }

    fn load_document(&self, path: PathBuf) -> Result<SourceDocument> {
        let content = fs::read_to_string(&path).map_err(NotesiteError::Io)?;
        let (yaml, body) = split_frontmatter(&content);

        let Some(yaml) = yaml else {
            return Err(NotesiteError::Frontmatter {
                path,
                message: "missing frontmatter block (a title is required)".to_string(),
            });
        };

        let frontmatter = parse_note_frontmatter(yaml).map_err(|e| NotesiteError::Frontmatter {
            path: path.clone(),
            message: e.to_string(),
        })?;

        Ok(SourceDocument {
            body: body.to_string(),
            path: self.site_relative(&path),
            frontmatter,
        })
    }

    fn load_category(&self, path: PathBuf) -> Result<CategoryDocument> {
        let content = fs::read_to_string(&path).map_err(NotesiteError::Io)?;
        match serde_json::from_str::<CategoryMeta>(&content) {
            Ok(meta) => Ok(CategoryDocument {
                path: self.site_relative(&path),
                meta,
            }),
            Err(source) => Err(NotesiteError::CategoryMeta { path, source }),
        }
    }
}

fn is_note(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some(NOTE_EXT)
}

fn is_category_file(path: &Path) -> bool {
    path.file_name().and_then(|n| n.to_str()) == Some(CATEGORY_FILENAME)
}

impl NoteSource for FileSource {
    fn documents(&self) -> Result<Vec<SourceDocument>> {
        self.files_matching(is_note)?
            .into_iter()
            .map(|path| self.load_document(path))
            .collect()
    }

    fn categories(&self) -> Result<Vec<CategoryDocument>> {
        self.files_matching(is_category_file)?
            .into_iter()
            .map(|path| self.load_category(path))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::{IndexOptions, NoteIndex};
    use tempfile::TempDir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn site() -> (TempDir, FileSource) {
        let dir = TempDir::new().unwrap();
        let source = FileSource::for_site(dir.path(), "docs/notes");
        (dir, source)
    }

    #[test]
    fn test_loads_markdown_notes_sorted() {
        let (dir, source) = site();
        write(dir.path(), "docs/notes/guides/setup.md", "---\ntitle: Setup\n---\nBody\n");
        write(dir.path(), "docs/notes/guides/advanced/tune.md", "---\ntitle: Tune\n---\n");
        write(dir.path(), "docs/notes/guides/readme.txt", "not a note");

        let docs = source.documents().unwrap();
        let titles: Vec<_> = docs.iter().map(|d| d.frontmatter.title.as_str()).collect();
        assert_eq!(titles, vec!["Tune", "Setup"]);
        assert_eq!(docs[1].body, "Body\n");
        assert_eq!(docs[1].path, PathBuf::from("docs/notes/guides/setup.md"));
    }

    #[test]
    fn test_loads_category_files() {
        let (dir, source) = site();
        write(
            dir.path(),
            "docs/notes/guides/_category_.json",
            r#"{ "label": "Guides", "position": 2 }"#,
        );
        write(dir.path(), "docs/notes/misc/_category_.json", "{}");

        let cats = source.categories().unwrap();
        assert_eq!(cats.len(), 2);
        assert_eq!(cats[0].meta.label.as_deref(), Some("Guides"));
        assert_eq!(cats[0].meta.position, Some(2.0));
        assert_eq!(cats[1].meta, CategoryMeta::default());
    }

    #[test]
    fn test_missing_root_is_empty() {
        let (_dir, source) = site();
        assert!(source.documents().unwrap().is_empty());
        assert!(source.categories().unwrap().is_empty());
    }

    #[test]
    fn test_missing_title_names_the_file() {
        let (dir, source) = site();
        write(dir.path(), "docs/notes/a/bad.md", "---\ndescription: x\n---\n");

        let err = source.documents().unwrap_err();
        match err {
            NotesiteError::Frontmatter { path, .. } => assert!(path.ends_with("a/bad.md")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_frontmatter_is_an_error() {
        let (dir, source) = site();
        write(dir.path(), "docs/notes/a/plain.md", "# Just markdown\n");
        assert!(matches!(
            source.documents(),
            Err(NotesiteError::Frontmatter { .. })
        ));
    }

    #[test]
    fn test_bad_category_json() {
        let (dir, source) = site();
        write(dir.path(), "docs/notes/a/_category_.json", "{ nope");
        assert!(matches!(
            source.categories(),
            Err(NotesiteError::CategoryMeta { .. })
        ));
    }

    #[test]
    fn test_site_inside_a_notes_folder() {
        let dir = TempDir::new().unwrap();
        let site_root = dir.path().join("docs/notes/mysite");
        write(&site_root, "docs/notes/guides/setup.md", "---\ntitle: Setup\n---\n");
        write(
            &site_root,
            "docs/notes/guides/_category_.json",
            r#"{ "label": "Guides" }"#,
        );

        let source = FileSource::for_site(&site_root, "docs/notes");
        let index = NoteIndex::from_source(&source, &IndexOptions::default()).unwrap();

        let note = index.note_by_id("guides/setup").unwrap();
        assert_eq!(note.url, "/notes/guides/setup");
        assert_eq!(index.navigation()[0].label, "Guides");
    }
}
