use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NotesiteError {
    #[error("Note not found: {0}")]
    NoteNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid frontmatter in {}: {message}", path.display())]
    Frontmatter { path: PathBuf, message: String },

    #[error("Invalid category metadata in {}: {source}", path.display())]
    CategoryMeta {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, NotesiteError>;
