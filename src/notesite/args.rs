use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "notesite", version = get_version())]
#[command(about = "Index and render the notes section of a Markdown site", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Site root (the directory holding notesite.json and the notes folder)
    #[arg(short = 'C', long = "site", global = true, default_value = ".")]
    pub site_root: PathBuf,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print categories and their notes in navigation order
    Nav {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// List every note with its id and URL
    #[command(alias = "ls")]
    List,

    /// Show a note's metadata and headings
    Show {
        /// Category folder of the note
        category: String,

        /// Remaining path segments, ending with the slug
        #[arg(num_args = 0..)]
        segments: Vec<String>,
    },

    /// Print a note rendered to HTML
    Render {
        /// Category folder of the note
        category: String,

        /// Remaining path segments, ending with the slug
        #[arg(num_args = 0..)]
        segments: Vec<String>,
    },

    /// Render any Markdown file to HTML (frontmatter is stripped)
    RenderFile { path: PathBuf },

    /// Print the directive tree of a Markdown file as JSON, after the admonition rewrite
    Tree { path: PathBuf },

    /// Get or set configuration
    Config {
        /// Configuration key (notes-dir, url-prefix, locale)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_show_segments() {
        let cli = Cli::parse_from(["notesite", "show", "guides", "advanced", "tune"]);
        match cli.command {
            Some(Commands::Show { category, segments }) => {
                assert_eq!(category, "guides");
                assert_eq!(segments, vec!["advanced", "tune"]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["notesite", "nav", "-C", "/tmp/site", "-v"]);
        assert!(cli.verbose);
        assert_eq!(cli.site_root, PathBuf::from("/tmp/site"));
    }

    #[test]
    fn test_default_site_root() {
        let cli = Cli::parse_from(["notesite", "list"]);
        assert_eq!(cli.site_root, PathBuf::from("."));
        assert!(matches!(cli.command, Some(Commands::List)));
    }

    #[test]
    fn test_config_key_value() {
        let cli = Cli::parse_from(["notesite", "config", "url-prefix", "/kb/"]);
        match cli.command {
            Some(Commands::Config { key, value }) => {
                assert_eq!(key.as_deref(), Some("url-prefix"));
                assert_eq!(value.as_deref(), Some("/kb/"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
