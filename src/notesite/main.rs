use clap::Parser;
use notesite::api::SiteApi;
use notesite::config::SiteConfig;
use notesite::error::{NotesiteError, Result};
use notesite::frontmatter::split_frontmatter;
use notesite::render::{build_tree, render_document};
use notesite::source::fs::FileSource;
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod args;
mod print;
use args::{Cli, Commands};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

struct AppContext {
    site_root: PathBuf,
    config: SiteConfig,
}

impl AppContext {
    fn api(&self) -> Result<SiteApi<FileSource>> {
        let source = FileSource::for_site(&self.site_root, &self.config.notes_dir);
        SiteApi::load(source, self.config.clone())
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = SiteConfig::load(&cli.site_root)?;
    let mut ctx = AppContext {
        site_root: cli.site_root,
        config,
    };

    match cli.command {
        Some(Commands::Nav { json }) => handle_nav(&ctx, json),
        Some(Commands::List) => handle_list(&ctx),
        Some(Commands::Show { category, segments }) => handle_show(&ctx, &category, &segments),
        Some(Commands::Render { category, segments }) => {
            handle_render(&ctx, &category, &segments)
        }
        Some(Commands::RenderFile { path }) => handle_render_file(&ctx, &path),
        Some(Commands::Tree { path }) => handle_tree(&ctx, &path),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_nav(&ctx, false),
    }
}

fn init_logging(verbose: bool) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn note_id(category: &str, segments: &[String]) -> String {
    std::iter::once(category)
        .chain(segments.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join("/")
}

fn handle_nav(ctx: &AppContext, json: bool) -> Result<()> {
    let api = ctx.api()?;
    if json {
        let out = serde_json::to_string_pretty(api.navigation())?;
        println!("{}", out);
    } else {
        print::print_navigation(api.navigation());
    }
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let api = ctx.api()?;
    print::print_note_list(api.all_notes());
    Ok(())
}

fn handle_show(ctx: &AppContext, category: &str, segments: &[String]) -> Result<()> {
    let api = ctx.api()?;
    let id = note_id(category, segments);
    let note = api.require_note(&id)?;
    let headings = api
        .render_note(&note.id)
        .map(|rendered| rendered.headings)
        .unwrap_or_default();
    print::print_note_detail(note, &headings);
    Ok(())
}

fn handle_render(ctx: &AppContext, category: &str, segments: &[String]) -> Result<()> {
    let api = ctx.api()?;
    let note = api
        .note_by_params(category, segments)
        .ok_or_else(|| NotesiteError::NoteNotFound(note_id(category, segments)))?;
    let rendered = api
        .render_note(&note.id)
        .ok_or_else(|| NotesiteError::NoteNotFound(note.id.clone()))?;
    print!("{}", rendered.html);
    Ok(())
}

fn read_body(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path).map_err(NotesiteError::Io)?;
    let (_, body) = split_frontmatter(&content);
    Ok(body.to_string())
}

fn handle_render_file(ctx: &AppContext, path: &Path) -> Result<()> {
    let body = read_body(path)?;
    let rendered = render_document(&body, &ctx.config.admonition_table());
    print!("{}", rendered.html);
    Ok(())
}

fn handle_tree(ctx: &AppContext, path: &Path) -> Result<()> {
    let body = read_body(path)?;
    let tree = build_tree(&body, &ctx.config.admonition_table());
    println!("{}", serde_json::to_string_pretty(&tree)?);
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key, value) {
        (None, _) => print::print_config(&ctx.config),
        (Some(key), None) => match ctx.config.get(&key) {
            Some(val) => println!("{}", val),
            None => {
                return Err(NotesiteError::Config(format!("Unknown config key: {}", key)));
            }
        },
        (Some(key), Some(value)) => {
            ctx.config.set(&key, &value)?;
            ctx.config.save(&ctx.site_root)?;
            let display_val = ctx.config.get(&key).unwrap_or(value);
            print::print_success(&format!("{} set to {}", key, display_val));
        }
    }
    Ok(())
}
