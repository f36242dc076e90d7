use colored::Colorize;
use notesite::config::SiteConfig;
use notesite::model::{CategoryWithNotes, NoteEntry};
use notesite::render::Heading;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const DATE_WIDTH: usize = 12;
const NOTE_INDENT: &str = "    ";

pub fn print_navigation(categories: &[CategoryWithNotes]) {
    if categories.is_empty() {
        println!("No notes found.");
        return;
    }

    for (i, category) in categories.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{} {}", category.label.bold(), format!("({})", category.id).dimmed());

        for note in &category.notes {
            let date = note
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default();
            let available = LINE_WIDTH.saturating_sub(NOTE_INDENT.width() + DATE_WIDTH);
            let title = truncate_to_width(&note.title, available);
            let padding = available.saturating_sub(title.width());

            println!(
                "{}{}{}{}",
                NOTE_INDENT,
                title,
                " ".repeat(padding),
                format!("{:>width$}", date, width = DATE_WIDTH).dimmed()
            );
        }
    }
}

pub fn print_note_list(notes: &[NoteEntry]) {
    if notes.is_empty() {
        println!("No notes found.");
        return;
    }

    let id_width = notes.iter().map(|n| n.id.width()).max().unwrap_or(0);
    for note in notes {
        let id_padding = id_width.saturating_sub(note.id.width());
        let available = LINE_WIDTH.saturating_sub(id_width + 2 + note.url.width() + 2);
        let title = truncate_to_width(&note.frontmatter.title, available);
        let padding = available.saturating_sub(title.width());

        println!(
            "{}{}  {}{}  {}",
            note.id.yellow(),
            " ".repeat(id_padding),
            title,
            " ".repeat(padding),
            note.url.dimmed()
        );
    }
}

pub fn print_note_detail(note: &NoteEntry, headings: &[Heading]) {
    let fm = &note.frontmatter;

    println!("{}", fm.title.bold());
    println!("--------------------------------");
    println!("{:<12}{}", "id", note.id);
    println!("{:<12}{}", "url", note.url);
    println!("{:<12}{}", "file", note.source_path.display());
    if let Some(date) = fm.date {
        println!("{:<12}{}", "date", date.format("%Y-%m-%d %H:%M"));
    }
    if let Some(description) = &fm.description {
        println!("{:<12}{}", "description", description);
    }
    if let Some(tags) = fm.tags.as_ref().filter(|t| !t.is_empty()) {
        println!("{:<12}{}", "tags", tags.join(", "));
    }
    if let Some(keywords) = fm.keywords.as_ref().filter(|k| !k.is_empty()) {
        println!("{:<12}{}", "keywords", keywords.join(", "));
    }

    if !headings.is_empty() {
        println!();
        for heading in headings {
            let indent = "  ".repeat(heading.depth.saturating_sub(1) as usize);
            println!(
                "{}{} {}",
                indent,
                heading.text,
                format!("#{}", heading.slug).dimmed()
            );
        }
    }
}

pub fn print_config(config: &SiteConfig) {
    println!("notes-dir = {}", config.notes_dir);
    println!("url-prefix = {}", config.url_prefix);
    println!("locale = {}", config.locale);
    for (kind, label) in &config.admonition_labels {
        println!("{} = {}", format!("admonition.{}", kind).dimmed(), label);
    }
}

pub fn print_success(message: &str) {
    println!("{}", message.green());
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}
