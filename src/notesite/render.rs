//! # HTML Rendering
//!
//! Renders a document tree to HTML. Directive and paragraph nodes use their
//! render hints (`hName`/`hProperties`) when present; ordinary Markdown
//! fragments go through pulldown-cmark.
//!
//! Headings get GitHub-style slug ids while rendering, and
//! [`extract_headings`] walks the tree in the same order with the same
//! slugger, so the table of contents always links to the rendered ids.
//!
//! Link reference and footnote definitions are shared across fragments: a
//! `[docs][d]` before an admonition resolves against a `[d]: …` after it,
//! as it would in one Markdown document.

use crate::admonition::AdmonitionTable;
use crate::directive::parse_document;
use crate::mdast::{Node, NodeType};
use crate::rewrite::rewrite_admonitions;
use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};
use serde::Serialize;
use std::collections::HashMap;

/// A document heading, as listed in a page's table of contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Heading {
    pub depth: u8,
    pub slug: String,
    pub text: String,
}

/// Rendered HTML together with the headings it contains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedDocument {
    pub html: String,
    pub headings: Vec<Heading>,
}

/// Parses, rewrites admonitions and renders a Markdown body.
pub fn render_markdown(source: &str, table: &AdmonitionTable) -> String {
    render_html(&build_tree(source, table))
}

/// Like [`render_markdown`], also collecting the headings.
pub fn render_document(source: &str, table: &AdmonitionTable) -> RenderedDocument {
    let tree = build_tree(source, table);
    RenderedDocument {
        html: render_html(&tree),
        headings: extract_headings(&tree),
    }
}

/// The directive tree of a Markdown body after the admonition rewrite.
pub fn build_tree(source: &str, table: &AdmonitionTable) -> Node {
    let mut tree = parse_document(source);
    rewrite_admonitions(&mut tree, table);
    tree
}

pub fn render_html(root: &Node) -> String {
    let mut out = String::new();
    let mut reader = FragmentReader::new(root);
    write_node(root, &mut reader, &mut out);
    out
}

/// Headings of every Markdown fragment, in document order.
pub fn extract_headings(root: &Node) -> Vec<Heading> {
    let mut reader = FragmentReader::new(root);
    let mut headings = Vec::new();
    root.visit(&mut |node| {
        if node.node_type != NodeType::Markdown {
            return;
        }
        let source = node.value.as_deref().unwrap_or_default();
        let text = reader.next_text(source);
        let events = fragment_events(&text, source.len());
        for (_, depth, heading) in scan_headings(&events) {
            headings.push(Heading {
                depth,
                slug: reader.slugger.slug(&heading),
                text: heading,
            });
        }
    });
    headings
}

/// Definitions found in each Markdown fragment, as source text, indexed by
/// the fragment's position in document order.
#[derive(Debug, Default)]
struct SharedDefinitions {
    by_fragment: Vec<Vec<String>>,
}

impl SharedDefinitions {
    fn collect(root: &Node) -> Self {
        let mut by_fragment = Vec::new();
        root.visit(&mut |node| {
            if node.node_type == NodeType::Markdown {
                by_fragment.push(definitions_in(node.value.as_deref().unwrap_or_default()));
            }
        });
        Self { by_fragment }
    }

    /// `source` followed by the definitions of every other fragment.
    fn extend(&self, index: usize, source: &str) -> String {
        let mut text = source.to_string();
        for (i, definitions) in self.by_fragment.iter().enumerate() {
            if i == index {
                continue;
            }
            for definition in definitions {
                text.push_str("\n\n");
                text.push_str(definition);
            }
        }
        text
    }
}

/// Link reference and footnote definitions of one fragment.
fn definitions_in(source: &str) -> Vec<String> {
    let parser = Parser::new_ext(source, markdown_options());
    let mut definitions: Vec<String> = parser
        .reference_definitions()
        .iter()
        .filter_map(|(_, def)| source.get(def.span.clone()))
        .map(str::to_string)
        .collect();

    for (event, range) in parser.into_offset_iter() {
        if matches!(event, Event::Start(Tag::FootnoteDefinition(_))) {
            if let Some(text) = source.get(range) {
                definitions.push(text.to_string());
            }
        }
    }
    definitions
}

/// Hands out Markdown fragments in document order, with shared definitions
/// and one slugger for the whole document.
struct FragmentReader {
    definitions: SharedDefinitions,
    slugger: Slugger,
    next: usize,
}

impl FragmentReader {
    fn new(root: &Node) -> Self {
        Self {
            definitions: SharedDefinitions::collect(root),
            slugger: Slugger::default(),
            next: 0,
        }
    }

    fn next_text(&mut self, source: &str) -> String {
        let text = self.definitions.extend(self.next, source);
        self.next += 1;
        text
    }
}

fn markdown_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options
}

/// Events of the first `own_len` bytes of `text`. Anything after that is
/// borrowed definitions, which resolve references but are not rendered.
fn fragment_events(text: &str, own_len: usize) -> Vec<Event<'_>> {
    Parser::new_ext(text, markdown_options())
        .into_offset_iter()
        .filter(|(_, range)| range.start < own_len)
        .map(|(event, _)| event)
        .collect()
}

/// Finds headings as (start event index, depth, plain text).
fn scan_headings(events: &[Event<'_>]) -> Vec<(usize, u8, String)> {
    let mut found = Vec::new();
    let mut open: Option<(usize, u8, String)> = None;

    for (i, event) in events.iter().enumerate() {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                open = Some((i, *level as u8, String::new()));
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some((start, depth, text)) = open.take() {
                    found.push((start, depth, text.trim().to_string()));
                }
            }
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, _, buf)) = open.as_mut() {
                    buf.push_str(text);
                }
            }
            Event::SoftBreak | Event::HardBreak => {
                if let Some((_, _, buf)) = open.as_mut() {
                    buf.push(' ');
                }
            }
            _ => {}
        }
    }
    found
}

fn render_fragment(source: &str, reader: &mut FragmentReader, out: &mut String) {
    let text = reader.next_text(source);
    let mut events = fragment_events(&text, source.len());
    for (index, _, heading) in scan_headings(&events) {
        let slug = reader.slugger.slug(&heading);
        if let Event::Start(Tag::Heading { id, .. }) = &mut events[index] {
            *id = Some(CowStr::from(slug));
        }
    }
    html::push_html(out, events.into_iter());
}

fn write_node(node: &Node, reader: &mut FragmentReader, out: &mut String) {
    match node.node_type {
        NodeType::Root => write_children(node, reader, out),
        NodeType::Text => escape_html(node.value.as_deref().unwrap_or_default(), out),
        NodeType::Html => out.push_str(node.value.as_deref().unwrap_or_default()),
        NodeType::Markdown => {
            render_fragment(node.value.as_deref().unwrap_or_default(), reader, out)
        }
        NodeType::Paragraph
        | NodeType::ContainerDirective
        | NodeType::LeafDirective
        | NodeType::TextDirective => write_element(node, reader, out),
    }
}

fn write_children(node: &Node, reader: &mut FragmentReader, out: &mut String) {
    for child in &node.children {
        write_node(child, reader, out);
    }
}

fn write_element(node: &Node, reader: &mut FragmentReader, out: &mut String) {
    let default_tag = match node.node_type {
        NodeType::Paragraph => "p",
        NodeType::TextDirective => "span",
        _ => "div",
    };
    let tag = node
        .data
        .as_ref()
        .and_then(|data| data.h_name.as_deref())
        .unwrap_or(default_tag);

    out.push('<');
    out.push_str(tag);
    if let Some(data) = &node.data {
        for (key, value) in &data.h_properties {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            escape_html(value, out);
            out.push('"');
        }
    }
    out.push('>');

    write_children(node, reader, out);

    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}

fn escape_html(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

/// GitHub-style heading slugs, unique within one document.
#[derive(Debug, Default)]
pub struct Slugger {
    seen: HashMap<String, usize>,
}

impl Slugger {
    pub fn slug(&mut self, text: &str) -> String {
        let base = slugify(text);
        let mut slug = base.clone();
        while self.seen.contains_key(&slug) {
            let count = self.seen.entry(base.clone()).or_insert(0);
            *count += 1;
            slug = format!("{}-{}", base, count);
        }
        self.seen.insert(slug.clone(), 0);
        slug
    }
}

/// Lower-cases, drops punctuation and turns spaces into dashes.
pub fn slugify(text: &str) -> String {
    text.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .filter_map(|c| match c {
            ' ' => Some('-'),
            '-' | '_' => Some(c),
            c if c.is_alphanumeric() => Some(c),
            _ => None,
        })
        .collect()
}
