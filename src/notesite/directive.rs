//! # Directive Parser
//!
//! Splits Markdown source into a [`Node`] tree, lifting out the block-level
//! forms of the generic directive syntax:
//!
//! ```text
//! :::warning{title="Careful"}      container directive (3+ colons, nests)
//! Body text, **markdown** allowed.
//! :::
//!
//! ::youtube[Intro video]{#intro}    leaf directive (exactly 2 colons)
//! ```
//!
//! Everything between directives is kept verbatim as [`NodeType::Markdown`]
//! fragments. Directive markers inside fenced code blocks are left alone.
//!
//! A line that only looks like a directive (bad name, unterminated label,
//! malformed attribute list, trailing text) stays ordinary Markdown. A
//! closing fence with no open container is ordinary Markdown as well.

use crate::mdast::{Node, NodeType, RenderHints};
use std::collections::BTreeMap;
use std::iter::Peekable;
use std::str::CharIndices;

const MAX_INDENT: usize = 3;

/// Parses a Markdown document (without frontmatter) into a root node.
pub fn parse_document(source: &str) -> Node {
    let mut stack = vec![Frame::root()];
    let mut code_fence: Option<CodeFence> = None;

    for line in source.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);

        if let Some(fence) = &code_fence {
            if fence.is_closed_by(content) {
                code_fence = None;
            }
            current(&mut stack).pending.push_str(line);
            continue;
        }

        if let Some(fence) = CodeFence::open(content) {
            code_fence = Some(fence);
            current(&mut stack).pending.push_str(line);
            continue;
        }

        if let Some(len) = closing_fence(content) {
            let closes_open_container = stack
                .last()
                .and_then(|frame| frame.directive.as_ref())
                .is_some_and(|open| len >= open.fence);
            if closes_open_container {
                close_container(&mut stack);
                continue;
            }
        }

        if let Some(open) = parse_container_open(content) {
            current(&mut stack).flush();
            stack.push(Frame::container(open));
            continue;
        }

        if let Some(leaf) = parse_leaf(content) {
            let frame = current(&mut stack);
            frame.flush();
            frame.children.push(leaf);
            continue;
        }

        current(&mut stack).pending.push_str(line);
    }

    // Unclosed containers end with the document.
    while stack.len() > 1 {
        close_container(&mut stack);
    }

    let mut root = stack.pop().unwrap_or_else(Frame::root);
    root.flush();
    Node::root(root.children)
}

struct OpenContainer {
    fence: usize,
    name: String,
    label: Option<String>,
    attributes: BTreeMap<String, String>,
}

struct Frame {
    directive: Option<OpenContainer>,
    children: Vec<Node>,
    pending: String,
}

impl Frame {
    fn root() -> Self {
        Self {
            directive: None,
            children: Vec::new(),
            pending: String::new(),
        }
    }

    fn container(open: OpenContainer) -> Self {
        Self {
            directive: Some(open),
            ..Self::root()
        }
    }

    fn flush(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        if !pending.trim().is_empty() {
            self.children.push(Node::markdown(pending));
        }
    }
}

fn current(stack: &mut [Frame]) -> &mut Frame {
    // The root frame is never popped while lines are being read.
    let last = stack.len() - 1;
    &mut stack[last]
}

fn close_container(stack: &mut Vec<Frame>) {
    let Some(mut frame) = stack.pop() else {
        return;
    };
    frame.flush();

    let Some(open) = frame.directive.take() else {
        // Root frame: put it back untouched.
        stack.push(frame);
        return;
    };

    let mut children = Vec::with_capacity(frame.children.len() + 1);
    if let Some(label) = open.label {
        children.push(label_paragraph(label));
    }
    children.extend(frame.children);

    let node = Node::directive(
        NodeType::ContainerDirective,
        open.name,
        open.attributes,
        children,
    );
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

fn label_paragraph(label: String) -> Node {
    Node::paragraph(vec![Node::text(label)]).with_data(RenderHints {
        directive_label: true,
        ..RenderHints::default()
    })
}

struct CodeFence {
    marker: char,
    len: usize,
}

impl CodeFence {
    fn open(line: &str) -> Option<Self> {
        let rest = strip_indent(line)?;
        let marker = rest.chars().next().filter(|c| *c == '`' || *c == '~')?;
        let len = rest.chars().take_while(|c| *c == marker).count();
        if len < 3 {
            return None;
        }
        let info = &rest[len..];
        if marker == '`' && info.contains('`') {
            return None;
        }
        Some(Self { marker, len })
    }

    fn is_closed_by(&self, line: &str) -> bool {
        let Some(rest) = strip_indent(line) else {
            return false;
        };
        let run = rest.chars().take_while(|c| *c == self.marker).count();
        run >= self.len && rest[run..].trim().is_empty()
    }
}

/// Returns the rest of the line after at most three spaces of indentation.
fn strip_indent(line: &str) -> Option<&str> {
    let indent = line.len() - line.trim_start_matches(' ').len();
    if indent > MAX_INDENT {
        return None;
    }
    let rest = &line[indent..];
    if rest.starts_with('\t') {
        return None;
    }
    Some(rest)
}

fn count_colons(s: &str) -> usize {
    s.chars().take_while(|c| *c == ':').count()
}

/// A line made only of 3+ colons; yields the colon count.
fn closing_fence(line: &str) -> Option<usize> {
    let rest = strip_indent(line)?;
    let len = count_colons(rest);
    if len >= 3 && rest[len..].trim().is_empty() {
        Some(len)
    } else {
        None
    }
}

fn parse_container_open(line: &str) -> Option<OpenContainer> {
    let rest = strip_indent(line)?;
    let fence = count_colons(rest);
    if fence < 3 {
        return None;
    }
    let (name, label, attributes) = parse_directive_head(&rest[fence..])?;
    Some(OpenContainer {
        fence,
        name,
        label,
        attributes,
    })
}

fn parse_leaf(line: &str) -> Option<Node> {
    let rest = strip_indent(line)?;
    if count_colons(rest) != 2 {
        return None;
    }
    let (name, label, attributes) = parse_directive_head(&rest[2..])?;
    let children = label.map(|l| vec![Node::text(l)]).unwrap_or_default();
    Some(Node::directive(
        NodeType::LeafDirective,
        name,
        attributes,
        children,
    ))
}

/// Parses `name[label]{attributes}` with nothing but whitespace after it.
fn parse_directive_head(s: &str) -> Option<(String, Option<String>, BTreeMap<String, String>)> {
    let (name, mut rest) = parse_name(s)?;

    let mut label = None;
    if rest.starts_with('[') {
        let (text, after) = parse_label(rest)?;
        if !text.is_empty() {
            label = Some(text);
        }
        rest = after;
    }

    let mut attributes = BTreeMap::new();
    if rest.starts_with('{') {
        let (inner, after) = split_attribute_block(rest)?;
        attributes = parse_attributes(inner)?;
        rest = after;
    }

    if !rest.trim().is_empty() {
        return None;
    }
    Some((name, label, attributes))
}

fn parse_name(s: &str) -> Option<(String, &str)> {
    let first = s.chars().next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    let end = s
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_alphanumeric() || *c == '-' || *c == '_'))
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    Some((s[..end].to_string(), &s[end..]))
}

/// Parses `[label]`, allowing nested brackets and backslash escapes.
fn parse_label(s: &str) -> Option<(String, &str)> {
    let mut depth = 0usize;
    let mut escaped = false;
    let mut label = String::new();

    for (i, c) in s.char_indices() {
        if escaped {
            label.push(c);
            escaped = false;
            continue;
        }
        match c {
            '\\' if depth > 0 => escaped = true,
            '[' => {
                if depth > 0 {
                    label.push(c);
                }
                depth += 1;
            }
            ']' => {
                depth -= 1;
                if depth == 0 {
                    return Some((label, &s[i + 1..]));
                }
                label.push(c);
            }
            _ => label.push(c),
        }
    }
    None
}

/// Splits `{...}` off the front of `s`, honoring quoted values.
fn split_attribute_block(s: &str) -> Option<(&str, &str)> {
    let mut quote: Option<char> = None;
    for (i, c) in s.char_indices().skip(1) {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '}') => return Some((&s[1..i], &s[i + 1..])),
            (None, '{') => return None,
            _ => {}
        }
    }
    None
}

fn is_attribute_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | ':')
}

/// Consumes attribute characters and returns the byte offset where they stop.
fn read_word(chars: &mut Peekable<CharIndices<'_>>, start: usize) -> usize {
    let mut end = start;
    while let Some((i, c)) = chars.peek().copied() {
        if !is_attribute_char(c) {
            break;
        }
        end = i + c.len_utf8();
        chars.next();
    }
    end
}

/// Parses the inside of an attribute block: `#id .class key="value" flag`.
///
/// Returns `None` when the list is malformed.
pub fn parse_attributes(inner: &str) -> Option<BTreeMap<String, String>> {
    let mut attributes = BTreeMap::new();
    let mut classes: Vec<String> = Vec::new();
    let mut chars = inner.char_indices().peekable();

    while let Some((i, c)) = chars.peek().copied() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        if c == '#' || c == '.' {
            chars.next();
            let start = i + 1;
            let end = read_word(&mut chars, start);
            if end == start {
                return None;
            }
            let word = inner[start..end].to_string();
            if c == '#' {
                attributes.insert("id".to_string(), word);
            } else {
                classes.push(word);
            }
            continue;
        }

        if !is_attribute_char(c) {
            return None;
        }
        let end = read_word(&mut chars, i);
        let key = inner[i..end].to_string();

        if chars.peek().map(|(_, c)| *c) != Some('=') {
            attributes.insert(key, String::new());
            continue;
        }
        chars.next();

        let value = match chars.peek().copied() {
            Some((q_at, q)) if q == '"' || q == '\'' => {
                chars.next();
                let start = q_at + 1;
                let mut close = None;
                for (j, c) in chars.by_ref() {
                    if c == q {
                        close = Some(j);
                        break;
                    }
                }
                inner[start..close?].to_string()
            }
            Some((start, _)) => {
                let mut end = start;
                while let Some((j, c)) = chars.peek().copied() {
                    if c.is_whitespace() || matches!(c, '"' | '\'' | '=' | '<' | '>' | '`') {
                        break;
                    }
                    end = j + c.len_utf8();
                    chars.next();
                }
                if end == start {
                    return None;
                }
                inner[start..end].to_string()
            }
            None => return None,
        };
        attributes.insert(key, value);
    }

    if !classes.is_empty() {
        let mut class = attributes.remove("class").unwrap_or_default();
        for name in classes {
            if !class.is_empty() {
                class.push(' ');
            }
            class.push_str(&name);
        }
        attributes.insert("class".to_string(), class);
    }

    Some(attributes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only_child(root: &Node) -> &Node {
        assert_eq!(root.children.len(), 1, "{:#?}", root);
        &root.children[0]
    }

    #[test]
    fn test_plain_markdown_is_one_fragment() {
        let root = parse_document("# Title\n\nSome text.\n");
        let node = only_child(&root);
        assert_eq!(node.node_type, NodeType::Markdown);
        assert_eq!(node.value.as_deref(), Some("# Title\n\nSome text.\n"));
    }

    #[test]
    fn test_container_directive_with_title() {
        let src = "Intro\n\n:::note{title=\"Read me\"}\nInside **bold**\n:::\n\nOutro\n";
        let root = parse_document(src);

        assert_eq!(root.children.len(), 3);
        let directive = &root.children[1];
        assert_eq!(directive.node_type, NodeType::ContainerDirective);
        assert_eq!(directive.name.as_deref(), Some("note"));
        assert_eq!(directive.attributes["title"], "Read me");
        assert_eq!(directive.children.len(), 1);
        assert_eq!(
            directive.children[0].value.as_deref(),
            Some("Inside **bold**\n")
        );
        assert_eq!(root.children[2].value.as_deref(), Some("\nOutro\n"));
    }

    #[test]
    fn test_container_label_becomes_first_paragraph() {
        let root = parse_document(":::tip[Quick [hint]]\nbody\n:::\n");
        let directive = only_child(&root);

        let label = &directive.children[0];
        assert_eq!(label.node_type, NodeType::Paragraph);
        assert!(label.data.as_ref().unwrap().directive_label);
        assert_eq!(label.children[0].value.as_deref(), Some("Quick [hint]"));
        assert_eq!(directive.children[1].node_type, NodeType::Markdown);
    }

    #[test]
    fn test_nested_containers() {
        let src = "::::warning\nouter\n:::info\ninner\n:::\nafter\n::::\n";
        let root = parse_document(src);
        let outer = only_child(&root);

        assert_eq!(outer.name.as_deref(), Some("warning"));
        assert_eq!(outer.children.len(), 3);
        assert_eq!(outer.children[1].name.as_deref(), Some("info"));
        assert_eq!(outer.children[2].value.as_deref(), Some("after\n"));
    }

    #[test]
    fn test_same_length_fences_close_innermost() {
        let src = ":::note\na\n:::tip\nb\n:::\nc\n:::\n";
        let root = parse_document(src);
        let outer = only_child(&root);
        assert_eq!(outer.name.as_deref(), Some("note"));
        assert_eq!(outer.children[1].name.as_deref(), Some("tip"));
        assert_eq!(outer.children[2].value.as_deref(), Some("c\n"));
    }

    #[test]
    fn test_unclosed_container_closes_at_end() {
        let root = parse_document(":::danger\nno end");
        let directive = only_child(&root);
        assert_eq!(directive.name.as_deref(), Some("danger"));
        assert_eq!(directive.children[0].value.as_deref(), Some("no end"));
    }

    #[test]
    fn test_stray_closing_fence_is_markdown() {
        let root = parse_document("text\n:::\n");
        let node = only_child(&root);
        assert_eq!(node.node_type, NodeType::Markdown);
        assert_eq!(node.value.as_deref(), Some("text\n:::\n"));
    }

    #[test]
    fn test_directives_inside_code_fences_are_ignored() {
        let src = "```md\n:::note\nnot a directive\n:::\n```\n";
        let root = parse_document(src);
        let node = only_child(&root);
        assert_eq!(node.node_type, NodeType::Markdown);
        assert_eq!(node.value.as_deref(), Some(src));
    }

    #[test]
    fn test_leaf_directive() {
        let root = parse_document("::video[Demo]{#intro .wide src=clip.mp4}\n");
        let leaf = only_child(&root);

        assert_eq!(leaf.node_type, NodeType::LeafDirective);
        assert_eq!(leaf.name.as_deref(), Some("video"));
        assert_eq!(leaf.attributes["id"], "intro");
        assert_eq!(leaf.attributes["class"], "wide");
        assert_eq!(leaf.attributes["src"], "clip.mp4");
        assert_eq!(leaf.children[0].value.as_deref(), Some("Demo"));
    }

    #[test]
    fn test_trailing_text_is_not_a_directive() {
        let root = parse_document(":::note this is prose\n");
        assert_eq!(only_child(&root).node_type, NodeType::Markdown);
    }

    #[test]
    fn test_indented_code_is_not_a_directive() {
        let root = parse_document("    :::note\n");
        assert_eq!(only_child(&root).node_type, NodeType::Markdown);
    }

    #[test]
    fn test_parse_attributes_forms() {
        let attrs = parse_attributes(r#"title="Two words" alt='x y' k=v flag #a .b .c"#).unwrap();
        assert_eq!(attrs["title"], "Two words");
        assert_eq!(attrs["alt"], "x y");
        assert_eq!(attrs["k"], "v");
        assert_eq!(attrs["flag"], "");
        assert_eq!(attrs["id"], "a");
        assert_eq!(attrs["class"], "b c");
    }

    #[test]
    fn test_parse_attributes_keeps_non_ascii_values() {
        let attrs = parse_attributes("title=\"小心 ⚠\"").unwrap();
        assert_eq!(attrs["title"], "小心 ⚠");
    }

    #[test]
    fn test_malformed_attributes() {
        assert!(parse_attributes("title=\"open").is_none());
        assert!(parse_attributes("key=").is_none());
        assert!(parse_attributes("#").is_none());
        assert!(parse_attributes("!bang").is_none());

        let root = parse_document(":::note{title=\"open}\nbody\n:::\n");
        assert_eq!(root.children[0].node_type, NodeType::Markdown);
    }
}
