use crate::model::NoteFrontmatter;

/// Splits a leading YAML frontmatter block from a Markdown document.
///
/// The block starts with a `---` line (a UTF-8 BOM is tolerated) and ends at
/// the next `---` or `...` line. Returns the raw YAML, if any, and the body
/// that follows it. Without a closed block the whole input is the body.
pub fn split_frontmatter(input: &str) -> (Option<&str>, &str) {
    let text = input.trim_start_matches('\u{feff}');
    let Some(after_open) = strip_delimiter_line(text, "---") else {
        return (None, text);
    };

    let mut offset = 0;
    for line in after_open.split_inclusive('\n') {
        let trimmed = line.trim_end();
        if trimmed == "---" || trimmed == "..." {
            let yaml = &after_open[..offset];
            let body = &after_open[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }

    (None, text)
}

fn strip_delimiter_line<'a>(text: &'a str, delimiter: &str) -> Option<&'a str> {
    let (first, rest) = match text.find('\n') {
        Some(i) => (&text[..i], &text[i + 1..]),
        None => (text, ""),
    };
    (first.trim_end() == delimiter).then_some(rest)
}

/// Parses the YAML block of a note.
pub fn parse_note_frontmatter(yaml: &str) -> Result<NoteFrontmatter, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_split() {
        let input = "---\ntitle: Setup\n---\n# Heading\nBody";
        let (yaml, body) = split_frontmatter(input);
        assert_eq!(yaml, Some("title: Setup\n"));
        assert_eq!(body, "# Heading\nBody");
    }

    #[test]
    fn test_dots_close_block() {
        let (yaml, body) = split_frontmatter("---\ntitle: A\n...\nrest\n");
        assert_eq!(yaml, Some("title: A\n"));
        assert_eq!(body, "rest\n");
    }

    #[test]
    fn test_bom_and_crlf() {
        let (yaml, body) = split_frontmatter("\u{feff}---\r\ntitle: A\r\n---\r\nbody");
        assert_eq!(yaml, Some("title: A\r\n"));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_no_frontmatter() {
        let (yaml, body) = split_frontmatter("# Title\n---\n");
        assert!(yaml.is_none());
        assert_eq!(body, "# Title\n---\n");
    }

    #[test]
    fn test_unclosed_block_is_body() {
        let input = "---\ntitle: A\nno closing";
        let (yaml, body) = split_frontmatter(input);
        assert!(yaml.is_none());
        assert_eq!(body, input);
    }

    #[test]
    fn test_parse_full_frontmatter() {
        let yaml = "title: Setup\ndescription: Getting started\ndate: 2024-01-01\nslug: intro\nkeywords: [rust, cli]\ntags:\n  - guide\nextra: ignored\n";
        let fm = parse_note_frontmatter(yaml).unwrap();
        assert_eq!(fm.title, "Setup");
        assert_eq!(fm.description.as_deref(), Some("Getting started"));
        assert_eq!(fm.slug.as_deref(), Some("intro"));
        assert_eq!(fm.raw_date().as_deref(), Some("2024-01-01"));
        assert_eq!(fm.keywords, Some(vec!["rust".to_string(), "cli".to_string()]));
        assert_eq!(fm.tags, Some(vec!["guide".to_string()]));
    }

    #[test]
    fn test_title_is_required() {
        assert!(parse_note_frontmatter("description: no title\n").is_err());
    }
}
