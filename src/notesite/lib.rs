//! # Notesite Architecture
//!
//! Notesite is the content layer of a static documentation site's notes
//! section. It turns a folder of Markdown notes into an ordered, queryable
//! index and renders note bodies to HTML, with `:::kind` admonition blocks
//! turned into styled callouts.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (main.rs, args.rs, print.rs)                           │
//! │  - Parses arguments, prints results, sets exit codes        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API (api.rs)                                               │
//! │  - Explicit load, then read-only queries and rendering      │
//! └─────────────────────────────────────────────────────────────┘
//!               │                               │
//!               ▼                               ▼
//! ┌───────────────────────────┐   ┌─────────────────────────────┐
//! │  Index (index.rs)         │   │  Rendering                  │
//! │  - ids, URLs, grouping    │   │  directive.rs → rewrite.rs  │
//! │  - ordering (collate.rs)  │   │  → render.rs                │
//! └───────────────────────────┘   └─────────────────────────────┘
//!               │
//!               ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Sources (source/)                                          │
//! │  - NoteSource trait                                         │
//! │  - FileSource (production), InMemorySource (testing)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O in the Core
//!
//! Apart from `source::fs` and `config`, library code neither reads files nor
//! writes to stdout/stderr. Diagnostics go through `tracing`; the binary
//! decides where they end up.
//!
//! ## Rendering Pipeline
//!
//! 1. [`directive::parse_document`] splits a body into Markdown fragments and
//!    generic directive nodes ([`mdast::Node`]).
//! 2. [`rewrite::rewrite_admonitions`] attaches render hints to container
//!    directives whose name is an admonition kind.
//! 3. [`render::render_html`] turns the tree into HTML, running each Markdown
//!    fragment through `pulldown-cmark`.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`index`]: Identifiers, URLs, navigation ordering
//! - [`source`]: Where notes come from
//! - [`admonition`]: Admonition kinds and their styles
//! - [`directive`]: Directive syntax parser
//! - [`rewrite`]: Admonition rewriter
//! - [`render`]: HTML renderer and heading extraction
//! - [`frontmatter`]: YAML frontmatter splitting and parsing
//! - [`model`]: Note and category data types
//! - [`collate`]: Locale-tagged string ordering
//! - [`config`]: Site configuration
//! - [`error`]: Error types

pub mod admonition;
pub mod api;
pub mod collate;
pub mod config;
pub mod directive;
pub mod error;
pub mod frontmatter;
pub mod index;
pub mod mdast;
pub mod model;
pub mod render;
pub mod rewrite;
pub mod source;
