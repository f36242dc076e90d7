//! # Document Tree
//!
//! A small mdast-shaped syntax tree: just enough node types to carry
//! directive blocks between the parser, the admonition rewriter and the HTML
//! renderer. Ordinary Markdown between directives is kept as opaque
//! [`NodeType::Markdown`] fragments and rendered by pulldown-cmark.
//!
//! The tree serializes to the same JSON shape remark uses
//! (`{"type": "containerDirective", "name": "note", ...}`), which is what the
//! `tree` CLI command prints.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeType {
    Root,
    ContainerDirective,
    LeafDirective,
    TextDirective,
    Paragraph,
    Text,
    Html,
    Markdown,
}

/// Rendering hints attached to a node (`data` in mdast).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderHints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h_name: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub h_properties: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub directive_label: bool,
}

impl RenderHints {
    pub fn element(name: &str, class: &str) -> Self {
        let mut h_properties = BTreeMap::new();
        h_properties.insert("class".to_string(), class.to_string());
        Self {
            h_name: Some(name.to_string()),
            h_properties,
            directive_label: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<RenderHints>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    fn bare(node_type: NodeType) -> Self {
        Self {
            node_type,
            name: None,
            attributes: BTreeMap::new(),
            data: None,
            value: None,
            children: Vec::new(),
        }
    }

    pub fn root(children: Vec<Node>) -> Self {
        Self {
            children,
            ..Self::bare(NodeType::Root)
        }
    }

    pub fn paragraph(children: Vec<Node>) -> Self {
        Self {
            children,
            ..Self::bare(NodeType::Paragraph)
        }
    }

    pub fn text(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::bare(NodeType::Text)
        }
    }

    pub fn html(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::bare(NodeType::Html)
        }
    }

    pub fn markdown(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::bare(NodeType::Markdown)
        }
    }

    /// A directive node of the given flavour (container, leaf or text).
    pub fn directive(
        node_type: NodeType,
        name: impl Into<String>,
        attributes: BTreeMap<String, String>,
        children: Vec<Node>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            attributes,
            children,
            ..Self::bare(node_type)
        }
    }

    pub fn with_data(mut self, data: RenderHints) -> Self {
        self.data = Some(data);
        self
    }

    /// Pre-order visit. The visitor runs on a node before its children are
    /// read, so children it installs are visited too.
    pub fn visit_mut<F: FnMut(&mut Node)>(&mut self, visitor: &mut F) {
        visitor(self);
        for child in &mut self.children {
            child.visit_mut(visitor);
        }
    }

    /// Pre-order, read-only visit.
    pub fn visit<F: FnMut(&Node)>(&self, visitor: &mut F) {
        visitor(self);
        for child in &self.children {
            child.visit(visitor);
        }
    }
}
