//! # Admonition Rewriter
//!
//! Turns `:::note` / `:::tip` / `:::info` / `:::warning` / `:::danger`
//! container directives into admonition blocks:
//!
//! ```html
//! <div class="admonition admonition-note">
//!   <div class="admonition-heading"><i class="bi bi-pencil-square"></i>筆記</div>
//!   <div class="admonition-content">…original children…</div>
//! </div>
//! ```
//!
//! The rewrite happens in place during one pre-order visit. Leaf and text
//! directives are never rewritten, and container directives with any other
//! name are left exactly as parsed.

use crate::admonition::AdmonitionTable;
use crate::mdast::{Node, NodeType, RenderHints};
use std::collections::BTreeMap;

/// Rewrites every recognized container directive under `root`.
pub fn rewrite_admonitions(root: &mut Node, table: &AdmonitionTable) {
    root.visit_mut(&mut |node| match node.node_type {
        NodeType::ContainerDirective => rewrite_node(node, table),
        NodeType::LeafDirective | NodeType::TextDirective => {}
        _ => {}
    });
}

fn rewrite_node(node: &mut Node, table: &AdmonitionTable) {
    let Some((_, style)) = node.name.as_deref().and_then(|name| table.lookup(name)) else {
        return;
    };

    let title = node
        .attributes
        .get("title")
        .filter(|title| !title.is_empty())
        .cloned()
        .unwrap_or_else(|| style.label.clone());

    let data = node.data.get_or_insert_with(RenderHints::default);
    data.h_name = Some("div".to_string());
    data.h_properties = BTreeMap::from([(
        "class".to_string(),
        format!("admonition admonition-{}", style.class_name),
    )]);

    let heading = Node::paragraph(vec![
        Node::html(format!(r#"<i class="bi {}"></i>"#, style.icon)),
        Node::text(title),
    ])
    .with_data(RenderHints::element("div", "admonition-heading"));

    let content = Node::paragraph(std::mem::take(&mut node.children))
        .with_data(RenderHints::element("div", "admonition-content"));

    node.children = vec![heading, content];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admonition::AdmonitionKind;

    fn container(name: &str, title: Option<&str>, children: Vec<Node>) -> Node {
        let mut attributes = BTreeMap::new();
        if let Some(title) = title {
            attributes.insert("title".to_string(), title.to_string());
        }
        Node::directive(NodeType::ContainerDirective, name, attributes, children)
    }

    fn rewritten(node: Node) -> Node {
        let mut root = Node::root(vec![node]);
        rewrite_admonitions(&mut root, &AdmonitionTable::default());
        root.children.remove(0)
    }

    fn class_of(node: &Node) -> &str {
        &node.data.as_ref().unwrap().h_properties["class"]
    }

    fn heading_title(node: &Node) -> &str {
        node.children[0].children[1].value.as_deref().unwrap()
    }

    #[test]
    fn test_every_kind_gets_classes_and_default_label() {
        for kind in AdmonitionKind::ALL {
            let node = rewritten(container(kind.as_str(), None, vec![]));

            assert_eq!(
                class_of(&node),
                format!("admonition admonition-{}", kind.as_str())
            );
            assert_eq!(node.data.as_ref().unwrap().h_name.as_deref(), Some("div"));
            assert_eq!(heading_title(&node), kind.default_label());
            assert_eq!(
                node.children[0].children[0].value.as_deref(),
                Some(format!(r#"<i class="bi {}"></i>"#, kind.icon()).as_str())
            );
        }
    }

    #[test]
    fn test_title_attribute_used_verbatim() {
        let node = rewritten(container("warning", Some("Mind the <gap>"), vec![]));
        assert_eq!(heading_title(&node), "Mind the <gap>");
    }

    #[test]
    fn test_empty_title_falls_back_to_label() {
        let node = rewritten(container("tip", Some(""), vec![]));
        assert_eq!(heading_title(&node), "提示");
    }

    #[test]
    fn test_original_children_move_into_content() {
        let body = vec![Node::markdown("first\n"), Node::markdown("second\n")];
        let node = rewritten(container("info", None, body.clone()));

        assert_eq!(node.children.len(), 2);
        let heading = &node.children[0];
        let content = &node.children[1];
        assert_eq!(class_of(heading), "admonition-heading");
        assert_eq!(class_of(content), "admonition-content");
        assert_eq!(content.children, body);
    }

    #[test]
    fn test_unknown_name_is_untouched() {
        let original = container("details", Some("x"), vec![Node::markdown("body")]);
        assert_eq!(rewritten(original.clone()), original);
    }

    #[test]
    fn test_leaf_and_text_directives_are_skipped() {
        for node_type in [NodeType::LeafDirective, NodeType::TextDirective] {
            let original = Node::directive(node_type, "note", BTreeMap::new(), vec![]);
            assert_eq!(rewritten(original.clone()), original);
        }
    }

    #[test]
    fn test_nested_admonitions_are_rewritten() {
        let inner = container("danger", None, vec![Node::markdown("inner")]);
        let outer = rewritten(container("note", None, vec![inner]));

        let nested = &outer.children[1].children[0];
        assert_eq!(class_of(nested), "admonition admonition-danger");
        assert_eq!(heading_title(nested), "危險");
    }

    #[test]
    fn test_existing_properties_are_replaced() {
        let mut node = container("note", None, vec![]);
        node.data = Some(RenderHints::element("section", "custom"));

        let node = rewritten(node);
        let data = node.data.as_ref().unwrap();
        assert_eq!(data.h_name.as_deref(), Some("div"));
        assert_eq!(data.h_properties.len(), 1);
        assert_eq!(class_of(&node), "admonition admonition-note");
    }

    #[test]
    fn test_custom_labels_from_table() {
        let table = AdmonitionTable::default().with_label(AdmonitionKind::Note, "Note");
        let mut root = Node::root(vec![container("note", None, vec![])]);
        rewrite_admonitions(&mut root, &table);
        assert_eq!(heading_title(&root.children[0]), "Note");
    }
}
