//! Markup serialization for component subtrees.

use crate::entities::{escape_attr, escape_text};
use crate::tokenizer::{is_raw_text_element, is_void_element};
use crate::types::Node;

/// The node's own markup, including its tag.
pub fn outer_html(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, false, &mut out);
    out
}

/// The markup of the node's children only.
pub fn inner_html(node: &Node) -> String {
    let mut out = String::new();
    write_children(node, &mut out);
    out
}

/// Serialize a list of sibling nodes back to back.
pub fn nodes_html(nodes: &[Node]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(node, false, &mut out);
    }
    out
}

fn write_children(node: &Node, out: &mut String) {
    let raw = node.name().is_some_and(is_raw_text_element);
    for child in node.children() {
        write_node(child, raw, out);
    }
}

fn write_node(node: &Node, raw_parent: bool, out: &mut String) {
    match node {
        Node::Text { text, .. } => {
            if raw_parent {
                out.push_str(text);
            } else {
                escape_text(text, out);
            }
        }
        Node::Comment { text, .. } => {
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
        }
        Node::Element {
            name, attributes, ..
        } => {
            out.push('<');
            out.push_str(name);
            for (key, value) in attributes {
                out.push(' ');
                out.push_str(key);
                if let Some(value) = value {
                    out.push_str("=\"");
                    escape_attr(value, out);
                    out.push('"');
                }
            }
            out.push('>');
            if is_void_element(name) {
                return;
            }
            write_children(node, out);
            out.push_str("</");
            out.push_str(name);
            out.push('>');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom_builder::parse_fragment;

    #[test]
    fn outer_and_inner_html_round_trip_builder_markup() {
        let src = r#"<div id="a" class="x y"><p>hi &amp; bye</p><img src="i.png"><br></div>"#;
        let nodes = parse_fragment(src);
        assert_eq!(outer_html(&nodes[0]), src);
        assert_eq!(
            inner_html(&nodes[0]),
            r#"<p>hi &amp; bye</p><img src="i.png"><br>"#
        );
    }

    #[test]
    fn raw_text_children_are_not_escaped() {
        let nodes = parse_fragment("<style>a > b { content: \"&\"; }</style>");
        assert_eq!(outer_html(&nodes[0]), "<style>a > b { content: \"&\"; }</style>");
    }

    #[test]
    fn valueless_attributes_and_empty_elements() {
        let nodes = parse_fragment("<input disabled><span/>");
        assert_eq!(nodes_html(&nodes), "<input disabled><span></span>");
    }
}
