use crate::tokenizer::tokenize;
use crate::types::{Id, Node, Token};

/// Parse a markup fragment into top-level nodes.
///
/// Every produced node carries [`Id::UNSET`]; owners assign ids afterwards with
/// [`assign_node_ids`](crate::dom_utils::assign_node_ids). Doctype tokens are
/// dropped because a fragment has no document node to hold them.
pub fn parse_fragment(input: &str) -> Vec<Node> {
    build_fragment(tokenize(input))
}

pub fn build_fragment(tokens: Vec<Token>) -> Vec<Node> {
    let mut arena = NodeArena::new();
    let mut roots: Vec<usize> = Vec::new();
    let mut open_elements: Vec<usize> = Vec::new();

    for token in tokens {
        match token {
            Token::Doctype(_) => {}
            Token::Comment(text) => {
                let node = arena.push(ArenaNode::Comment(text));
                attach(&mut arena, &mut roots, &open_elements, node);
            }
            Token::Text(text) => {
                if text.is_empty() {
                    continue;
                }
                // Merge with a preceding text sibling so a stray '<' stays one text node.
                let siblings: &[usize] = match open_elements.last() {
                    Some(&parent) => arena.children(parent),
                    None => &roots,
                };
                if let Some(&last) = siblings.last() {
                    if let ArenaNode::Text(prev) = &mut arena.nodes[last] {
                        prev.push_str(&text);
                        continue;
                    }
                }
                let node = arena.push(ArenaNode::Text(text));
                attach(&mut arena, &mut roots, &open_elements, node);
            }
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let node = arena.push(ArenaNode::Element {
                    name,
                    attributes,
                    children: Vec::new(),
                });
                attach(&mut arena, &mut roots, &open_elements, node);
                if !self_closing {
                    open_elements.push(node);
                }
            }
            Token::EndTag(name) => {
                // Stray end tags with no matching open element are ignored.
                if let Some(pos) = open_elements
                    .iter()
                    .rposition(|&index| arena.is_element_named(index, &name))
                {
                    open_elements.truncate(pos);
                }
            }
        }
    }

    roots.iter().map(|&index| arena.materialize(index)).collect()
}

fn attach(arena: &mut NodeArena, roots: &mut Vec<usize>, open: &[usize], node: usize) {
    match open.last() {
        Some(&parent) => arena.add_child(parent, node),
        None => roots.push(node),
    }
}

#[derive(Debug)]
enum ArenaNode {
    Element {
        name: String,
        attributes: Vec<(String, Option<String>)>,
        children: Vec<usize>,
    },
    Text(String),
    Comment(String),
}

#[derive(Debug)]
struct NodeArena {
    nodes: Vec<ArenaNode>,
}

impl NodeArena {
    fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    fn push(&mut self, node: ArenaNode) -> usize {
        let index = self.nodes.len();
        self.nodes.push(node);
        index
    }

    fn children(&self, index: usize) -> &[usize] {
        match &self.nodes[index] {
            ArenaNode::Element { children, .. } => children,
            _ => &[],
        }
    }

    fn add_child(&mut self, parent: usize, child: usize) {
        if let ArenaNode::Element { children, .. } = &mut self.nodes[parent] {
            children.push(child);
        }
    }

    fn is_element_named(&self, index: usize, target: &str) -> bool {
        matches!(&self.nodes[index], ArenaNode::Element { name, .. } if name == target)
    }

    fn materialize(&self, index: usize) -> Node {
        match &self.nodes[index] {
            ArenaNode::Element {
                name,
                attributes,
                children,
            } => Node::Element {
                id: Id::UNSET,
                name: name.clone(),
                attributes: attributes.clone(),
                children: children.iter().map(|&c| self.materialize(c)).collect(),
            },
            ArenaNode::Text(text) => Node::Text {
                id: Id::UNSET,
                text: text.clone(),
            },
            ArenaNode::Comment(text) => Node::Comment {
                id: Id::UNSET,
                text: text.clone(),
            },
        }
    }
}
