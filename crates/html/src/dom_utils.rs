use crate::{Id, Node};

/// Detach every element named `tag` (at any depth) from `nodes`, returning them in
/// document order.
pub fn take_elements_named(nodes: &mut Vec<Node>, tag: &str) -> Vec<Node> {
    let mut taken = Vec::new();
    take_into(nodes, tag, &mut taken);
    taken
}

fn take_into(nodes: &mut Vec<Node>, tag: &str, taken: &mut Vec<Node>) {
    let mut kept = Vec::with_capacity(nodes.len());
    for mut node in nodes.drain(..) {
        if node.is_element_named(tag) {
            taken.push(node);
            continue;
        }
        if let Some(children) = node.children_mut() {
            take_into(children, tag, taken);
        }
        kept.push(node);
    }
    *nodes = kept;
}

/// Concatenated text content of a node (raw for <script>/<style>).
pub fn text_content(node: &Node) -> String {
    fn walk(node: &Node, out: &mut String) {
        match node {
            Node::Text { text, .. } => out.push_str(text),
            Node::Element { children, .. } => {
                for c in children {
                    walk(c, out);
                }
            }
            Node::Comment { .. } => {}
        }
    }
    let mut out = String::new();
    walk(node, &mut out);
    out
}

/// Assign fresh ids to every node that still carries [`Id::UNSET`].
pub fn assign_node_ids(nodes: &mut [Node], next: &mut u32) {
    for node in nodes {
        if node.id() == Id::UNSET {
            node.set_id(Id(*next));
            *next = next.wrapping_add(1);
        }
        if let Some(children) = node.children_mut() {
            assign_node_ids(children, next);
        }
    }
}

pub fn find_node_by_id(node: &Node, id: Id) -> Option<&Node> {
    if node.id() == id {
        return Some(node);
    }
    node.children()
        .iter()
        .find_map(|c| find_node_by_id(c, id))
}

pub fn find_node_mut(node: &mut Node, id: Id) -> Option<&mut Node> {
    if node.id() == id {
        return Some(node);
    }
    node.children_mut()?
        .iter_mut()
        .find_map(|c| find_node_mut(c, id))
}

/// Locate the sibling list that contains `id` and the node's index in it.
pub fn find_parent_slot(node: &mut Node, id: Id) -> Option<(&mut Vec<Node>, usize)> {
    let children = node.children_mut()?;
    if let Some(pos) = children.iter().position(|c| c.id() == id) {
        return Some((children, pos));
    }
    children.iter_mut().find_map(|c| find_parent_slot(c, id))
}

/// Visit every element in the subtree rooted at `node`, including `node` itself.
pub fn for_each_element<'a>(node: &'a Node, f: &mut dyn FnMut(&'a Node)) {
    if let Node::Element { children, .. } = node {
        f(node);
        for c in children {
            for_each_element(c, f);
        }
    }
}

/// Apply `f` to every element in the subtree, including `node` itself.
pub fn for_each_element_mut(node: &mut Node, f: &mut dyn FnMut(&mut Node)) {
    if matches!(node, Node::Element { .. }) {
        f(node);
    }
    if let Some(children) = node.children_mut() {
        for c in children {
            for_each_element_mut(c, f);
        }
    }
}
