//! Component tree: an element wrapper whose descendants are the components.

use core_types::ComponentId;
use html::dom_utils::{
    assign_node_ids, find_node_by_id, find_node_mut, find_parent_slot, for_each_element,
    take_elements_named, text_content,
};
use html::{Id, Node};

pub const ROOT: ComponentId = ComponentId(1);

/// Markup parsed for insertion, with its `<style>` and `<script>` blocks lifted out.
#[derive(Debug, Default)]
pub struct Fragment {
    pub nodes: Vec<Node>,
    pub style: String,
    pub script: Option<String>,
}

impl Fragment {
    pub fn parse(markup: &str) -> Self {
        let mut nodes = html::parse_fragment(markup);
        let mut style = String::new();
        for node in take_elements_named(&mut nodes, "style") {
            style.push_str(&text_content(&node));
            style.push('\n');
        }
        let scripts: Vec<String> = take_elements_named(&mut nodes, "script")
            .iter()
            .map(text_content)
            .filter(|s| !s.trim().is_empty())
            .collect();
        let script = (!scripts.is_empty()).then(|| scripts.join("\n"));
        // Whitespace between top-level components is layout, not content.
        nodes.retain(|n| !matches!(n, Node::Text { text, .. } if text.trim().is_empty()));
        Fragment {
            nodes,
            style,
            script,
        }
    }

    /// The node that becomes the replacement's handle: the first element, or the
    /// first node when there is no element.
    fn lead(&self) -> Option<ComponentId> {
        self.nodes
            .iter()
            .find(|n| n.name().is_some())
            .or_else(|| self.nodes.first())
            .map(|n| ComponentId(n.id().0))
    }
}

#[derive(Debug)]
pub struct Tree {
    root: Node,
    next_id: u32,
}

impl Tree {
    pub fn new() -> Self {
        let mut root = Node::element("body");
        root.set_id(Id(ROOT.0));
        Tree {
            root,
            next_id: ROOT.0 + 1,
        }
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn get(&self, id: ComponentId) -> Option<&Node> {
        find_node_by_id(&self.root, Id(id.0))
    }

    pub fn get_mut(&mut self, id: ComponentId) -> Option<&mut Node> {
        find_node_mut(&mut self.root, Id(id.0))
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.get(id).is_some()
    }

    /// Swap the component `id` for the fragment's nodes. Returns the lead
    /// replacement, or `None` if `id` is the root, unknown, or the fragment is
    /// empty; the tree is untouched in that case.
    pub fn replace(&mut self, id: ComponentId, mut fragment: Fragment) -> Option<ComponentId> {
        if id == ROOT || fragment.nodes.is_empty() {
            return None;
        }
        let (siblings, pos) = find_parent_slot(&mut self.root, Id(id.0))?;
        assign_node_ids(&mut fragment.nodes, &mut self.next_id);
        let lead = fragment.lead();
        siblings.splice(pos..=pos, fragment.nodes);
        lead
    }

    /// Replace the wrapper's children.
    pub fn replace_children(&mut self, mut nodes: Vec<Node>) {
        assign_node_ids(&mut nodes, &mut self.next_id);
        if let Some(children) = self.root.children_mut() {
            *children = nodes;
        }
    }

    /// First element carrying `id="{html_id}"`.
    pub fn find_by_html_id(&self, html_id: &str) -> Option<ComponentId> {
        let mut found = None;
        for_each_element(&self.root, &mut |node| {
            if found.is_none() && node.attr("id") == Some(html_id) {
                found = Some(ComponentId(node.id().0));
            }
        });
        found
    }

    /// The component and every element below it.
    pub fn subtree_elements(&self, id: ComponentId) -> Vec<&Node> {
        let mut out = Vec::new();
        if let Some(node) = self.get(id) {
            for_each_element(node, &mut |el| out.push(el));
        }
        out
    }
}

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fragment_lifts_style_and_script() {
        let fragment = Fragment::parse(
            "<div id=\"a\">x<script>go()</script></div><style>#a{top:0}</style>",
        );
        assert_eq!(fragment.style, "#a{top:0}\n");
        assert_eq!(fragment.script.as_deref(), Some("go()"));
        assert_eq!(html::nodes_html(&fragment.nodes), "<div id=\"a\">x</div>");
    }

    #[test]
    fn replace_splices_in_place_and_returns_first_element() {
        let mut tree = Tree::new();
        tree.replace_children(html::parse_fragment("<p>a</p><p id=\"b\">b</p><p>c</p>"));
        let b = tree.find_by_html_id("b").unwrap();

        let lead = tree.replace(b, Fragment::parse("text<span>1</span><span>2</span>"));
        assert_eq!(
            html::inner_html(tree.root()),
            "<p>a</p>text<span>1</span><span>2</span><p>c</p>"
        );
        let lead = lead.unwrap();
        assert_eq!(tree.get(lead).and_then(|n| n.name()), Some("span"));
        assert!(!tree.contains(b));
    }

    #[test]
    fn root_and_empty_replacements_are_refused() {
        let mut tree = Tree::new();
        tree.replace_children(html::parse_fragment("<p id=\"a\">a</p>"));
        let a = tree.find_by_html_id("a").unwrap();
        assert_eq!(tree.replace(ROOT, Fragment::parse("<p>x</p>")), None);
        assert_eq!(tree.replace(a, Fragment::parse("<style>#a{}</style>")), None);
        assert_eq!(html::inner_html(tree.root()), "<p id=\"a\">a</p>");
    }

    #[test]
    fn subtree_elements_include_the_component() {
        let mut tree = Tree::new();
        tree.replace_children(html::parse_fragment("<ul id=\"l\"><li>1</li><li>2</li></ul>"));
        let list = tree.find_by_html_id("l").unwrap();
        let names: Vec<_> = tree
            .subtree_elements(list)
            .iter()
            .filter_map(|n| n.name())
            .collect();
        assert_eq!(names, ["ul", "li", "li"]);
    }
}
