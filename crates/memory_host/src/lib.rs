//! A complete host editor kept in memory.
//!
//! Owns a component tree under a wrapper root, a stylesheet model with a
//! selector registry, per-component scripts and the current selection. Tree and
//! selection changes are announced on an optional [`HostEvent`] channel, so a
//! [`CodePanel`](panel::CodePanel) driven against it sees the same feedback it
//! would from a real editor.

mod stylesheet;
mod tree;

pub use stylesheet::Stylesheet;
pub use tree::{Fragment, ROOT};

use bus::HostEvent;
use core_types::{ComponentId, RuleId, SelectorKey};
use css::RuleDescriptor;
use html::Node;
use html::dom_utils::for_each_element_mut;
use panel::{Host, HostError, HostOp, MarkupScope, MarkupSource, PanelWidths, Selection};
use std::collections::BTreeMap;
use std::sync::mpsc::Sender;
use tree::Tree;

pub struct MemoryHost {
    tree: Tree,
    stylesheet: Stylesheet,
    scripts: BTreeMap<ComponentId, String>,
    selected: Option<ComponentId>,
    style_prefix: String,
    events: Option<Sender<HostEvent>>,
    layout: Option<PanelWidths>,
    reject: Option<HostOp>,
    mutations: usize,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::with_prefix("gjs-")
    }

    /// `style_prefix` marks builder-internal classes, stripped from exports.
    pub fn with_prefix(style_prefix: &str) -> Self {
        MemoryHost {
            tree: Tree::new(),
            stylesheet: Stylesheet::new(),
            scripts: BTreeMap::new(),
            selected: None,
            style_prefix: style_prefix.to_string(),
            events: None,
            layout: None,
            reject: None,
            mutations: 0,
        }
    }

    /// Replace the page with `markup` and merge `style` into the stylesheet.
    /// Nothing is selected afterwards and no event is sent.
    pub fn load(&mut self, markup: &str, style: &str) {
        let fragment = Fragment::parse(markup);
        self.insert_fragment_style(&fragment);
        self.tree.replace_children(fragment.nodes);
        self.scripts.clear();
        self.attach_script(fragment.script, ROOT);
        self.insert_rules(style);
        self.selected = None;
    }

    /// Send tree and selection notifications to `events`.
    pub fn connect(&mut self, events: Sender<HostEvent>) {
        self.events = Some(events);
    }

    /// Make every call of kind `op` fail until cleared with `None`.
    pub fn reject(&mut self, op: Option<HostOp>) {
        self.reject = op;
    }

    /// The host leaves preview mode.
    pub fn stop_preview(&mut self) {
        self.emit(HostEvent::PreviewStopped);
    }

    pub fn find_by_html_id(&self, html_id: &str) -> Option<ComponentId> {
        self.tree.find_by_html_id(html_id)
    }

    pub fn node(&self, id: ComponentId) -> Option<&Node> {
        self.tree.get(id)
    }

    /// The page as live markup, markers included.
    pub fn page_markup(&self) -> String {
        html::inner_html(self.tree.root())
    }

    pub fn stylesheet(&self) -> &Stylesheet {
        &self.stylesheet
    }

    /// Last width pair requested by the panel.
    pub fn layout(&self) -> Option<&PanelWidths> {
        self.layout.as_ref()
    }

    /// Count of tree replacements and stylesheet writes so far.
    pub fn mutation_count(&self) -> usize {
        self.mutations
    }

    fn check(&self, op: HostOp) -> Result<(), HostError> {
        if self.reject == Some(op) {
            return Err(HostError::Rejected {
                op,
                reason: "rejected by host".to_string(),
            });
        }
        Ok(())
    }

    fn component(&self, id: ComponentId) -> Result<&Node, HostError> {
        self.tree.get(id).ok_or(HostError::UnknownComponent(id))
    }

    fn component_mut(&mut self, id: ComponentId) -> Result<&mut Node, HostError> {
        self.tree.get_mut(id).ok_or(HostError::UnknownComponent(id))
    }

    fn emit(&mut self, event: HostEvent) {
        let Some(tx) = &self.events else {
            return;
        };
        if tx.send(event).is_err() {
            log::debug!(target: "memory_host", "event receiver gone, disconnecting");
            self.events = None;
        }
    }

    fn insert_rules(&mut self, style: &str) -> usize {
        let rules = css::parse_rules(style);
        let count = rules.len();
        for rule in rules {
            self.stylesheet.insert(rule);
        }
        count
    }

    fn insert_fragment_style(&mut self, fragment: &Fragment) {
        if !fragment.style.trim().is_empty() {
            let count = self.insert_rules(&fragment.style);
            log::debug!(target: "memory_host", "moved {count} rules from inline style");
        }
    }

    fn attach_script(&mut self, script: Option<String>, fallback: ComponentId) {
        if let Some(script) = script {
            self.scripts.insert(fallback, script);
        }
    }

    fn drop_stale(&mut self) {
        let tree = &self.tree;
        self.scripts.retain(|id, _| tree.contains(*id));
        if self.selected.is_some_and(|id| !tree.contains(id)) {
            self.selected = None;
        }
    }

    /// Copy of the component with builder attributes and prefixed classes removed.
    fn export_node(&self, node: &Node) -> Node {
        let mut node = node.clone();
        let prefix = self.style_prefix.as_str();
        for_each_element_mut(&mut node, &mut |el| {
            if let Node::Element { attributes, .. } = el {
                attributes.retain(|(k, _)| !k.starts_with("data-gjs-"));
            }
            el.retain_classes(|c| !c.starts_with(prefix));
        });
        node
    }
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl Host for MemoryHost {
    fn selected(&self) -> Option<Selection> {
        self.selected.map(|id| Selection {
            id,
            root: id == ROOT,
        })
    }

    fn read_markup(
        &self,
        id: ComponentId,
        source: MarkupSource,
        scope: MarkupScope,
    ) -> Result<String, HostError> {
        self.check(HostOp::ReadMarkup)?;
        let node = self.component(id)?;
        let exported;
        let node = match source {
            MarkupSource::Live => node,
            MarkupSource::Export => {
                exported = self.export_node(node);
                &exported
            }
        };
        Ok(match scope {
            MarkupScope::Inner => html::inner_html(node),
            MarkupScope::Outer => html::outer_html(node),
        })
    }

    fn remove_class(&mut self, id: ComponentId, class: &str) -> Result<bool, HostError> {
        self.check(HostOp::UpdateClass)?;
        Ok(self.component_mut(id)?.remove_class(class))
    }

    fn add_class(&mut self, id: ComponentId, class: &str) -> Result<(), HostError> {
        self.check(HostOp::UpdateClass)?;
        self.component_mut(id)?.add_class(class);
        Ok(())
    }

    fn script(&self, id: ComponentId) -> Result<Option<String>, HostError> {
        self.component(id)?;
        Ok(self.scripts.get(&id).cloned())
    }

    fn generate_style(&self, id: ComponentId) -> Result<String, HostError> {
        self.component(id)?;
        let elements = self.tree.subtree_elements(id);
        let matching = self
            .stylesheet
            .rules()
            .filter(|rule| elements.iter().any(|el| rule.matches(el)));
        Ok(css::stylesheet_css(matching))
    }

    fn replace_subtree(
        &mut self,
        id: ComponentId,
        markup: &str,
    ) -> Result<ComponentId, HostError> {
        self.check(HostOp::ReplaceSubtree)?;
        if id == ROOT {
            return Err(HostError::RootReplaceRejected);
        }
        self.component(id)?;
        let mut fragment = Fragment::parse(markup);
        if fragment.nodes.is_empty() {
            return Err(HostError::InvalidMarkup(
                "markup holds no component".to_string(),
            ));
        }
        let script = fragment.script.take();
        self.insert_fragment_style(&fragment);
        let lead = self
            .tree
            .replace(id, fragment)
            .ok_or(HostError::UnknownComponent(id))?;
        self.attach_script(script, lead);
        self.drop_stale();
        self.mutations += 1;
        log::debug!(target: "memory_host", "replaced {id} with {lead}");
        self.emit(HostEvent::ComponentUpdated { id: lead });
        Ok(lead)
    }

    fn replace_root(&mut self, markup: &str) -> Result<ComponentId, HostError> {
        self.check(HostOp::ReplaceRoot)?;
        let mut fragment = Fragment::parse(markup);
        let script = fragment.script.take();
        self.insert_fragment_style(&fragment);
        self.tree.replace_children(fragment.nodes);
        self.attach_script(script, ROOT);
        self.drop_stale();
        self.mutations += 1;
        log::debug!(target: "memory_host", "replaced root content");
        self.emit(HostEvent::ComponentUpdated { id: ROOT });
        Ok(ROOT)
    }

    fn select(&mut self, id: ComponentId) -> Result<(), HostError> {
        self.check(HostOp::Select)?;
        self.component(id)?;
        if self.selected != Some(id) {
            self.selected = Some(id);
            self.emit(HostEvent::SelectionChanged { selected: Some(id) });
        }
        Ok(())
    }

    fn insert_style_rules(&mut self, style: &str) -> Result<(), HostError> {
        self.check(HostOp::InsertStyleRules)?;
        let count = self.insert_rules(style);
        self.mutations += 1;
        log::debug!(target: "memory_host", "merged {count} rules");
        Ok(())
    }

    fn parse_style_text(&self, style: &str) -> Vec<RuleDescriptor> {
        css::parse_rules(style)
    }

    fn resolve_selector(&self, selectors: &[String]) -> Option<SelectorKey> {
        self.stylesheet.resolve(selectors)
    }

    fn find_rule(&self, key: &SelectorKey, rule: &RuleDescriptor) -> Option<RuleId> {
        self.stylesheet.find(key, rule)
    }

    fn remove_rules(&mut self, ids: &[RuleId]) -> Result<usize, HostError> {
        self.check(HostOp::RemoveRules)?;
        if let Some(missing) = ids.iter().find(|id| !self.stylesheet.contains(**id)) {
            return Err(HostError::Rejected {
                op: HostOp::RemoveRules,
                reason: format!("{missing} is not in the stylesheet"),
            });
        }
        let removed = self.stylesheet.remove(ids);
        self.mutations += 1;
        log::debug!(target: "memory_host", "removed {removed} rules");
        Ok(removed)
    }

    fn resize_panel(&mut self, widths: &PanelWidths) {
        self.layout = Some(widths.clone());
    }
}
