//! Recording host double for unit tests.

use crate::host::{Host, HostError, HostOp, MarkupScope, MarkupSource, Selection};
use crate::options::PanelWidths;
use core_types::{ComponentId, RuleId, SelectorId, SelectorKey};
use css::RuleDescriptor;
use std::cell::RefCell;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    ReadMarkup(MarkupSource, MarkupScope),
    RemoveClass(String),
    AddClass(String),
    ReplaceSubtree(ComponentId, String),
    ReplaceRoot(String),
    Select(ComponentId),
    InsertStyle(String),
    RemoveRules(Vec<RuleId>),
    Resize(PanelWidths),
}

/// One component with a class list and inner markup, a flat rule table, and a
/// call log.
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub selection: Option<Selection>,
    pub classes: Vec<String>,
    pub inner: String,
    pub script: Option<String>,
    pub style: String,
    /// Registered selector tokens; the index is the `SelectorId`.
    pub registry: Vec<String>,
    pub rules: Vec<(SelectorKey, RuleDescriptor, RuleId)>,
    pub fail_on: Option<HostOp>,
    pub next_id: u32,
    calls: RefCell<Vec<Call>>,
}

impl RecordingHost {
    pub fn with_component(inner: &str) -> Self {
        RecordingHost {
            selection: Some(Selection {
                id: ComponentId(1),
                root: false,
            }),
            classes: vec!["box".to_string(), "gjs-selected".to_string()],
            inner: inner.to_string(),
            next_id: 2,
            ..RecordingHost::default()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn mutation_count(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| {
                matches!(
                    c,
                    Call::ReplaceSubtree(..)
                        | Call::ReplaceRoot(_)
                        | Call::InsertStyle(_)
                        | Call::RemoveRules(_)
                )
            })
            .count()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Register a rule like `#x:hover` so it can be resolved and removed.
    pub fn add_rule(&mut self, css: &str) -> RuleId {
        let rule = css::parse_rules(css)
            .into_iter()
            .next()
            .expect("test rule parses");
        let ids = rule
            .selectors
            .iter()
            .map(|token| match self.registry.iter().position(|t| t == token) {
                Some(index) => SelectorId(index as u32),
                None => {
                    self.registry.push(token.clone());
                    SelectorId(self.registry.len() as u32 - 1)
                }
            })
            .collect();
        let id = RuleId(self.rules.len() as u32 + 1);
        self.rules.push((SelectorKey::new(ids), rule, id));
        id
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn check(&self, op: HostOp) -> Result<(), HostError> {
        if self.fail_on == Some(op) {
            return Err(HostError::Rejected {
                op,
                reason: "refused by test".to_string(),
            });
        }
        Ok(())
    }

    fn check_id(&self, id: ComponentId) -> Result<(), HostError> {
        match self.selection {
            Some(selection) if selection.id == id => Ok(()),
            _ => Err(HostError::UnknownComponent(id)),
        }
    }
}

impl Host for RecordingHost {
    fn selected(&self) -> Option<Selection> {
        self.selection
    }

    fn read_markup(
        &self,
        id: ComponentId,
        source: MarkupSource,
        scope: MarkupScope,
    ) -> Result<String, HostError> {
        self.record(Call::ReadMarkup(source, scope));
        self.check(HostOp::ReadMarkup)?;
        self.check_id(id)?;
        Ok(match (source, scope) {
            (_, MarkupScope::Inner) => self.inner.clone(),
            (MarkupSource::Live, MarkupScope::Outer) => {
                format!("<div class=\"{}\">{}</div>", self.classes.join(" "), self.inner)
            }
            (MarkupSource::Export, MarkupScope::Outer) => format!("<div>{}</div>", self.inner),
        })
    }

    fn remove_class(&mut self, id: ComponentId, class: &str) -> Result<bool, HostError> {
        self.record(Call::RemoveClass(class.to_string()));
        self.check(HostOp::UpdateClass)?;
        self.check_id(id)?;
        let before = self.classes.len();
        self.classes.retain(|c| c != class);
        Ok(self.classes.len() != before)
    }

    fn add_class(&mut self, id: ComponentId, class: &str) -> Result<(), HostError> {
        self.record(Call::AddClass(class.to_string()));
        self.check(HostOp::UpdateClass)?;
        self.check_id(id)?;
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
        Ok(())
    }

    fn script(&self, id: ComponentId) -> Result<Option<String>, HostError> {
        self.check_id(id)?;
        Ok(self.script.clone())
    }

    fn generate_style(&self, id: ComponentId) -> Result<String, HostError> {
        self.check_id(id)?;
        Ok(self.style.clone())
    }

    fn replace_subtree(
        &mut self,
        id: ComponentId,
        markup: &str,
    ) -> Result<ComponentId, HostError> {
        self.check(HostOp::ReplaceSubtree)?;
        self.check_id(id)?;
        self.record(Call::ReplaceSubtree(id, markup.to_string()));
        let new_id = ComponentId(self.next_id);
        self.next_id += 1;
        Ok(new_id)
    }

    fn replace_root(&mut self, markup: &str) -> Result<ComponentId, HostError> {
        self.check(HostOp::ReplaceRoot)?;
        self.record(Call::ReplaceRoot(markup.to_string()));
        Ok(self.selection.map_or(ComponentId(0), |s| s.id))
    }

    fn select(&mut self, id: ComponentId) -> Result<(), HostError> {
        self.check(HostOp::Select)?;
        self.record(Call::Select(id));
        self.selection = Some(Selection { id, root: false });
        Ok(())
    }

    fn insert_style_rules(&mut self, style: &str) -> Result<(), HostError> {
        self.check(HostOp::InsertStyleRules)?;
        self.record(Call::InsertStyle(style.to_string()));
        Ok(())
    }

    fn parse_style_text(&self, style: &str) -> Vec<RuleDescriptor> {
        css::parse_rules(style)
    }

    fn resolve_selector(&self, selectors: &[String]) -> Option<SelectorKey> {
        if selectors.is_empty() {
            return None;
        }
        let ids = selectors
            .iter()
            .map(|token| {
                self.registry
                    .iter()
                    .position(|t| t == token)
                    .map(|index| SelectorId(index as u32))
            })
            .collect::<Option<Vec<_>>>()?;
        Some(SelectorKey::new(ids))
    }

    fn find_rule(&self, key: &SelectorKey, rule: &RuleDescriptor) -> Option<RuleId> {
        self.rules
            .iter()
            .find(|(k, r, _)| {
                k == key
                    && r.state == rule.state
                    && r.selectors_add == rule.selectors_add
                    && r.at_rule == rule.at_rule
            })
            .map(|(_, _, id)| *id)
    }

    fn remove_rules(&mut self, ids: &[RuleId]) -> Result<usize, HostError> {
        self.check(HostOp::RemoveRules)?;
        self.record(Call::RemoveRules(ids.to_vec()));
        let before = self.rules.len();
        self.rules.retain(|(_, _, id)| !ids.contains(id));
        Ok(before - self.rules.len())
    }

    fn resize_panel(&mut self, widths: &PanelWidths) {
        self.record(Call::Resize(widths.clone()));
    }
}
