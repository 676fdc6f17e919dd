//! Rule model: ordered rules keyed by resolved selector, plus the selector
//! registry that hands out [`SelectorId`]s.

use core_types::{RuleId, SelectorId, SelectorKey};
use css::RuleDescriptor;

#[derive(Clone, Debug)]
struct StoredRule {
    id: RuleId,
    key: SelectorKey,
    rule: RuleDescriptor,
}

#[derive(Debug, Default)]
pub struct Stylesheet {
    rules: Vec<StoredRule>,
    registry: Vec<String>,
    next_rule: u32,
}

impl Stylesheet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id for a selector token (`#a`, `.b`), registering it on first sight.
    pub fn register(&mut self, token: &str) -> SelectorId {
        if let Some(id) = self.lookup(token) {
            return id;
        }
        self.registry.push(token.to_string());
        SelectorId(self.registry.len() as u32 - 1)
    }

    pub fn lookup(&self, token: &str) -> Option<SelectorId> {
        self.registry
            .iter()
            .position(|t| t == token)
            .map(|index| SelectorId(index as u32))
    }

    /// Key for already-registered tokens. An empty token list has no key.
    pub fn resolve(&self, tokens: &[String]) -> Option<SelectorKey> {
        if tokens.is_empty() {
            return None;
        }
        let ids = tokens
            .iter()
            .map(|t| self.lookup(t))
            .collect::<Option<Vec<_>>>()?;
        Some(SelectorKey::new(ids))
    }

    /// Add a rule, merging its declarations into an existing rule with the same
    /// selector key, state, extra selectors and at-rule. Later declarations win.
    pub fn insert(&mut self, rule: RuleDescriptor) -> RuleId {
        let ids = rule.selectors.iter().map(|t| self.register(t)).collect();
        let key = SelectorKey::new(ids);
        if let Some(stored) = self
            .rules
            .iter_mut()
            .find(|s| s.key == key && same_target(&s.rule, &rule))
        {
            for decl in rule.declarations {
                match stored
                    .rule
                    .declarations
                    .iter_mut()
                    .find(|d| d.name == decl.name)
                {
                    Some(existing) => existing.value = decl.value,
                    None => stored.rule.declarations.push(decl),
                }
            }
            return stored.id;
        }
        self.next_rule += 1;
        let id = RuleId(self.next_rule);
        log::trace!(target: "memory_host", "new {id} for {:?}", rule.selector_text());
        self.rules.push(StoredRule { id, key, rule });
        id
    }

    pub fn find(&self, key: &SelectorKey, rule: &RuleDescriptor) -> Option<RuleId> {
        self.rules
            .iter()
            .find(|s| &s.key == key && same_target(&s.rule, rule))
            .map(|s| s.id)
    }

    pub fn contains(&self, id: RuleId) -> bool {
        self.rules.iter().any(|s| s.id == id)
    }

    pub fn get(&self, id: RuleId) -> Option<&RuleDescriptor> {
        self.rules.iter().find(|s| s.id == id).map(|s| &s.rule)
    }

    /// Drop every listed rule. Unknown ids are ignored.
    pub fn remove(&mut self, ids: &[RuleId]) -> usize {
        let before = self.rules.len();
        self.rules.retain(|s| !ids.contains(&s.id));
        before - self.rules.len()
    }

    /// Rules in model order.
    pub fn rules(&self) -> impl Iterator<Item = &RuleDescriptor> {
        self.rules.iter().map(|s| &s.rule)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

fn same_target(a: &RuleDescriptor, b: &RuleDescriptor) -> bool {
    a.state == b.state && a.selectors_add == b.selectors_add && a.at_rule == b.at_rule
}

#[cfg(test)]
mod tests {
    use super::*;
    use css::parse_rules;

    fn sheet(src: &str) -> Stylesheet {
        let mut sheet = Stylesheet::new();
        for rule in parse_rules(src) {
            sheet.insert(rule);
        }
        sheet
    }

    #[test]
    fn same_key_merges_declarations() {
        let sheet = sheet("#a { color: red; top: 0 } #a { color: blue; left: 1px }");
        assert_eq!(sheet.len(), 1);
        let rule = sheet.rules().next().unwrap();
        assert_eq!(rule.declaration("color"), Some("blue"));
        assert_eq!(rule.declaration("top"), Some("0"));
        assert_eq!(rule.declaration("left"), Some("1px"));
    }

    #[test]
    fn state_and_media_make_distinct_rules() {
        let sheet = sheet(
            "#a { color: red } #a:hover { color: blue } \
             @media (max-width: 480px) { #a { color: green } }",
        );
        assert_eq!(sheet.len(), 3);
    }

    #[test]
    fn compound_order_does_not_matter() {
        let mut sheet = sheet(".a.b { top: 0 }");
        let swapped = parse_rules(".b.a { left: 0 }").remove(0);
        let key = sheet.resolve(&swapped.selectors).unwrap();
        let id = sheet.find(&key, &swapped).unwrap();
        assert_eq!(sheet.insert(swapped), id);
        assert_eq!(sheet.len(), 1);
    }

    #[test]
    fn unknown_or_empty_tokens_do_not_resolve() {
        let sheet = sheet("#a { top: 0 }");
        assert!(sheet.resolve(&["#a".to_string()]).is_some());
        assert!(sheet.resolve(&["#a".to_string(), ".x".to_string()]).is_none());
        assert!(sheet.resolve(&[]).is_none());
    }

    #[test]
    fn remove_is_a_batch() {
        let mut sheet = sheet("#a { top: 0 } .b { top: 0 } .c { top: 0 }");
        assert_eq!(sheet.remove(&[RuleId(1), RuleId(3), RuleId(9)]), 2);
        assert_eq!(sheet.len(), 1);
        assert!(sheet.contains(RuleId(2)));
        assert_eq!(sheet.get(RuleId(2)).map(|r| r.selector_text()), Some(".b".to_string()));
    }
}
