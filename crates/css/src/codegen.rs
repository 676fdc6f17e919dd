use crate::syntax::{AtRule, RuleDescriptor};

/// `selector{name:value;...}` for one rule, without its at-rule wrapper.
/// Rules with no selector (e.g. `@font-face` bodies) emit only the block.
pub fn rule_css(rule: &RuleDescriptor) -> String {
    let mut out = rule.selector_text();
    out.push('{');
    for decl in &rule.declarations {
        out.push_str(&decl.name);
        out.push(':');
        out.push_str(&decl.value);
        out.push(';');
    }
    out.push('}');
    out
}

/// Emit rules in order, plain rules first, then one block per distinct at-rule in
/// first-seen order. Declaration-only at-rules (`@font-face`) are emitted as
/// standalone blocks.
pub fn stylesheet_css<'a>(rules: impl IntoIterator<Item = &'a RuleDescriptor>) -> String {
    let mut plain = String::new();
    let mut groups: Vec<(&AtRule, String)> = Vec::new();
    for rule in rules {
        if rule.declarations.is_empty() {
            continue;
        }
        let Some(at_rule) = &rule.at_rule else {
            plain.push_str(&rule_css(rule));
            continue;
        };
        if rule.selectors.is_empty() && rule.selectors_add.is_empty() {
            plain.push_str(&at_rule_head(at_rule));
            plain.push_str(&rule_css(rule));
            continue;
        }
        match groups.iter_mut().find(|(at, _)| *at == at_rule) {
            Some((_, body)) => body.push_str(&rule_css(rule)),
            None => groups.push((at_rule, rule_css(rule))),
        }
    }
    for (at_rule, body) in groups {
        plain.push_str(&at_rule_head(at_rule));
        plain.push('{');
        plain.push_str(&body);
        plain.push('}');
    }
    plain
}

fn at_rule_head(at_rule: &AtRule) -> String {
    if at_rule.params.is_empty() {
        format!("@{}", at_rule.kind)
    } else {
        format!("@{} {}", at_rule.kind, at_rule.params)
    }
}
