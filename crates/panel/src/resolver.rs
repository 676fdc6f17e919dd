//! Maps selected style text back to rules in the host model.

use crate::host::{Host, HostError};
use core_types::RuleId;
use css::RuleDescriptor;
use text_surface::TextSurface;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Rules removed from the host model, in selection order.
    pub removed_rules: Vec<RuleId>,
    /// Selector text of rules with no identity in the host. Their text is still
    /// removed from the surface, so text and model may diverge for these.
    pub unresolved: Vec<String>,
    /// The text cut from the surface. Empty when there was no selection.
    pub removed_text: String,
}

/// Registry lookup for the selector tokens, then the rule for that key.
pub fn resolve_rule<H: Host + ?Sized>(host: &H, rule: &RuleDescriptor) -> Option<RuleId> {
    let key = host.resolve_selector(&rule.selectors)?;
    host.find_rule(&key, rule)
}

/// Resolve every descriptor, skipping unknown ones. Duplicates are dropped.
pub fn resolve_rules<H: Host + ?Sized>(host: &H, rules: &[RuleDescriptor]) -> Vec<RuleId> {
    partition(host, rules).0
}

fn partition<H: Host + ?Sized>(host: &H, rules: &[RuleDescriptor]) -> (Vec<RuleId>, Vec<String>) {
    let mut resolved = Vec::with_capacity(rules.len());
    let mut unresolved = Vec::new();
    for rule in rules {
        match resolve_rule(host, rule) {
            Some(id) if !resolved.contains(&id) => resolved.push(id),
            Some(_) => {}
            None => {
                let selector = rule.selector_text();
                log::debug!(target: "codepanel.resolve", "no rule for selector {selector:?}, skipping");
                unresolved.push(selector);
            }
        }
    }
    (resolved, unresolved)
}

/// Remove the rules written in the surface's selection from the host, then cut
/// the selection from the surface.
///
/// Without a selection nothing happens. A failing batch removal is returned and
/// the text is kept; selectors that do not resolve never fail.
pub fn delete_selection<H, S>(host: &mut H, surface: &mut S) -> Result<DeleteOutcome, HostError>
where
    H: Host + ?Sized,
    S: TextSurface + ?Sized,
{
    let Some(range) = surface.selection() else {
        return Ok(DeleteOutcome::default());
    };
    let Some(selected) = range.get(surface.text()).map(str::to_string) else {
        log::debug!(target: "codepanel.resolve", "selection {range:?} is not a valid range");
        return Ok(DeleteOutcome::default());
    };

    let rules = host.parse_style_text(&selected);
    let (removed_rules, unresolved) = partition(&*host, &rules);

    if !removed_rules.is_empty() {
        host.remove_rules(&removed_rules)?;
    }
    surface.replace_range(range, "");
    log::debug!(
        target: "codepanel.resolve",
        "deleted {} bytes of style, removed {} rules, {} unresolved",
        selected.len(),
        removed_rules.len(),
        unresolved.len()
    );
    Ok(DeleteOutcome {
        removed_rules,
        unresolved,
        removed_text: selected,
    })
}
