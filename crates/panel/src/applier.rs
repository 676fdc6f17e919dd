//! Pushes edited text back into the host.

use crate::host::{Host, HostError};
use crate::serializer::Target;
use crate::snapshot::Snapshot;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Applied {
    /// Markup handed to the host, including the inlined `<style>` block.
    pub text: String,
    /// The component now holding the applied markup.
    pub target: Target,
}

/// Replace the target with `markup`, inlining the ID-scoped rules found in
/// `style`. `Ok(None)` when the trimmed markup is empty or already applied.
pub fn apply_markup<H: Host + ?Sized>(
    host: &mut H,
    target: Target,
    markup: &str,
    style: &str,
    snapshot: &mut Snapshot,
) -> Result<Option<Applied>, HostError> {
    let trimmed = markup.trim();
    if snapshot.is_redundant(trimmed) {
        log::debug!(target: "codepanel.apply", "markup unchanged, skipping apply");
        return Ok(None);
    }

    let id_styles = id_scoped_rules(style);
    let mut text = String::with_capacity(trimmed.len() + id_styles.len() + 15);
    text.push_str(trimmed);
    text.push_str("<style>");
    text.push_str(&id_styles);
    text.push_str("</style>");

    let target = match target {
        Target::Root(_) => {
            let root = host.replace_root(&text)?;
            snapshot.record(trimmed);
            Target::Root(root)
        }
        Target::Subtree(id) => {
            let replacement = host.replace_subtree(id, &text)?;
            snapshot.record(trimmed);
            if let Err(err) = host.select(replacement) {
                log::warn!(target: "codepanel.apply", "could not reselect {replacement}: {err}");
            }
            Target::Subtree(replacement)
        }
    };
    log::debug!(target: "codepanel.apply", "applied {} bytes of markup to {:?}", text.len(), target);
    Ok(Some(Applied { text, target }))
}

/// Merge `style` into the host stylesheet. `Ok(None)` when the trimmed text is
/// empty or already applied.
pub fn apply_style<H: Host + ?Sized>(
    host: &mut H,
    style: &str,
    snapshot: &mut Snapshot,
) -> Result<Option<String>, HostError> {
    let trimmed = style.trim();
    if snapshot.is_redundant(trimmed) {
        log::debug!(target: "codepanel.apply", "style unchanged, skipping apply");
        return Ok(None);
    }
    host.insert_style_rules(trimmed)?;
    snapshot.record(trimmed);
    log::debug!(target: "codepanel.apply", "applied {} bytes of style", trimmed.len());
    Ok(Some(trimmed.to_string()))
}

/// Concatenate the rule blocks of formatted `style` whose selector starts with `#`.
///
/// Blocks are cut at every `}\n`, which assumes the formatter's layout: a rule
/// body containing a literal `}` followed by a newline (inside a string, or a
/// nested at-rule) is split in the wrong place. A block that lost its closing
/// brace to the cut gets it back.
pub fn id_scoped_rules(style: &str) -> String {
    let mut out = String::new();
    for piece in style.split("}\n") {
        let block = piece.trim_start();
        if !block.starts_with('#') {
            continue;
        }
        out.push_str(block);
        if !block.trim_end().ends_with('}') {
            out.push('}');
        }
    }
    out
}
