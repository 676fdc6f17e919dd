use crate::scan::{skip_string, strip_comments};
use html::Node;

// A single CSS property: "color: red"
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    Universal,
    Type(String),  // element/tag selector
    Id(String),    // #id selector
    Class(String), // .class selector
}

/// The at-rule a rule is nested in, e.g. `@media (max-width: 768px)`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtRule {
    pub kind: String,
    pub params: String,
}

/// One parsed style rule.
///
/// A selector list made of simple class/id compounds (`.a.b`, `#x:hover`) yields
/// one descriptor per compound with the tokens in `selectors` and the pseudo-class
/// in `state`. Anything else (type selectors, combinators, attribute selectors)
/// is kept verbatim, whitespace-normalized, in `selectors_add`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleDescriptor {
    pub selectors: Vec<String>,
    pub state: Option<String>,
    pub selectors_add: String,
    pub declarations: Vec<Declaration>,
    pub at_rule: Option<AtRule>,
}

impl RuleDescriptor {
    /// Selector text as written back into a stylesheet.
    pub fn selector_text(&self) -> String {
        let mut out = self.selectors.concat();
        if let Some(state) = &self.state {
            out.push(':');
            out.push_str(state);
        }
        if !self.selectors_add.is_empty() {
            if !out.is_empty() {
                out.push_str(", ");
            }
            out.push_str(&self.selectors_add);
        }
        out
    }

    /// Does this rule target `node`? Pseudo-classes are ignored; complex selectors
    /// are matched on their subject compound only.
    pub fn matches(&self, node: &Node) -> bool {
        if !self.selectors.is_empty() {
            return self
                .selectors
                .iter()
                .all(|token| Selector::parse(token).is_some_and(|s| s.matches(node)));
        }
        self.selectors_add.split(',').any(|item| {
            subject_compound(item).is_some_and(|compound| compound_matches(&compound, node))
        })
    }

    pub fn declaration(&self, name: &str) -> Option<&str> {
        self.declarations
            .iter()
            .rev()
            .find(|d| d.name == name)
            .map(|d| d.value.as_str())
    }
}

impl Selector {
    // input: "#id", ".class", "div", "*"
    // output: Some(Selector::Id("id")), ...
    pub fn parse(s: &str) -> Option<Selector> {
        let s = s.trim();
        if s.is_empty() {
            return None;
        }
        if s == "*" {
            return Some(Selector::Universal);
        }
        if let Some(id) = s.strip_prefix('#') {
            return is_ident(id).then(|| Selector::Id(id.to_string()));
        }
        if let Some(class) = s.strip_prefix('.') {
            return is_ident(class).then(|| Selector::Class(class.to_string()));
        }
        if is_ident(s) {
            return Some(Selector::Type(s.to_ascii_lowercase()));
        }
        None
    }

    pub fn matches(&self, node: &Node) -> bool {
        let Some(name) = node.name() else {
            return false;
        };
        match self {
            Selector::Universal => true,
            Selector::Type(t) => name.eq_ignore_ascii_case(t),
            Selector::Id(want) => node.attr("id") == Some(want.as_str()),
            Selector::Class(want) => node.has_class(want),
        }
    }
}

fn is_ident(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii())
}

/// Split `div.a#b` into its simple selectors. Pseudo-classes and pseudo-elements
/// are dropped; attribute selectors make the compound unparseable.
pub fn parse_compound(s: &str) -> Option<Vec<Selector>> {
    let s = s.split(':').next().unwrap_or_default().trim();
    if s.is_empty() {
        return None;
    }
    let mut out = Vec::new();
    let mut start = 0;
    for (i, c) in s.char_indices().skip(1) {
        if c == '.' || c == '#' {
            out.push(Selector::parse(&s[start..i])?);
            start = i;
        }
    }
    out.push(Selector::parse(&s[start..])?);
    Some(out)
}

/// The compound a complex selector ultimately targets (`ul > li.a` -> `li.a`).
pub fn subject_compound(selector: &str) -> Option<Vec<Selector>> {
    let last = selector
        .rsplit(|c: char| c.is_whitespace() || c == '>' || c == '+' || c == '~')
        .find(|part| !part.is_empty())?;
    parse_compound(last)
}

pub fn compound_matches(compound: &[Selector], node: &Node) -> bool {
    !compound.is_empty() && compound.iter().all(|s| s.matches(node))
}

// input: "color: red; font-size: 12px;"
// output: vec![Declaration { name: "color", value: "red" }, Declaration { name: "font-size", value: "12px" }]
pub fn parse_declarations(input: &str) -> Vec<Declaration> {
    split_outside_strings(input, b';')
        .into_iter()
        .filter_map(|pair| {
            let (n, v) = pair.split_once(':')?;
            let name = n.trim().to_ascii_lowercase();
            if name.is_empty() {
                return None;
            }
            let value = normalize_ws(v);
            Some(Declaration { name, value })
        })
        .collect()
}

/// Parse stylesheet text into rule descriptors, in source order. Comments are
/// ignored, statement at-rules (`@import ...;`) are skipped, and an unclosed
/// final block runs to the end of input.
pub fn parse_rules(input: &str) -> Vec<RuleDescriptor> {
    let cleaned = strip_comments(input);
    let mut out = Vec::new();
    parse_block_list(&cleaned, None, &mut out);
    out
}

fn parse_block_list(src: &str, at_rule: Option<&AtRule>, out: &mut Vec<RuleDescriptor>) {
    let mut rest = src;
    while let Some((prelude, body, after)) = next_block(rest) {
        rest = after;
        let prelude = prelude.trim();
        if let Some(at) = prelude.strip_prefix('@') {
            let (kind, params) = at.split_once(char::is_whitespace).unwrap_or((at, ""));
            let nested = AtRule {
                kind: kind.to_ascii_lowercase(),
                params: normalize_ws(params),
            };
            if body.contains('{') {
                parse_block_list(body, Some(&nested), out);
            } else {
                out.push(RuleDescriptor {
                    declarations: parse_declarations(body),
                    at_rule: Some(nested),
                    ..RuleDescriptor::default()
                });
            }
            continue;
        }
        if prelude.is_empty() {
            continue;
        }
        push_rules(prelude, body, at_rule, out);
    }
}

fn push_rules(prelude: &str, body: &str, at_rule: Option<&AtRule>, out: &mut Vec<RuleDescriptor>) {
    let declarations = parse_declarations(body);
    let mut complex = Vec::new();
    for item in prelude.split(',') {
        let item = normalize_ws(item);
        if item.is_empty() {
            continue;
        }
        match simple_compound(&item) {
            Some((selectors, state)) => out.push(RuleDescriptor {
                selectors,
                state,
                selectors_add: String::new(),
                declarations: declarations.clone(),
                at_rule: at_rule.cloned(),
            }),
            None => complex.push(item),
        }
    }
    if !complex.is_empty() {
        out.push(RuleDescriptor {
            selectors_add: complex.join(", "),
            declarations,
            at_rule: at_rule.cloned(),
            ..RuleDescriptor::default()
        });
    }
}

/// `.a.b`, `#x:hover` -> (tokens, state). Only class and id tokens qualify.
fn simple_compound(item: &str) -> Option<(Vec<String>, Option<String>)> {
    let (body, state) = match item.split_once(':') {
        Some((body, state)) if is_ident(state) => (body, Some(state.to_string())),
        Some(_) => return None,
        None => (item, None),
    };
    let compound = parse_compound(body)?;
    let mut tokens = Vec::with_capacity(compound.len());
    for selector in compound {
        match selector {
            Selector::Id(id) => tokens.push(format!("#{id}")),
            Selector::Class(class) => tokens.push(format!(".{class}")),
            Selector::Universal | Selector::Type(_) => return None,
        }
    }
    Some((tokens, state))
}

/// Next `prelude { body }` pair at nesting depth 0, with the text after it.
fn next_block(src: &str) -> Option<(&str, &str, &str)> {
    let bytes = src.as_bytes();
    let mut i = 0;
    let mut prelude_start = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => i = skip_string(bytes, i).unwrap_or(bytes.len()),
            b';' => {
                // Statement at-rule or stray declaration outside any block.
                i += 1;
                prelude_start = i;
            }
            b'}' => {
                i += 1;
                prelude_start = i;
            }
            b'{' => {
                let body_start = i + 1;
                let mut depth = 1usize;
                let mut j = body_start;
                while j < bytes.len() {
                    match bytes[j] {
                        b'"' | b'\'' => {
                            j = skip_string(bytes, j).unwrap_or(bytes.len());
                            continue;
                        }
                        b'{' => depth += 1,
                        b'}' => {
                            depth -= 1;
                            if depth == 0 {
                                return Some((
                                    &src[prelude_start..i],
                                    &src[body_start..j],
                                    &src[j + 1..],
                                ));
                            }
                        }
                        _ => {}
                    }
                    j += 1;
                }
                return Some((&src[prelude_start..i], &src[body_start..], ""));
            }
            _ => i += 1,
        }
    }
    None
}

fn split_outside_strings(input: &str, sep: u8) -> Vec<&str> {
    let bytes = input.as_bytes();
    let mut parts = Vec::new();
    let mut start = 0;
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => i = skip_string(bytes, i).unwrap_or(bytes.len()),
            b if b == sep => {
                parts.push(&input[start..i]);
                i += 1;
                start = i;
            }
            _ => i += 1,
        }
    }
    parts.push(&input[start..]);
    parts
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
