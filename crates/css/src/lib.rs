//! Stylesheet handling for the code panel: the style formatter, a rule parser
//! producing [`RuleDescriptor`]s, compact rule codegen, and simple selector matching.

pub mod codegen;
pub mod syntax;

mod format;
mod scan;

pub use codegen::{rule_css, stylesheet_css};
pub use format::{StyleFormatError, format_style, try_format_style};
pub use syntax::{
    AtRule, Declaration, RuleDescriptor, Selector, compound_matches, parse_compound,
    parse_declarations, parse_rules, subject_compound,
};
