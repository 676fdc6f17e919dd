//! Markup handling for the code panel: a forgiving fragment parser, a serializer,
//! tree helpers, and the line-oriented markup formatter.

pub mod dom_utils;

mod dom_builder;
mod entities;
mod format;
mod serialize;
mod tokenizer;
mod types;

pub use crate::dom_builder::{build_fragment, parse_fragment};
pub use crate::entities::{escape_attr, escape_text};
pub use crate::format::format_markup;
pub use crate::serialize::{inner_html, nodes_html, outer_html};
pub use crate::tokenizer::tokenize;
pub use crate::types::{Attribute, Id, Node, NodeId, Token};
