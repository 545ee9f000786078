//! Stylesheet syntax: selector extraction for indentation-nested dialects.
//!
//! The "grammar" here is deliberately line-oriented. Each line is
//! classified by a fixed list of [`LineRule`]s, and selector lines are
//! folded into fully-qualified selectors using their indentation.

mod embedded;
mod parser;
mod rules;

pub use embedded::{StyleFragment, extract_style_blocks};
pub use parser::{Symbol, parse_selectors};
pub use rules::{LineKind, LineRule, classify_line, selector_token};
