//! # Template Module
//!
//! URI template parsing, expansion and canonical rendering for the RFC 6570
//! subset the router stack relies on.
//!
//! ## Overview
//!
//! The module is responsible for:
//! - Parsing template strings (or full URIs) into ordered segment sequences
//! - Expanding segments against named values into concrete URIs
//! - Rendering canonical template text back from the segments
//! - Ordering templates by route-matching specificity
//!
//! ## Architecture
//!
//! Work happens in two phases:
//!
//! 1. **Compilation**: at construction, a character-level state machine
//!    resolves every grammar attribute — operator, modifier, prefix,
//!    delimiters, encoding policy — onto immutable [`Segment`] values.
//!
//! 2. **Expansion**: each call walks the segment sequence once, left to
//!    right, formatting values per the precomputed policy. Nothing is
//!    re-parsed and nothing is mutated, so templates are freely shareable.
//!
//! ## Example
//!
//! ```
//! use uritemplate::{UriTemplate, Values};
//!
//! let template = UriTemplate::parse("/pets/{id}").unwrap();
//! let mut values = Values::new();
//! values.insert("id".to_string(), serde_json::json!("dog-42"));
//! assert_eq!(template.expand(&values), "/pets/dog-42");
//! ```

mod core;
mod expand;
mod parser;
mod render;
mod segment;
#[cfg(test)]
mod tests;

pub use self::core::UriTemplate;
pub use self::segment::{Modifier, Operator, RawSegment, Segment, VariableSegment};
