//! # uritemplate
//!
//! A fast implementation of the [RFC 6570](https://tools.ietf.org/html/rfc6570)
//! URI template specification — the subset that request routers and link
//! generators actually use: the `+ # . / ; ? &` operators plus the `*`
//! explode and `:n` prefix-length modifiers.
//!
//! ## Overview
//!
//! A template string is compiled once into an immutable sequence of
//! segments — literal runs of text and fully-resolved variable references —
//! and every later operation walks that sequence without re-parsing:
//!
//! - **expansion** substitutes named values (scalars, sequences, ordered
//!   key/value structures) into a concrete URI, percent-encoding per
//!   operator policy and degrading gracefully when values are missing;
//! - **canonical rendering** reconstructs template source text, optionally
//!   filtered down to just the path or just the query portion;
//! - **specificity ordering** ranks templates by literal-character density
//!   and path-variable count, so a router can sort candidate routes
//!   most-specific-first.
//!
//! Full URIs (`scheme://...`) are decomposed into scheme, user info, host,
//! port, path, query and fragment, each component parsed independently and
//! concatenated in order.
//!
//! ## Architecture
//!
//! The library is organized into three modules:
//!
//! - **[`template`]** - Segment model, parser state machine, expansion and
//!   canonical rendering
//! - **[`values`]** - The named-value mapping and the structured-value
//!   introspection boundary
//! - **[`error`]** - Construction-time error taxonomy
//!
//! ## Quick Start
//!
//! ```
//! use uritemplate::{UriTemplate, Values};
//!
//! let template = UriTemplate::parse("/pets/{id}{?page,size}").unwrap();
//!
//! let mut values = Values::new();
//! values.insert("id".to_string(), serde_json::json!("dog-42"));
//! values.insert("page".to_string(), serde_json::json!(2));
//! assert_eq!(template.expand(&values), "/pets/dog-42?page=2");
//!
//! // Missing values degrade gracefully instead of failing the request.
//! assert_eq!(template.expand(&Values::new()), "/pets/");
//! ```
//!
//! ## Route ranking
//!
//! ```
//! use uritemplate::UriTemplate;
//!
//! let mut routes = vec![
//!     UriTemplate::parse("/pets/{id}").unwrap(),
//!     UriTemplate::parse("/pets/count").unwrap(),
//! ];
//! // Ascending sort puts the template with more literal text first.
//! routes.sort();
//! assert_eq!(routes[0].as_str(), "/pets/count");
//! ```

pub mod error;
pub mod template;
pub mod values;

pub use error::UriTemplateError;
pub use template::{Modifier, Operator, RawSegment, Segment, UriTemplate, VariableSegment};
pub use values::{introspect, Values};
