use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use tracing::{debug, trace};

use crate::error::UriTemplateError;
use crate::values::{introspect, Values};

use super::expand::expand_segment;
use super::parser::UriTemplateParser;
use super::render::render;
use super::segment::Segment;

// URI shape patterns per RFC 3986, appendix B. The port component may
// itself be a `{...}` variable.
static PATTERN_SCHEME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([^:/?#]+)://").expect("Failed to compile scheme pattern")
});
static PATTERN_FULL_URI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(([^:/?#]+):)?(//(([^@\[/?#]*)@)?(\[[0-9A-Fa-f:.]*[%0-9A-Za-z]*\]|[^\[{/?#:]*)(:(\d*(?:\{[^/]+?\})?))?)?([^#]*)(\?([^#]*))?(#(.*))?",
    )
    .expect("Failed to compile full URI pattern")
});

/// A parsed URI template per the RFC 6570 subset used for routing.
///
/// Construction parses the template string into an immutable segment
/// sequence; every later operation — [`expand`](Self::expand), canonical
/// rendering via [`Display`](fmt::Display), specificity comparison — walks
/// that sequence read-only, so a template can be shared freely across
/// threads.
///
/// A full URI (`scheme://...`) is decomposed into its components first and
/// each component is parsed independently; the segment sequences are
/// concatenated in source order.
///
/// Note: this type has an ordering that is deliberately inconsistent with
/// its equality — see [`compare_specificity`](Self::compare_specificity).
///
/// # Example
///
/// ```
/// use uritemplate::{UriTemplate, Values};
///
/// let template = UriTemplate::parse("/books/{id}{?format}").unwrap();
/// let mut values = Values::new();
/// values.insert("id".to_string(), serde_json::json!("42"));
/// values.insert("format".to_string(), serde_json::json!("json"));
/// assert_eq!(template.expand(&values), "/books/42?format=json");
/// ```
#[derive(Debug, Clone)]
pub struct UriTemplate {
    template: String,
    segments: Vec<Segment>,
}

impl UriTemplate {
    /// Parse a template string.
    ///
    /// A single trailing `/` is stripped before storage (unless the whole
    /// template is `/`). Parsing failures abort construction — no
    /// partially built template is ever observable.
    ///
    /// # Errors
    ///
    /// [`UriTemplateError::InvalidModifier`] when a `*` modifier is not
    /// immediately followed by `,` or `}`;
    /// [`UriTemplateError::MalformedUri`] when a scheme-prefixed string
    /// fails URI decomposition.
    pub fn parse(template: &str) -> Result<Self, UriTemplateError> {
        let mut template_string = template.to_string();
        if template_string.ends_with('/') && template_string.len() > 1 {
            template_string.pop();
        }

        let mut segments = Vec::new();
        if PATTERN_SCHEME.is_match(&template_string) {
            let captures = PATTERN_FULL_URI.captures(&template_string).ok_or_else(|| {
                UriTemplateError::MalformedUri {
                    template: template_string.clone(),
                }
            })?;
            if let Some(scheme) = captures.get(2) {
                let component = format!("{}://", scheme.as_str());
                UriTemplateParser::new(&component).parse(&mut segments)?;
            }
            if let Some(user_info) = captures.get(5) {
                UriTemplateParser::new(user_info.as_str()).parse(&mut segments)?;
            }
            if let Some(host) = captures.get(6) {
                UriTemplateParser::new(host.as_str()).parse(&mut segments)?;
            }
            if let Some(port) = captures.get(8) {
                let component = format!(":{}", port.as_str());
                UriTemplateParser::new(&component).parse(&mut segments)?;
            }
            if let Some(path) = captures.get(9) {
                // The path pattern swallows any `?query` suffix; its `?`
                // flips the parser's query-segment flag on the way through.
                if let Some(fragment) = captures.get(13) {
                    let component = format!("{}#{}", path.as_str(), fragment.as_str());
                    UriTemplateParser::new(&component).parse(&mut segments)?;
                } else {
                    UriTemplateParser::new(path.as_str()).parse(&mut segments)?;
                }
            }
            if let Some(query) = captures.get(11) {
                UriTemplateParser::new(query.as_str()).parse(&mut segments)?;
            }
        } else {
            UriTemplateParser::new(&template_string).parse(&mut segments)?;
        }

        debug!(
            template = %template_string,
            segment_count = segments.len(),
            "URI template parsed"
        );

        Ok(Self {
            template: template_string,
            segments,
        })
    }

    /// Assemble a template from an already-parsed segment sequence.
    ///
    /// Extension point for callers that produce segments through their own
    /// parser (e.g. a matching-oriented subtype); the stored string gets
    /// the same trailing-slash normalization as [`parse`](Self::parse).
    pub fn from_parts(template: impl Into<String>, segments: Vec<Segment>) -> Self {
        let mut template = template.into();
        if template.ends_with('/') && template.len() > 1 {
            template.pop();
        }
        Self { template, segments }
    }

    /// The stored template string (trailing slash stripped).
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// The parsed segment sequence, in source order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Expand the template with the given named values.
    ///
    /// Missing values never fail: a variable without a value expands to
    /// nothing (the whole segment is omitted for the `/` operator), so a
    /// link with partially-known parameters degrades gracefully.
    ///
    /// The path and query sections accumulate their content flags
    /// independently; crossing into the first query variable resets them.
    pub fn expand(&self, values: &Values) -> String {
        let mut builder = String::with_capacity(self.template.len());
        let mut any_previous_has_content = false;
        let mut any_previous_has_operator = false;
        let mut query_parameter = false;
        for segment in &self.segments {
            let Some(result) = expand_segment(
                segment,
                values,
                any_previous_has_content,
                any_previous_has_operator,
            ) else {
                continue;
            };
            if let Segment::Variable(var) = segment {
                if var.is_query_segment() && !query_parameter {
                    query_parameter = true;
                    any_previous_has_content = false;
                    any_previous_has_operator = false;
                }
                if let Some(op) = var.operator().as_char() {
                    if result.contains(op) {
                        any_previous_has_operator = true;
                    }
                }
                any_previous_has_content = any_previous_has_content || !result.is_empty();
            }
            builder.push_str(&result);
        }
        trace!(template = %self.template, expanded = %builder, "URI template expanded");
        builder
    }

    /// Expand the template with the properties of an arbitrary structured
    /// value.
    ///
    /// The value goes through the introspection boundary first
    /// ([`introspect`]) and the resulting ordered name/value pairs are
    /// handed to [`expand`](Self::expand).
    ///
    /// # Errors
    ///
    /// [`UriTemplateError::Introspection`] when the value does not
    /// serialize to named properties.
    pub fn expand_value<T: Serialize>(&self, value: &T) -> Result<String, UriTemplateError> {
        let values = introspect(value)?;
        Ok(self.expand(&values))
    }

    /// Canonical render restricted to the segments the filter accepts —
    /// e.g. just the path or just the query portion of the template.
    pub fn to_string_filtered(&self, filter: impl Fn(&Segment) -> bool) -> String {
        render(&self.segments, filter, self.template.len())
    }

    /// Order two templates by route-matching specificity.
    ///
    /// The template with more literal text sorts first; ties break toward
    /// fewer path variables (query variables do not count). Sorting
    /// candidates ascending by this ordering therefore yields
    /// most-specific-first.
    ///
    /// This ordering is intentionally inconsistent with equality, which
    /// compares stored template strings only: two differently-written
    /// templates can compare `Equal` here while being unequal. Routing
    /// depends on exactly this contract; do not "fix" it.
    pub fn compare_specificity(&self, other: &Self) -> Ordering {
        let (this_raw_length, this_variable_count) = specificity(&self.segments);
        let (that_raw_length, that_variable_count) = specificity(&other.segments);

        // More raw length has higher precedence, hence the flipped compare.
        match that_raw_length.cmp(&this_raw_length) {
            Ordering::Equal => this_variable_count.cmp(&that_variable_count),
            ordering => ordering,
        }
    }
}

fn specificity(segments: &[Segment]) -> (usize, usize) {
    let mut raw_length = 0;
    let mut path_variable_count = 0;
    for segment in segments {
        match segment {
            Segment::Variable(var) => {
                if !var.is_query_segment() {
                    path_variable_count += 1;
                }
            }
            Segment::Raw(_) => raw_length += segment.len(),
        }
    }
    (raw_length, path_variable_count)
}

impl fmt::Display for UriTemplate {
    /// Canonical template source form, reconstructed from the segments.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&render(&self.segments, |_| true, self.template.len()))
    }
}

impl FromStr for UriTemplate {
    type Err = UriTemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialEq for UriTemplate {
    /// Equality is defined solely on the stored template string.
    fn eq(&self, other: &Self) -> bool {
        self.template == other.template
    }
}

impl Eq for UriTemplate {}

impl Hash for UriTemplate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.template.hash(state);
    }
}

impl PartialOrd for UriTemplate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UriTemplate {
    /// Specificity ordering; inconsistent with [`Eq`] by design — see
    /// [`compare_specificity`](Self::compare_specificity).
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_specificity(other)
    }
}
