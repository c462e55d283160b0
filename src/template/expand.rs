//! Per-segment expansion against a value mapping.
//!
//! Raw segments pass through unchanged. Variable segments look up their
//! value and format it according to the policy the parser resolved onto the
//! segment. A `None` return is the omission sentinel: the segment (and only
//! that segment) contributes nothing at all to the output — distinct from
//! an empty expansion, which may still pull in the operator prefix.

use serde_json::Value;

use crate::values::Values;

use super::segment::{Modifier, Operator, Segment, VariableSegment};

/// Expand one segment.
///
/// `previous_has_content` and `any_previous_has_operator` are the scan
/// flags carried by the template-level expansion loop; the current section
/// (path or query) accumulates them independently.
pub(crate) fn expand_segment(
    segment: &Segment,
    values: &Values,
    previous_has_content: bool,
    any_previous_has_operator: bool,
) -> Option<String> {
    match segment {
        Segment::Raw(raw) => Some(raw.text.clone()),
        Segment::Variable(var) => {
            expand_variable(var, values, previous_has_content, any_previous_has_operator)
        }
    }
}

fn expand_variable(
    var: &VariableSegment,
    values: &Values,
    previous_has_content: bool,
    any_previous_has_operator: bool,
) -> Option<String> {
    // Null is the empty optional: same as absent.
    let found = values.get(&var.name).filter(|value| !value.is_null());
    let Some(found) = found else {
        return match var.operator {
            Operator::Slash => None,
            _ => Some(String::new()),
        };
    };

    let mut prefix_to_use = var.prefix.clone();
    // Grouped query variables after the first carry a bare `name=` prefix;
    // when no earlier sibling produced the `?`, this variable must.
    if var.operator == Operator::Question && !any_previous_has_operator {
        if let Some(prefix) = prefix_to_use.take() {
            prefix_to_use = if prefix.starts_with('?') {
                Some(prefix)
            } else {
                Some(format!("?{prefix}"))
            };
        }
    }

    let is_query = var.operator == Operator::Question;

    let result = match found {
        Value::Array(items) => {
            if items.is_empty() {
                return Some(String::new());
            }
            let parts: Vec<String> = items
                .iter()
                .filter(|item| !item.is_null())
                .map(|item| codec(&scalar_text(item), var.encode, is_query))
                .collect();
            parts.join(&var.delimiter)
        }
        Value::Object(map) => {
            let entries: Vec<(&String, &Value)> =
                map.iter().filter(|(_, value)| !value.is_null()).collect();
            if entries.is_empty() {
                return Some(String::new());
            }
            let exploded = var.modifier == Modifier::Explode;
            let delimiter = if exploded {
                match var.operator {
                    Operator::Question | Operator::Ampersand => {
                        let op = match var.operator {
                            Operator::Ampersand => '&',
                            _ => '?',
                        };
                        let lead = if any_previous_has_operator { '&' } else { op };
                        prefix_to_use = Some(lead.to_string());
                        "&".to_string()
                    }
                    Operator::Semicolon => {
                        prefix_to_use = Some(";".to_string());
                        ";".to_string()
                    }
                    _ => var.delimiter.clone(),
                }
            } else {
                var.delimiter.clone()
            };
            let mut parts: Vec<String> = Vec::new();
            for (key, value) in entries {
                // An entry whose value is a sequence contributes one unit
                // per element.
                let items: Vec<&Value> = match value {
                    Value::Array(inner) => inner.iter().collect(),
                    other => vec![other],
                };
                for item in items {
                    if item.is_null() {
                        continue;
                    }
                    let encoded_key = codec(key, var.encode, is_query);
                    let encoded_value = codec(&scalar_text(item), var.encode, is_query);
                    if exploded {
                        parts.push(format!("{encoded_key}={encoded_value}"));
                    } else {
                        parts.push(encoded_key);
                        parts.push(encoded_value);
                    }
                }
            }
            parts.join(&delimiter)
        }
        scalar => {
            let text = apply_modifier(&var.modifier, scalar_text(scalar));
            codec(&text, var.encode, is_query)
        }
    };

    let mut out = match &var.previous_delimiter {
        Some(delimiter) if previous_has_content => delimiter.clone(),
        _ => String::new(),
    };
    if result.is_empty() {
        match var.operator {
            Operator::Slash => {}
            Operator::Semicolon
                if prefix_to_use
                    .as_deref()
                    .is_some_and(|prefix| prefix.ends_with('=')) =>
            {
                if let Some(prefix) = &prefix_to_use {
                    out.push_str(&prefix[..prefix.len() - 1]);
                }
            }
            _ => {
                if let Some(prefix) = &prefix_to_use {
                    out.push_str(prefix);
                }
            }
        }
    } else if var.repeat_prefix {
        if let Some(prefix) = &prefix_to_use {
            out.push_str(prefix);
        }
        out.push_str(&result);
    } else {
        out.push_str(&result);
    }
    Some(out)
}

/// Scalar display form: strings verbatim, everything else via its JSON
/// text.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn codec(text: &str, encode: bool, query: bool) -> String {
    if encode {
        encode_component(text, query)
    } else {
        escape(text)
    }
}

/// Percent-encode per the fixed UTF-8 scheme. In query position a space
/// becomes `+`; everywhere else it must stay `%20`.
fn encode_component(text: &str, query: bool) -> String {
    let encoded = urlencoding::encode(text);
    if query {
        encoded.replace("%20", "+")
    } else {
        encoded.into_owned()
    }
}

/// Minimal escaping for the non-encoding operators (`+`, `#`): only `%`
/// and whitespace are rewritten.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c == '%' {
            out.push_str("%25");
        } else if c.is_ascii_whitespace() {
            out.push_str("%20");
        } else {
            out.push(c);
        }
    }
    out
}

/// Apply a `:n` prefix modifier to a scalar's text.
///
/// Only a modifier starting with a digit does anything; one that starts
/// with a digit but fails to parse replaces the value with `:` plus the
/// modifier text (observed reference behavior, kept as-is).
fn apply_modifier(modifier: &Modifier, value: String) -> String {
    let Modifier::Prefix(raw) = modifier else {
        return value;
    };
    if !raw.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return value;
    }
    match raw.trim().parse::<usize>() {
        Ok(limit) if limit < value.chars().count() => value.chars().take(limit).collect(),
        Ok(_) => value,
        Err(_) => format!(":{raw}"),
    }
}
