//! Canonical rendering of a segment sequence back to template source text.

use super::segment::{Modifier, Segment, VariableSegment};

/// Reconstruct template text from the segments the filter accepts.
///
/// Consecutive filtered-in variables sharing an operator are merged into
/// one `{...}` group, joined by the group delimiter, as long as the
/// current variable is not exploded; anything else closes the open group
/// and starts a fresh one.
pub(crate) fn render(
    segments: &[Segment],
    filter: impl Fn(&Segment) -> bool,
    capacity: usize,
) -> String {
    let mut out = String::with_capacity(capacity);
    let mut previous: Option<&VariableSegment> = None;
    for segment in segments {
        if !filter(segment) {
            continue;
        }
        match segment {
            Segment::Variable(var) => {
                match previous {
                    Some(prev)
                        if var.operator == prev.operator && var.modifier != Modifier::Explode =>
                    {
                        out.push_str(&var.delimiter);
                    }
                    Some(_) => {
                        out.push('}');
                        out.push('{');
                        if let Some(op) = var.operator.as_char() {
                            out.push(op);
                        }
                    }
                    None => {
                        out.push('{');
                        if let Some(op) = var.operator.as_char() {
                            out.push(op);
                        }
                    }
                }
                out.push_str(&segment.to_string());
                previous = Some(var);
            }
            Segment::Raw(raw) => {
                if previous.is_some() {
                    out.push('}');
                    previous = None;
                }
                out.push_str(&raw.text);
            }
        }
    }
    if previous.is_some() {
        out.push('}');
    }
    out
}
