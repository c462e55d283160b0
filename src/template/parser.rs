//! Finite-state scanner that turns template text into segments.
//!
//! The parser walks the input one character at a time through six states,
//! left to right, with no backtracking and no recursion. All grammar
//! attributes (prefix, delimiter, encoding policy, prefix repetition) are
//! resolved here, at variable close, so expansion never re-parses.

use crate::error::UriTemplateError;

use super::segment::{Modifier, Operator, RawSegment, Segment, VariableSegment};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Raw text
    Text,
    /// The start of a URI variable, i.e. `{`
    VarStart,
    /// Within a URI variable, i.e. `{var}`
    VarContent,
    /// Within the next variable of a declaration, i.e. `{var, var2}`
    VarNext,
    /// Within a variable modifier, i.e. `{var:1}`
    VarModifier,
    /// Within the modifier of a next variable, i.e. `{var, var2:1}`
    VarNextModifier,
}

/// Modifier pending for the variable currently being scanned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pending {
    None,
    Explode,
    Prefix,
}

/// A single-use parser over one template component.
///
/// Each component of a decomposed URI (scheme, host, path, ...) gets its
/// own parser instance; the produced segments are appended to a shared
/// sequence in source order.
pub(crate) struct UriTemplateParser {
    text: String,
    state: State,
    operator: Operator,
    modifier: Pending,
    var_delimiter: Option<String>,
    is_query_segment: bool,
}

impl UriTemplateParser {
    pub(crate) fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            state: State::Text,
            operator: Operator::None,
            modifier: Pending::None,
            var_delimiter: None,
            is_query_segment: false,
        }
    }

    /// Scan the component and append its segments.
    ///
    /// Input ending while still inside a variable stops the scan without an
    /// error; only the misplaced `*` modifier is a hard grammar violation.
    pub(crate) fn parse(&mut self, segments: &mut Vec<Segment>) -> Result<(), UriTemplateError> {
        let chars: Vec<char> = self.text.chars().collect();
        let mut buff = String::new();
        let mut mod_buff = String::new();
        let mut var_count: usize = 0;

        for c in chars {
            match self.state {
                State::Text => {
                    if c == '{' {
                        if !buff.is_empty() {
                            segments.push(Segment::Raw(RawSegment {
                                text: buff.clone(),
                                is_query_segment: self.is_query_segment,
                            }));
                        }
                        buff.clear();
                        self.state = State::VarStart;
                    } else {
                        if c == '?' || c == '#' {
                            self.is_query_segment = true;
                        }
                        buff.push(c);
                    }
                }
                State::VarModifier | State::VarNextModifier => {
                    if c == ' ' {
                        continue;
                    }
                    self.on_var_char(c, &mut buff, &mut mod_buff, &mut var_count, segments)?;
                }
                State::VarContent | State::VarNext => {
                    self.on_var_char(c, &mut buff, &mut mod_buff, &mut var_count, segments)?;
                }
                State::VarStart => match c {
                    ' ' => {}
                    ';' | '?' | '&' | '#' => {
                        self.is_query_segment = true;
                        self.operator = Operator::from_char(c).unwrap_or(Operator::None);
                        self.state = State::VarContent;
                    }
                    '+' | '.' | '/' => {
                        self.operator = Operator::from_char(c).unwrap_or(Operator::None);
                        self.state = State::VarContent;
                    }
                    _ => {
                        self.state = State::VarContent;
                        buff.push(c);
                    }
                },
            }
        }

        if self.state == State::Text && !buff.is_empty() {
            segments.push(Segment::Raw(RawSegment {
                text: buff,
                is_query_segment: self.is_query_segment,
            }));
        }
        Ok(())
    }

    /// Shared character handling for the variable-body states.
    fn on_var_char(
        &mut self,
        c: char,
        buff: &mut String,
        mod_buff: &mut String,
        var_count: &mut usize,
        segments: &mut Vec<Segment>,
    ) -> Result<(), UriTemplateError> {
        match c {
            ':' | '*' => {
                if matches!(self.state, State::VarModifier | State::VarNextModifier) {
                    mod_buff.push(c);
                } else {
                    self.modifier = if c == '*' {
                        Pending::Explode
                    } else {
                        Pending::Prefix
                    };
                    self.state = if self.state == State::VarNext {
                        State::VarNextModifier
                    } else {
                        State::VarModifier
                    };
                }
            }
            ',' | '}' => {
                if c == ',' {
                    self.state = State::VarNext;
                }
                self.close_variable(c, buff, mod_buff, var_count, segments);
            }
            _ => match self.modifier {
                Pending::Explode => return Err(UriTemplateError::InvalidModifier),
                Pending::Prefix => mod_buff.push(c),
                Pending::None => buff.push(c),
            },
        }
        Ok(())
    }

    /// Close the variable currently in the name buffer, deriving its
    /// prefix/delimiter/encoding policy from the active operator.
    ///
    /// An empty name buffer (e.g. `{+}` or the tail of `{a,}`) emits
    /// nothing.
    fn close_variable(
        &mut self,
        c: char,
        buff: &mut String,
        mod_buff: &mut String,
        var_count: &mut usize,
        segments: &mut Vec<Segment>,
    ) {
        if !buff.is_empty() {
            let name = buff.clone();
            let exploded = self.modifier == Pending::Explode;
            let (prefix, delimiter, encode, repeat_prefix) = match self.operator {
                Operator::Plus => (None, ",".to_string(), false, *var_count < 1),
                Operator::Hash => (Some("#".to_string()), ",".to_string(), false, *var_count < 1),
                Operator::Dot | Operator::Slash => {
                    let prefix = match self.operator {
                        Operator::Dot => ".".to_string(),
                        _ => "/".to_string(),
                    };
                    let delimiter = if exploded {
                        prefix.clone()
                    } else {
                        ",".to_string()
                    };
                    (Some(prefix), delimiter, true, *var_count < 1)
                }
                Operator::Semicolon => {
                    let prefix = format!(";{name}=");
                    let delimiter = if exploded {
                        prefix.clone()
                    } else {
                        ",".to_string()
                    };
                    (Some(prefix), delimiter, true, true)
                }
                Operator::Question | Operator::Ampersand => {
                    let op = match self.operator {
                        Operator::Ampersand => '&',
                        _ => '?',
                    };
                    // Only the first variable of the group carries the real
                    // operator; siblings join with `&` at expansion time.
                    let prefix = if *var_count < 1 {
                        format!("{op}{name}=")
                    } else {
                        format!("{name}=")
                    };
                    let delimiter = if exploded {
                        format!("&{name}=")
                    } else {
                        ",".to_string()
                    };
                    (Some(prefix), delimiter, true, true)
                }
                Operator::None => (None, ",".to_string(), true, *var_count < 1),
            };
            let modifier = match self.modifier {
                Pending::None => Modifier::None,
                Pending::Explode => Modifier::Explode,
                Pending::Prefix => Modifier::Prefix(mod_buff.clone()),
            };
            let previous_delimiter =
                if matches!(self.state, State::VarNext | State::VarNextModifier) {
                    self.var_delimiter.clone()
                } else {
                    None
                };
            segments.push(Segment::Variable(VariableSegment {
                name,
                operator: self.operator,
                modifier,
                prefix,
                delimiter,
                previous_delimiter,
                repeat_prefix,
                encode,
                is_query_segment: self.is_query_segment,
            }));
        }

        let has_another_var = self.state == State::VarNext && c != '}';
        if has_another_var {
            self.var_delimiter = match self.operator {
                Operator::Semicolon => None,
                Operator::Question | Operator::Ampersand => Some("&".to_string()),
                Operator::Dot => Some(".".to_string()),
                Operator::Slash => Some("/".to_string()),
                _ => Some(",".to_string()),
            };
            *var_count += 1;
        } else {
            *var_count = 0;
        }
        self.state = if has_another_var {
            State::VarNext
        } else {
            State::Text
        };
        mod_buff.clear();
        buff.clear();
        self.modifier = Pending::None;
        if !has_another_var {
            self.operator = Operator::None;
        }
    }
}
