use std::fmt;

/// URI template construction error
///
/// Every variant is raised while a template is being parsed: a template
/// either constructs completely or no value exists at all. Expansion itself
/// never fails for missing or ill-typed values — absent variables expand to
/// an empty string (or are omitted entirely for the `/` operator).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UriTemplateError {
    /// The template string looks like a full URI (`scheme://...`) but does
    /// not decompose into scheme, authority, path, query and fragment.
    MalformedUri {
        /// The offending template string
        template: String,
    },
    /// The `*` expansion modifier was followed by something other than a
    /// closing brace or a variable separator.
    InvalidModifier,
    /// A value handed to `expand_value` did not introspect into named
    /// properties (it serialized to something other than an object).
    Introspection {
        /// Description of the failed conversion
        message: String,
    },
}

impl fmt::Display for UriTemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UriTemplateError::MalformedUri { template } => {
                write!(f, "Invalid URI template: {template}")
            }
            UriTemplateError::InvalidModifier => {
                write!(
                    f,
                    "Expansion modifier * must be immediately followed by a closing brace '}}'"
                )
            }
            UriTemplateError::Introspection { message } => {
                write!(f, "Cannot introspect value for expansion: {message}")
            }
        }
    }
}

impl std::error::Error for UriTemplateError {}
