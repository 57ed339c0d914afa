use std::fmt;

/// Route template compilation error
///
/// Returned by [`RouteTemplate::parse`](super::RouteTemplate::parse) when a
/// template is structurally invalid or one of its parameter tokens is
/// malformed. A template that produces any of these errors is rejected as a
/// whole; no partially compiled template is ever returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// The template (or a parameter token) is empty or whitespace only
    Blank,
    /// The normalized template contains `//`
    DoubleSlash {
        /// The normalized template
        template: String,
    },
    /// An unmatched `{` or `}`, or a `{` nested inside an open token
    UnbalancedBraces,
    /// More than one `?` outside of parameter tokens
    UnresolvableQueryMarker,
    /// A token with more than one `:` or a blank key/type
    MalformedToken {
        /// The offending token text
        token: String,
    },
    /// A path parameter whose key ends with `?`
    OptionalPathParameter {
        /// The parameter key
        key: String,
    },
    /// Two parameters share the same key (compared case-insensitively)
    DuplicateParameter {
        /// The repeated key
        key: String,
    },
    /// A parameter placeholder could not be found verbatim in the template
    PlaceholderNotFound {
        /// The placeholder text, braces included
        placeholder: String,
    },
    /// Two literal path segments are identical
    DuplicateSegment {
        /// The repeated segment
        segment: String,
    },
    /// A parameter order was assigned more than once
    OrderAlreadyAssigned {
        /// The parameter key
        key: String,
    },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::Blank => write!(f, "Invalid route template. Template is blank."),
            TemplateError::DoubleSlash { template } => {
                write!(f, "Invalid route template '{}'. Contains '//'.", template)
            }
            TemplateError::UnbalancedBraces => {
                write!(f, "Invalid route template. Braces do not match.")
            }
            TemplateError::UnresolvableQueryMarker => write!(
                f,
                "Invalid route template. Unresolvable '?' characters detected."
            ),
            TemplateError::MalformedToken { token } => write!(
                f,
                "Invalid route param '{}'. Expected format: key or key:type.",
                token
            ),
            TemplateError::OptionalPathParameter { key } => write!(
                f,
                "Invalid route param '{}'. Path parameters cannot be optional.",
                key
            ),
            TemplateError::DuplicateParameter { key } => write!(
                f,
                "Invalid route template. Duplicate route params (case insensitive) detected: '{}'.",
                key
            ),
            TemplateError::PlaceholderNotFound { placeholder } => write!(
                f,
                "Invalid route template. Placeholder '{}' not found.",
                placeholder
            ),
            TemplateError::DuplicateSegment { segment } => write!(
                f,
                "Invalid route template. Cannot contain duplicate segments: '{}'.",
                segment
            ),
            TemplateError::OrderAlreadyAssigned { key } => {
                write!(f, "Route param '{}' already has an order assigned.", key)
            }
        }
    }
}

impl std::error::Error for TemplateError {}
