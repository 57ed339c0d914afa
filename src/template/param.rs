//! Parameter token parsing.
//!
//! A parameter token is the text between a pair of braces in a route
//! template, e.g. `id:number` in `/api/Product/{id:number}`. Tokens have the
//! shape `key[:type]`, where a key ending in `?` marks an optional query
//! parameter.

use serde::Serialize;
use std::fmt;

use super::error::TemplateError;

/// Declared value type of a route parameter
///
/// Unknown type annotations degrade to [`ParamType::Any`] instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    String,
    Number,
    Boolean,
    Any,
}

impl ParamType {
    /// Resolve a type annotation, case-insensitively.
    #[must_use]
    pub fn from_annotation(annotation: &str) -> Self {
        match annotation.trim().to_lowercase().as_str() {
            "string" => ParamType::String,
            "number" => ParamType::Number,
            "boolean" => ParamType::Boolean,
            _ => ParamType::Any,
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParamType::String => "string",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
            ParamType::Any => "any",
        };
        write!(f, "{}", s)
    }
}

/// Where a token was found relative to the template's `?` marker
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenLocation {
    Path,
    Query,
}

/// A typed parameter declared by a route template
///
/// Descriptors are produced by [`parse_token`] and owned by the
/// [`RouteTemplate`](super::RouteTemplate) that declared them. The `order`
/// is assigned once during compilation and is read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterDescriptor {
    raw_token: String,
    key: String,
    value_type: ParamType,
    is_query_parameter: bool,
    is_optional: bool,
    order: usize,
}

impl ParameterDescriptor {
    /// Token text as written between the braces (trimmed)
    #[must_use]
    pub fn raw_token(&self) -> &str {
        &self.raw_token
    }

    /// Parameter name with its original casing
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn value_type(&self) -> ParamType {
        self.value_type
    }

    #[must_use]
    pub fn is_query_parameter(&self) -> bool {
        self.is_query_parameter
    }

    #[must_use]
    pub fn is_optional(&self) -> bool {
        self.is_optional
    }

    /// 1-based position of the parameter in the template, 0 while unassigned
    #[must_use]
    pub fn order(&self) -> usize {
        self.order
    }

    /// The placeholder exactly as it appears in the normalized template
    #[must_use]
    pub fn placeholder(&self) -> String {
        format!("{{{}}}", self.raw_token)
    }

    pub(crate) fn assign_order(&mut self, order: usize) -> Result<(), TemplateError> {
        if self.order > 0 {
            return Err(TemplateError::OrderAlreadyAssigned {
                key: self.key.clone(),
            });
        }
        self.order = order;
        Ok(())
    }
}

/// Parse a single parameter token (braces already stripped).
///
/// The returned descriptor has no order yet; the compiler assigns it.
///
/// # Errors
///
/// - [`TemplateError::MalformedToken`] for more than one `:`, a blank key or
///   a blank type
/// - [`TemplateError::MalformedToken`] for a `?` anywhere in the key other
///   than a single trailing marker on a query token
/// - [`TemplateError::OptionalPathParameter`] when a path token's key ends
///   with `?`
pub fn parse_token(
    token: &str,
    location: TokenLocation,
) -> Result<ParameterDescriptor, TemplateError> {
    let raw_token = token.trim();
    let malformed = || TemplateError::MalformedToken {
        token: raw_token.to_string(),
    };

    if raw_token.is_empty() {
        return Err(malformed());
    }

    let (mut key, value_type) = match raw_token.split_once(':') {
        Some((key, annotation)) => {
            if annotation.contains(':') || key.trim().is_empty() || annotation.trim().is_empty() {
                return Err(malformed());
            }
            (key.trim(), ParamType::from_annotation(annotation))
        }
        None => (raw_token, ParamType::Any),
    };

    let is_query_parameter = location == TokenLocation::Query;
    let mut is_optional = false;

    if let Some(stripped) = key.strip_suffix('?') {
        if !is_query_parameter {
            return Err(TemplateError::OptionalPathParameter {
                key: stripped.to_string(),
            });
        }
        if stripped.is_empty() {
            return Err(malformed());
        }
        key = stripped;
        is_optional = true;
    }

    if key.contains('?') {
        return Err(malformed());
    }

    Ok(ParameterDescriptor {
        raw_token: raw_token.to_string(),
        key: key.to_string(),
        value_type,
        is_query_parameter,
        is_optional,
        order: 0,
    })
}
