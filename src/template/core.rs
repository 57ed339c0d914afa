use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

use super::error::TemplateError;
use super::param::{parse_token, ParameterDescriptor, TokenLocation};

/// Sentinel first entry of every template's path segment list
pub const ROOT_SEGMENT: &str = "/";

/// A compiled route template
///
/// Built once from a template string such as
/// `/api/Product/{id:number}?{name?:string}&{all:boolean}` and immutable
/// afterwards, so a single instance can be shared across any number of URL
/// generation or coercion calls.
#[derive(Debug, Clone, Serialize)]
pub struct RouteTemplate {
    raw_template: String,
    parameters: Vec<ParameterDescriptor>,
    /// Lower-cased key -> index into `parameters`
    #[serde(skip)]
    parameter_index: HashMap<String, usize>,
    match_pattern: String,
    path_segments: Vec<String>,
    structural_key: String,
    has_query_section: bool,
}

impl RouteTemplate {
    /// Compile a route template.
    ///
    /// The template is normalized first: surrounding and internal whitespace
    /// is removed and a single trailing `/` is dropped.
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] if the template is blank, contains `//`,
    /// has unbalanced braces, more than one top-level `?`, a malformed or
    /// duplicate parameter, an optional path parameter, or duplicate literal
    /// path segments.
    ///
    /// # Example
    ///
    /// ```
    /// use route_template::RouteTemplate;
    ///
    /// let template = RouteTemplate::parse("/api/Product/{id:number}?{name?:string}").unwrap();
    /// assert_eq!(template.match_pattern(), "/api/Product/:id");
    /// assert_eq!(template.structural_key(), "/api/Product");
    /// ```
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        match Self::compile(template) {
            Ok(compiled) => {
                debug!(
                    template = %compiled.raw_template,
                    params_count = compiled.parameters.len(),
                    match_pattern = %compiled.match_pattern,
                    structural_key = %compiled.structural_key,
                    "Route template compiled"
                );
                Ok(compiled)
            }
            Err(err) => {
                warn!(template = %template, error = %err, "Route template rejected");
                Err(err)
            }
        }
    }

    fn compile(template: &str) -> Result<Self, TemplateError> {
        let raw_template = normalize(template)?;
        let (tokens, has_query_section) = extract_tokens(&raw_template)?;

        let mut parameters = Vec::with_capacity(tokens.len());
        let mut parameter_index = HashMap::with_capacity(tokens.len());
        for (position, (token, location)) in tokens.iter().enumerate() {
            let mut param = parse_token(token, *location)?;
            let lookup_key = param.key().to_lowercase();
            if parameter_index.contains_key(&lookup_key) {
                return Err(TemplateError::DuplicateParameter {
                    key: param.key().to_string(),
                });
            }
            param.assign_order(position + 1)?;
            parameter_index.insert(lookup_key, parameters.len());
            parameters.push(param);
        }

        let match_pattern = derive_match_pattern(&raw_template, &parameters)?;
        let path_segments = derive_path_segments(&match_pattern)?;
        let structural_key = path_segments.join("/").replace("//", "/");

        Ok(Self {
            raw_template,
            parameters,
            parameter_index,
            match_pattern,
            path_segments,
            structural_key,
            has_query_section,
        })
    }

    /// Normalized template text
    #[must_use]
    pub fn raw_template(&self) -> &str {
        &self.raw_template
    }

    /// Declared parameters in order of appearance
    #[must_use]
    pub fn parameters(&self) -> &[ParameterDescriptor] {
        &self.parameters
    }

    /// Path-only pattern with parameters rendered as `:key`
    #[must_use]
    pub fn match_pattern(&self) -> &str {
        &self.match_pattern
    }

    /// Literal path segments, starting with [`ROOT_SEGMENT`]
    #[must_use]
    pub fn path_segments(&self) -> &[String] {
        &self.path_segments
    }

    /// Identifier shared by templates with the same literal shape
    #[must_use]
    pub fn structural_key(&self) -> &str {
        &self.structural_key
    }

    #[must_use]
    pub fn has_query_section(&self) -> bool {
        self.has_query_section
    }

    /// Look up a declared parameter by key, ignoring case and surrounding
    /// whitespace.
    #[must_use]
    pub fn find_parameter(&self, key: &str) -> Option<&ParameterDescriptor> {
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        self.parameter_index
            .get(&key.to_lowercase())
            .and_then(|&i| self.parameters.get(i))
    }
}

impl FromStr for RouteTemplate {
    type Err = TemplateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RouteTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw_template)
    }
}

fn normalize(template: &str) -> Result<String, TemplateError> {
    if template.trim().is_empty() {
        return Err(TemplateError::Blank);
    }

    let mut normalized: String = template.chars().filter(|c| !c.is_whitespace()).collect();
    if normalized.ends_with('/') {
        normalized.pop();
    }

    if normalized.contains("//") {
        return Err(TemplateError::DoubleSlash {
            template: normalized,
        });
    }

    Ok(normalized)
}

/// Single left-to-right scan collecting brace tokens.
///
/// Returns the tokens with their location and whether a top-level `?` was
/// seen. The `?` itself stays in the template.
fn extract_tokens(template: &str) -> Result<(Vec<(String, TokenLocation)>, bool), TemplateError> {
    let mut tokens = Vec::with_capacity(template.matches('{').count());
    let mut query_found = false;
    let mut open: Option<usize> = None;

    for (i, c) in template.char_indices() {
        match c {
            '?' if open.is_none() => {
                if query_found {
                    return Err(TemplateError::UnresolvableQueryMarker);
                }
                query_found = true;
            }
            '{' => {
                if open.is_some() {
                    return Err(TemplateError::UnbalancedBraces);
                }
                open = Some(i + 1);
            }
            '}' => {
                let start = open.take().ok_or(TemplateError::UnbalancedBraces)?;
                let location = if query_found {
                    TokenLocation::Query
                } else {
                    TokenLocation::Path
                };
                tokens.push((template[start..i].trim().to_string(), location));
            }
            _ => {}
        }
    }

    if open.is_some() {
        return Err(TemplateError::UnbalancedBraces);
    }

    Ok((tokens, query_found))
}

fn derive_match_pattern(
    template: &str,
    parameters: &[ParameterDescriptor],
) -> Result<String, TemplateError> {
    let mut pattern = template.to_string();
    for param in parameters {
        let placeholder = param.placeholder();
        if !pattern.contains(&placeholder) {
            return Err(TemplateError::PlaceholderNotFound { placeholder });
        }
        pattern = pattern.replacen(&placeholder, &format!(":{}", param.key()), 1);
    }

    if pattern.contains('?') {
        let mut parts = pattern.split('?');
        let path = parts.next().unwrap_or_default().to_string();
        if parts.count() > 1 {
            return Err(TemplateError::UnresolvableQueryMarker);
        }
        pattern = path;
    }

    Ok(pattern)
}

fn derive_path_segments(match_pattern: &str) -> Result<Vec<String>, TemplateError> {
    let mut segments = vec![ROOT_SEGMENT.to_string()];
    for segment in match_pattern.split('/') {
        if segment.trim().is_empty() || segment.starts_with(':') {
            continue;
        }
        if segments.iter().any(|s| s == segment) {
            return Err(TemplateError::DuplicateSegment {
                segment: segment.to_string(),
            });
        }
        segments.push(segment.to_string());
    }
    Ok(segments)
}
