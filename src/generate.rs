//! Reverse URL generation from route templates.
//!
//! URLs are produced by filling the placeholders of the normalized template
//! in place. The literal separators (`/`, `?`, `&`) are already in the
//! template text, so each placeholder is simply replaced by its encoded
//! value:
//!
//! ```text
//! template: /api/Product/{id:number}?{name?:string}
//! values:   id=5, name="a b"
//! result:   /api/Product/5?name=a%20b
//! ```
//!
//! Optional query placeholders without a value are dropped. Keys that are
//! not declared by the template are appended as ad-hoc query parameters
//! (`?key=value` or `&key=value`).

use std::fmt::Display;
use tracing::trace;

use crate::template::{RouteTemplate, TemplateError};

impl RouteTemplate {
    /// Generate a concrete URL by substituting `values` into the template.
    ///
    /// Declared keys replace their placeholder in place. Optional query
    /// placeholders left without a value are dropped together with their
    /// separator; other unfilled placeholders stay in the URL. Undeclared
    /// keys are appended as ad-hoc query parameters in iteration order,
    /// introduced by `?` when the URL has no query content yet and `&`
    /// otherwise.
    ///
    /// # Example
    ///
    /// ```
    /// use route_template::RouteTemplate;
    ///
    /// let template = RouteTemplate::parse("/api/Product/{id:number}?{name?:string}").unwrap();
    /// let url = template.generate_url([("id", "5"), ("name", "a b")]);
    /// assert_eq!(url, "/api/Product/5?name=a%20b");
    ///
    /// let url = template.generate_url([("id", "5"), ("extra", "z")]);
    /// assert_eq!(url, "/api/Product/5?extra=z");
    /// ```
    #[must_use]
    pub fn generate_url<I, K, V>(&self, values: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Display,
    {
        let mut url = self.raw_template().to_string();
        let mut filled = vec![false; self.parameters().len()];
        let mut ad_hoc = Vec::new();

        for (key, value) in values {
            let key = key.as_ref();
            let encoded = urlencoding::encode(&value.to_string()).into_owned();

            match self.find_parameter(key) {
                Some(param) => {
                    let replacement = if param.is_query_parameter() {
                        format!("{}={}", key, encoded)
                    } else {
                        encoded
                    };
                    url = url.replacen(&param.placeholder(), &replacement, 1);
                    if let Some(slot) = param
                        .order()
                        .checked_sub(1)
                        .and_then(|i| filled.get_mut(i))
                    {
                        *slot = true;
                    }
                }
                None => {
                    trace!(key = %key, "Appending ad-hoc query param");
                    ad_hoc.push(format!("{}={}", key, encoded));
                }
            }
        }

        if self.has_query_section() {
            for (param, _) in self
                .parameters()
                .iter()
                .zip(&filled)
                .filter(|(p, filled)| p.is_optional() && !**filled)
            {
                url = url.replacen(&param.placeholder(), "", 1);
            }
            url = tidy_query(&url);
        }

        let mut has_query = find_query_marker(&url).is_some();
        for pair in ad_hoc {
            url.push(if has_query { '&' } else { '?' });
            url.push_str(&pair);
            has_query = true;
        }

        url
    }
}

/// Drop empty `&` pieces from the query section, and the `?` marker itself
/// when nothing is left.
fn tidy_query(url: &str) -> String {
    let Some(marker) = find_query_marker(url) else {
        return url.to_string();
    };
    let (path, query) = (&url[..marker], &url[marker + 1..]);
    let query = query
        .split('&')
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join("&");
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{}?{}", path, query)
    }
}

/// Position of the first `?` outside of an unfilled `{...}` placeholder.
fn find_query_marker(url: &str) -> Option<usize> {
    let mut in_token = false;
    for (i, c) in url.char_indices() {
        match c {
            '{' => in_token = true,
            '}' => in_token = false,
            '?' if !in_token => return Some(i),
            _ => {}
        }
    }
    None
}

/// Join a base URL and a route.
///
/// The base is trimmed and loses one trailing `/`; the route gains a leading
/// `/` when it has none.
#[must_use]
pub fn join_base_url(base_url: &str, route: &str) -> String {
    let base = base_url.trim();
    let base = base.strip_suffix('/').unwrap_or(base);
    let route = route.trim();
    if route.starts_with('/') {
        format!("{}{}", base, route)
    } else {
        format!("{}/{}", base, route)
    }
}

/// Generate a URL from a route string, optional values and an optional base
/// URL.
///
/// Without `values` the route is not compiled: whitespace is stripped and
/// the literal route is returned. With `values` the route is compiled and
/// filled via [`RouteTemplate::generate_url`]. The base URL is joined to the
/// result afterwards, so its `scheme://` never reaches the compiler.
///
/// # Errors
///
/// Returns [`TemplateError::Blank`] for a blank route, or any compilation
/// error when `values` are supplied.
///
/// # Example
///
/// ```
/// use route_template::generate_url;
///
/// let url = generate_url(
///     "api/users/{id}",
///     Some(vec![("id", 7)]),
///     Some("https://example.com/"),
/// )
/// .unwrap();
/// assert_eq!(url, "https://example.com/api/users/7");
/// ```
pub fn generate_url<I, K, V>(
    route: &str,
    values: Option<I>,
    base_url: Option<&str>,
) -> Result<String, TemplateError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Display,
{
    if route.trim().is_empty() {
        return Err(TemplateError::Blank);
    }

    let url = match values {
        Some(values) => RouteTemplate::parse(route)?.generate_url(values),
        None => route.chars().filter(|c| !c.is_whitespace()).collect(),
    };

    Ok(match base_url {
        Some(base) => join_base_url(base, &url),
        None => url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_base_url() {
        assert_eq!(join_base_url("http://x.io/", "/a"), "http://x.io/a");
        assert_eq!(join_base_url(" http://x.io ", "a"), "http://x.io/a");
        assert_eq!(join_base_url("http://x.io", "/a"), "http://x.io/a");
    }

    #[test]
    fn test_query_replacement_uses_caller_key() {
        let t = RouteTemplate::parse("/a?{page:number}").unwrap();
        assert_eq!(t.generate_url([("PAGE", 2)]), "/a?PAGE=2");
    }

    #[test]
    fn test_missing_value_leaves_placeholder() {
        let t = RouteTemplate::parse("/a/{id}").unwrap();
        let empty: [(&str, &str); 0] = [];
        assert_eq!(t.generate_url(empty), "/a/{id}");
    }

    #[test]
    fn test_unfilled_optional_query_dropped() {
        let t = RouteTemplate::parse("/p/{id}?{name?:string}&{all:boolean}").unwrap();
        assert_eq!(t.generate_url([("id", "1"), ("all", "true")]), "/p/1?all=true");
        assert_eq!(t.generate_url([("id", "1")]), "/p/1?{all:boolean}");
    }

    #[test]
    fn test_tidy_query() {
        assert_eq!(tidy_query("/a?&b=1&&"), "/a?b=1");
        assert_eq!(tidy_query("/a?"), "/a");
        assert_eq!(tidy_query("/a"), "/a");
        assert_eq!(tidy_query("/a/{id:x?}?&b=1"), "/a/{id:x?}?b=1");
    }

    #[test]
    fn test_fast_path_strips_whitespace() {
        let url = generate_url::<Vec<(&str, &str)>, _, _>(" /a / b {x} ", None, None).unwrap();
        assert_eq!(url, "/a/b{x}");
    }

    #[test]
    fn test_blank_route() {
        let err = generate_url::<Vec<(&str, &str)>, _, _>("  ", None, None).unwrap_err();
        assert_eq!(err, TemplateError::Blank);
    }
}
