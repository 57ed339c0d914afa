//! Named route tables.
//!
//! A route table compiles a set of named templates once so links can be
//! generated by name. Tables are usually loaded from a YAML or JSON file:
//!
//! ```yaml
//! base_url: https://shop.example.com
//! routes:
//!   product: /api/Product/{id:number}?{name?:string}&{all:boolean}
//!   product_reviews: /api/Product/{id:number}/reviews?{page?:number}
//! ```
//!
//! Every template must compile; loading fails on the first invalid route.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::path::Path;
use tracing::{debug, info};

use crate::generate::join_base_url;
use crate::template::RouteTemplate;

#[derive(Debug, Deserialize)]
struct RouteTableFile {
    #[serde(default)]
    base_url: Option<String>,
    routes: BTreeMap<String, String>,
}

/// Compiled templates keyed by route name
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    base_url: Option<String>,
    routes: BTreeMap<String, RouteTemplate>,
}

impl RouteTable {
    /// Compile a set of named templates.
    ///
    /// # Errors
    ///
    /// Returns an error naming the first route whose template fails to
    /// compile.
    pub fn new<I, N, T>(routes: I) -> Result<Self>
    where
        I: IntoIterator<Item = (N, T)>,
        N: Into<String>,
        T: AsRef<str>,
    {
        let mut compiled = BTreeMap::new();
        for (name, template) in routes {
            let name = name.into();
            let parsed = RouteTemplate::parse(template.as_ref())
                .with_context(|| format!("Invalid template for route '{}'", name))?;
            compiled.insert(name, parsed);
        }
        Ok(Self {
            base_url: None,
            routes: compiled,
        })
    }

    /// Load a route table file. YAML is used for `.yaml`/`.yml` files, JSON
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or a template
    /// fails to compile.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read route table {}", path.display()))?;
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        let table = Self::from_content(&content, is_yaml)
            .with_context(|| format!("Failed to load route table {}", path.display()))?;

        info!(
            path = %path.display(),
            routes_count = table.len(),
            base_url = ?table.base_url,
            "Route table loaded"
        );
        Ok(table)
    }

    /// Parse a route table from YAML or JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text cannot be parsed or a template fails to
    /// compile.
    pub fn from_content(content: &str, is_yaml: bool) -> Result<Self> {
        let file: RouteTableFile = if is_yaml {
            serde_yaml::from_str(content)?
        } else {
            serde_json::from_str(content)?
        };

        let table = Self::new(file.routes)?;
        Ok(match file.base_url {
            Some(base) if !base.trim().is_empty() => table.with_base_url(base),
            _ => table,
        })
    }

    /// Prefix generated URLs with `base_url`.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    #[must_use]
    pub fn base_url(&self) -> Option<&str> {
        self.base_url.as_deref()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&RouteTemplate> {
        self.routes.get(name)
    }

    /// Route names in sorted order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Generate a URL for a named route, prefixed with the table's base URL.
    ///
    /// # Errors
    ///
    /// Returns an error if no route with that name exists.
    pub fn url_for<I, K, V>(&self, name: &str, values: I) -> Result<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Display,
    {
        let template = self
            .get(name)
            .ok_or_else(|| anyhow!("Unknown route '{}'", name))?;
        let url = template.generate_url(values);
        debug!(route = %name, url = %url, "Generated URL");

        Ok(match &self.base_url {
            Some(base) => join_base_url(base, &url),
            None => url,
        })
    }

    /// Route names grouped by structural key.
    ///
    /// Routes in the same group share their literal path shape and differ
    /// only in parameters.
    #[must_use]
    pub fn groups(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut groups: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for (name, template) in &self.routes {
            groups
                .entry(template.structural_key())
                .or_default()
                .push(name.as_str());
        }
        groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_route_names_route() {
        let err = RouteTable::new([("broken", "/x/{id")]).unwrap_err();
        assert!(format!("{err:#}").contains("broken"));
    }

    #[test]
    fn test_from_json_content() {
        let table = RouteTable::from_content(
            r#"{"routes": {"user": "/users/{id:number}"}}"#,
            false,
        )
        .unwrap();
        assert_eq!(table.base_url(), None);
        assert_eq!(table.url_for("user", [("id", 3)]).unwrap(), "/users/3");
    }

    #[test]
    fn test_blank_base_url_ignored() {
        let table =
            RouteTable::from_content("base_url: '  '\nroutes:\n  home: /\n", true).unwrap();
        assert_eq!(table.base_url(), None);
    }
}
