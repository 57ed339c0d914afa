//! # Link Configuration Module
//!
//! Environment variable based configuration for outbound link generation.
//!
//! ## Environment Variables
//!
//! ### `ROUTETPL_BASE_URL`
//!
//! Base URL prepended to generated links, e.g. `https://shop.example.com`.
//! Must be an absolute URL; invalid values are logged and ignored.
//!
//! ### `ROUTETPL_ROUTES_FILE`
//!
//! Path to a route table file (YAML or JSON) loaded by
//! [`LinkConfig::load_route_table`].
//!
//! ## Usage
//!
//! ```rust,no_run
//! use route_template::config::LinkConfig;
//!
//! let config = LinkConfig::from_env();
//! if let Some(table) = config.load_route_table()? {
//!     let url = table.url_for("product", [("id", 5)])?;
//!     println!("{url}");
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::Result;
use std::env;
use std::path::PathBuf;
use tracing::warn;

use crate::table::RouteTable;

/// Link generation settings loaded from environment variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkConfig {
    /// Validated base URL for generated links
    pub base_url: Option<String>,
    /// Route table file to load
    pub routes_file: Option<PathBuf>,
}

impl LinkConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_values(
            env::var("ROUTETPL_BASE_URL").ok().as_deref(),
            env::var("ROUTETPL_ROUTES_FILE").ok().as_deref(),
        )
    }

    /// Build configuration from raw values as they would appear in the
    /// environment.
    #[must_use]
    pub fn from_values(base_url: Option<&str>, routes_file: Option<&str>) -> Self {
        let base_url = base_url.and_then(validate_base_url);
        let routes_file = routes_file
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);
        Self {
            base_url,
            routes_file,
        }
    }

    /// Load the configured route table, if any.
    ///
    /// The configured base URL takes precedence over one set in the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded.
    pub fn load_route_table(&self) -> Result<Option<RouteTable>> {
        let Some(path) = &self.routes_file else {
            return Ok(None);
        };
        let table = RouteTable::from_file(path)?;
        Ok(Some(match &self.base_url {
            Some(base) => table.with_base_url(base.clone()),
            None => table,
        }))
    }
}

fn validate_base_url(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match url::Url::parse(raw) {
        Ok(_) => Some(raw.to_string()),
        Err(err) => {
            warn!(base_url = %raw, error = %err, "Ignoring invalid base URL");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LinkConfig::from_values(None, None);
        assert_eq!(config, LinkConfig::default());
        assert!(config.load_route_table().unwrap().is_none());
    }

    #[test]
    fn test_valid_base_url() {
        let config = LinkConfig::from_values(Some(" https://example.com/ "), None);
        assert_eq!(config.base_url.as_deref(), Some("https://example.com/"));
    }

    #[test]
    fn test_invalid_base_url_ignored() {
        let config = LinkConfig::from_values(Some("not a url"), None);
        assert_eq!(config.base_url, None);
    }

    #[test]
    fn test_blank_routes_file_ignored() {
        let config = LinkConfig::from_values(None, Some("  "));
        assert_eq!(config.routes_file, None);
    }

    #[test]
    fn test_missing_routes_file_errors() {
        let config = LinkConfig::from_values(None, Some("/definitely/not/here.yaml"));
        assert!(config.load_route_table().is_err());
    }
}
