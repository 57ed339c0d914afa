use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;

use crate::config::LinkConfig;
use crate::generate::generate_url;
use crate::table::RouteTable;
use crate::template::RouteTemplate;

/// Command-line interface for route templates
///
/// Provides commands for inspecting templates, generating URLs and checking
/// how raw values coerce against declared parameters.
#[derive(Parser)]
#[command(name = "routetpl")]
#[command(version, about = "Route template compiler and URL generator", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Compile a template and print its parameters, pattern and structural key
    Inspect {
        /// Route template, e.g. "/api/Product/{id:number}?{name?:string}"
        template: String,

        /// Print the compiled template as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Generate a URL from a template
    Url {
        /// Route template or literal route
        template: String,

        /// Value to substitute, as key=value (repeatable, applied in order)
        #[arg(short, long = "param", value_parser = parse_key_value)]
        params: Vec<(String, String)>,

        /// Base URL to prefix the generated route with
        #[arg(long, env = "ROUTETPL_BASE_URL")]
        base_url: Option<String>,
    },
    /// Coerce a raw value against a declared parameter
    Coerce {
        /// Route template declaring the parameter
        template: String,

        /// Parameter key (case-insensitive)
        #[arg(short, long)]
        key: String,

        /// Raw value; omit to check the missing-value behaviour
        #[arg(short, long)]
        value: Option<String>,
    },
    /// List a route table or generate a URL for one of its routes
    Table {
        /// Route table file (defaults to ROUTETPL_ROUTES_FILE)
        #[arg(short, long)]
        routes: Option<PathBuf>,

        /// Route name to generate a URL for
        name: Option<String>,

        /// Value to substitute, as key=value (repeatable, applied in order)
        #[arg(short, long = "param", value_parser = parse_key_value)]
        params: Vec<(String, String)>,
    },
}

/// Parse a `key=value` argument. The value may itself contain `=`.
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Execute a parsed CLI command, writing results to `out`
///
/// # Errors
///
/// Returns an error if:
/// - A template fails to compile
/// - A route table cannot be loaded or the route name is unknown
/// - A required value fails coercion
pub fn run_cli(cli: &Cli, out: &mut impl Write) -> Result<()> {
    match &cli.command {
        Commands::Inspect { template, json } => {
            let template = RouteTemplate::parse(template)?;
            if *json {
                writeln!(out, "{}", serde_json::to_string_pretty(&template)?)?;
            } else {
                write_summary(&template, out)?;
            }
        }
        Commands::Url {
            template,
            params,
            base_url,
        } => {
            let values = (!params.is_empty()).then(|| params.clone());
            let url = generate_url(template, values, base_url.as_deref())?;
            writeln!(out, "{url}")?;
        }
        Commands::Coerce {
            template,
            key,
            value,
        } => {
            let template = RouteTemplate::parse(template)?;
            let param = template
                .find_parameter(key)
                .ok_or_else(|| anyhow!("Template declares no parameter '{}'", key))?;
            match param.coerce(value.as_deref()) {
                Ok(Some(v)) => writeln!(out, "{v}")?,
                Ok(None) => writeln!(out, "absent")?,
                Err(err) => {
                    writeln!(out, "{}", err.status())?;
                    return Err(err.into());
                }
            }
        }
        Commands::Table {
            routes,
            name,
            params,
        } => {
            let config = LinkConfig::from_env();
            let table = match routes {
                Some(path) => {
                    let table = RouteTable::from_file(path)?;
                    match &config.base_url {
                        Some(base) => table.with_base_url(base.clone()),
                        None => table,
                    }
                }
                None => config
                    .load_route_table()?
                    .context("No route table given; pass --routes or set ROUTETPL_ROUTES_FILE")?,
            };

            match name {
                Some(name) => {
                    let url = table.url_for(name, params.iter().map(|(k, v)| (k, v)))?;
                    writeln!(out, "{url}")?;
                }
                None => {
                    if !params.is_empty() {
                        bail!("--param requires a route name");
                    }
                    write_table(&table, out)?;
                }
            }
        }
    }
    Ok(())
}

fn write_summary(template: &RouteTemplate, out: &mut impl Write) -> Result<()> {
    writeln!(out, "template:       {}", template.raw_template())?;
    writeln!(out, "match pattern:  {}", template.match_pattern())?;
    writeln!(out, "structural key: {}", template.structural_key())?;
    writeln!(out, "path segments:  {:?}", template.path_segments())?;
    writeln!(out, "parameters:")?;
    for param in template.parameters() {
        writeln!(
            out,
            "  {}. {} ({}, {}, {})",
            param.order(),
            param.key(),
            param.value_type(),
            if param.is_query_parameter() { "query" } else { "path" },
            if param.is_optional() { "optional" } else { "required" },
        )?;
    }
    Ok(())
}

fn write_table(table: &RouteTable, out: &mut impl Write) -> Result<()> {
    if let Some(base) = table.base_url() {
        writeln!(out, "base url: {base}")?;
    }
    for (key, names) in table.groups() {
        writeln!(out, "{key}")?;
        for name in names {
            if let Some(template) = table.get(name) {
                writeln!(out, "  {name} -> {template}")?;
            }
        }
    }
    Ok(())
}
