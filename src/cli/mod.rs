//! # CLI Module
//!
//! Command-line interface for compiling route templates and generating URLs.
//!
//! ## Commands
//!
//! ### `inspect`
//!
//! Compile a template and show its parameters, match pattern and
//! structural key:
//!
//! ```bash
//! routetpl inspect "/api/Product/{id:number}?{name?:string}&{all:boolean}"
//! routetpl inspect "/api/Product/{id:number}" --json
//! ```
//!
//! ### `url`
//!
//! Generate a URL. Without `--param` the route is returned literally:
//!
//! ```bash
//! routetpl url "/api/Product/{id:number}?{name?:string}" -p id=5 -p "name=a b"
//! # /api/Product/5?name=a%20b
//! ```
//!
//! ### `coerce`
//!
//! Check how a raw value coerces against a declared parameter:
//!
//! ```bash
//! routetpl coerce "/api/Product/{id:number}" --key id --value 7.5
//! # 7.5
//! ```
//!
//! ### `table`
//!
//! List a route table grouped by structural key, or generate a URL for one
//! named route:
//!
//! ```bash
//! routetpl table --routes routes.yaml
//! routetpl table --routes routes.yaml product -p id=5
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use route_template::cli::{run_cli, Cli};
//! use clap::Parser;
//!
//! let cli = Cli::parse();
//! run_cli(&cli, &mut std::io::stdout())?;
//! ```

mod commands;


pub use commands::{parse_key_value, run_cli, Cli, Commands};
