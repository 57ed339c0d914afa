//! # route-template
//!
//! **route-template** compiles textual URL templates with typed, possibly
//! optional parameters into an immutable descriptor, and generates concrete
//! URLs back from them.
//!
//! ## Overview
//!
//! A route template looks like this:
//!
//! ```text
//! /api/Product/{id:number}?{name?:string}&{all:boolean}
//! ```
//!
//! Compiling it yields a parameter registry, a framework-neutral match
//! pattern (`/api/Product/:id`), the literal path segments
//! (`["/", "api", "Product"]`) and a structural key (`/api/Product`). The
//! same compiled template generates outbound links and coerces raw request
//! values to the declared parameter types.
//!
//! ## Architecture
//!
//! - **[`template`]** - Parameter token parsing and template compilation
//! - **[`coerce`]** - Raw string to typed value coercion per parameter
//! - **[`generate`]** - Reverse URL generation by in-place placeholder filling
//! - **[`http_error`]** - The HTTP-status error raised for bad runtime values
//! - **[`table`]** - Named route tables loaded from YAML or JSON
//! - **[`config`]** - Environment based link configuration
//! - **[`logging`]** - `tracing` subscriber setup for binaries
//! - **[`cli`]** - The `routetpl` command-line interface
//!
//! ### Data Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Caller
//!     participant Compiler as RouteTemplate::parse
//!     participant Parser as parse_token
//!     participant Gen as generate_url
//!     participant Coerce as coerce_value
//!
//!     Caller->>Compiler: "/api/Product/{id:number}?{name?:string}"
//!     Compiler->>Compiler: Normalize, scan braces and '?'
//!     loop each {token}
//!         Compiler->>Parser: "id:number" (Path)
//!         Parser-->>Compiler: ParameterDescriptor
//!     end
//!     Compiler->>Compiler: Match pattern, segments, structural key
//!     Compiler-->>Caller: RouteTemplate
//!
//!     Caller->>Gen: [("id", 5), ("name", "a b")]
//!     Gen-->>Caller: "/api/Product/5?name=a%20b"
//!
//!     Caller->>Coerce: descriptor(id), "7.5"
//!     alt parses
//!         Coerce-->>Caller: Some(7.5)
//!     else required and invalid
//!         Coerce-->>Caller: HttpError(404)
//!     end
//! ```
//!
//! ## Quick Start
//!
//! ```
//! use route_template::RouteTemplate;
//!
//! let template =
//!     RouteTemplate::parse("/api/Product/{id:number}?{name?:string}").unwrap();
//!
//! let url = template.generate_url([("id", "5"), ("extra", "z")]);
//! assert_eq!(url, "/api/Product/5?extra=z");
//!
//! let id = template.find_parameter("id").unwrap();
//! assert_eq!(id.coerce(Some("42")).unwrap(), Some(serde_json::json!(42)));
//! assert_eq!(id.coerce(Some("abc")).unwrap_err().status().as_u16(), 404);
//! ```
//!
//! ## Errors
//!
//! Template faults (unbalanced braces, `//`, duplicate keys or segments,
//! optional path parameters, stray `?`) are reported at compile time as
//! [`TemplateError`] and reject the whole template. Bad runtime values are
//! reported as [`HttpError`] by coercion, unless the parameter is optional,
//! in which case they become an absent value.

pub mod cli;
pub mod coerce;
pub mod config;
pub mod generate;
pub mod http_error;
pub mod logging;
pub mod table;
pub mod template;

pub use coerce::coerce_value;
pub use generate::{generate_url, join_base_url};
pub use http_error::{HttpError, UnsupportedStatusCode};
pub use table::RouteTable;
pub use template::{
    parse_token, ParamType, ParameterDescriptor, RouteTemplate, TemplateError, TokenLocation,
};
