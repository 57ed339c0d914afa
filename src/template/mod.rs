//! # Template Module
//!
//! The template module compiles textual route templates into an immutable
//! [`RouteTemplate`] descriptor.
//!
//! ## Template Format
//!
//! ```text
//! /api/Product/{id:number}?{name?:string}&{all:boolean}
//! └──── path ────────────┘└──────── query ───────────┘
//! ```
//!
//! - Parameters are written as `{key}` or `{key:type}` where `type` is one of
//!   `number`, `boolean` or `string`. Any other type is treated as `any`.
//! - The first `?` outside of braces starts the query section. Parameters
//!   after it are query parameters and may be marked optional with a
//!   trailing `?` on the key (`{name?:string}`).
//! - Path parameters are always required.
//!
//! ## Compilation
//!
//! Compiling a template produces:
//!
//! 1. **Parameters** - ordered descriptors with a case-insensitive index
//! 2. **Match pattern** - the path with parameters rendered as `:key`, e.g.
//!    `/api/Product/:id`, for use by an external request router
//! 3. **Path segments** - the literal segments, e.g. `["/", "api", "Product"]`
//! 4. **Structural key** - the literal segments joined, e.g. `/api/Product`
//!
//! ## Example
//!
//! ```
//! use route_template::{ParamType, RouteTemplate};
//!
//! let template =
//!     RouteTemplate::parse("/api/Product/{id:number}?{name?:string}&{all:boolean}").unwrap();
//!
//! let name = template.find_parameter("NAME").unwrap();
//! assert_eq!(name.value_type(), ParamType::String);
//! assert!(name.is_optional());
//! assert_eq!(template.path_segments(), ["/", "api", "Product"]);
//! ```

mod core;
mod error;
mod param;

pub use self::core::{RouteTemplate, ROOT_SEGMENT};
pub use error::TemplateError;
pub use param::{parse_token, ParamType, ParameterDescriptor, TokenLocation};
