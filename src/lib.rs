//! Compile GraphQL input-object directive annotations into composed
//! asynchronous value-transformer pipelines.
//!
//! A single pass walks the parsed SDL document, binds each `@directive`
//! on an `input` field or object to a caller-supplied async transformer
//! function, resolves cross-references between input types (forward
//! declarations and cycles included), and exposes one composed
//! transformer per declared input type. Invocation is a strictly
//! sequential awaited fold: field chains in binding order, then the
//! object-level chain — this crate compiles pipelines, it never runs
//! validation on its own.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use graphql_input_transform::{compile_sdl, CompileConfig, TransformerRegistry};
//! use serde_json::{json, Value};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = TransformerRegistry::new().register("trim", |value, _args, _ctx| async move {
//!     Ok(match value {
//!         Value::String(s) => Value::String(s.trim().to_string()),
//!         other => other,
//!     })
//! });
//!
//! let compiled = compile_sdl(
//!     "input Profile { name: String @trim }",
//!     &CompileConfig::shared(registry),
//! )?;
//!
//! let transformed = compiled.inputs["Profile"]
//!     .transform(json!({ "name": "  ada  " }), Default::default())
//!     .await?;
//! assert_eq!(transformed, json!({ "name": "ada" }));
//! # Ok(())
//! # }
//! ```

pub mod arguments;
mod binder;
pub mod compiler;
pub mod config;
pub mod descriptor;
pub mod error;
mod link;
pub mod pipeline;
pub mod registry;
pub mod type_ref;
pub mod warning;

pub use arguments::{ArgKind, ArgValue, DirectiveArgs};
pub use compiler::{compile, compile_sdl, CompiledSchema};
pub use config::{CompileConfig, CompileOptions};
pub use descriptor::{BindingKind, FieldDescriptor, InputObjectDescriptor, TransformerBinding};
pub use error::{CompileError, TransformError};
pub use pipeline::CompiledInput;
pub use registry::{
    Owner, RequestContext, TransformContext, TransformerFn, TransformerFuture,
    TransformerRegistry,
};
pub use type_ref::{resolve_type, TypeRef, BUILTIN_SCALARS};
pub use warning::{CompileWarning, WarningKind};
