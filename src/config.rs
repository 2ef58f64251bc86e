//! Configuration for directive compilation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::registry::TransformerRegistry;

/// Options for compiling a document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CompileOptions {
    /// Reject unknown directive names with a fatal error instead of a
    /// warning. Default: off (unknown annotations are left in the
    /// document for downstream consumers).
    pub strict_directives: bool,
    /// Caller-supplied mapping made visible, unchanged, to every
    /// transformer invocation via
    /// [`TransformContext::config`](crate::registry::TransformContext).
    pub context: Map<String, Value>,
}

/// Everything `compile` needs besides the document: the transformer
/// registries for the two owner kinds, and the options.
#[derive(Debug, Clone)]
pub struct CompileConfig {
    /// Registry consulted for directives attached to fields.
    pub field_transformers: TransformerRegistry,
    /// Registry consulted for directives attached to input objects.
    pub object_transformers: TransformerRegistry,
    pub options: CompileOptions,
}

impl CompileConfig {
    /// One registry serving both field-level and object-level directives.
    pub fn shared(registry: TransformerRegistry) -> Self {
        Self {
            field_transformers: registry.clone(),
            object_transformers: registry,
            options: CompileOptions::default(),
        }
    }

    /// Distinct registries per owner kind.
    pub fn split(
        field_transformers: TransformerRegistry,
        object_transformers: TransformerRegistry,
    ) -> Self {
        Self {
            field_transformers,
            object_transformers,
            options: CompileOptions::default(),
        }
    }

    pub fn with_options(mut self, options: CompileOptions) -> Self {
        self.options = options;
        self
    }
}
