//! Descriptors built during the document walk.
//!
//! Descriptors are mutable while the compiler runs — binding lists are
//! append-only through the walk and the cross-reference pass — and are
//! frozen behind `Arc` when the registry is sealed. Composed transformers
//! only ever read sealed descriptors.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::arguments::DirectiveArgs;
use crate::registry::TransformerFn;
use crate::type_ref::TypeRef;

/// How a binding produces its value transformation.
#[derive(Clone)]
pub enum BindingKind {
    /// A directive bound to a caller-supplied transformer function with
    /// its statically extracted arguments.
    Directive {
        function: TransformerFn,
        args: Arc<DirectiveArgs>,
    },
    /// Synthetic delegation to another declared input object's field
    /// pipeline, resolved by name against the sealed registry at call
    /// time so forward and cyclic type references work.
    Nested { type_name: String },
}

impl fmt::Debug for BindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingKind::Directive { args, .. } => f
                .debug_struct("Directive")
                .field("args", args)
                .finish_non_exhaustive(),
            BindingKind::Nested { type_name } => f
                .debug_struct("Nested")
                .field("type_name", type_name)
                .finish(),
        }
    }
}

/// One entry in a field's or object's ordered transformer chain.
#[derive(Debug, Clone)]
pub struct TransformerBinding {
    /// Directive name, or `"nested"` for synthetic delegation bindings.
    pub name: String,
    pub kind: BindingKind,
}

impl TransformerBinding {
    pub(crate) fn directive(name: String, function: TransformerFn, args: DirectiveArgs) -> Self {
        Self {
            name,
            kind: BindingKind::Directive {
                function,
                args: Arc::new(args),
            },
        }
    }

    pub(crate) fn nested(type_name: String) -> Self {
        Self {
            name: "nested".to_string(),
            kind: BindingKind::Nested { type_name },
        }
    }

    pub fn is_nested(&self) -> bool {
        matches!(self.kind, BindingKind::Nested { .. })
    }

    /// Static arguments, for directive bindings.
    pub fn args(&self) -> Option<&DirectiveArgs> {
        match &self.kind {
            BindingKind::Directive { args, .. } => Some(args),
            BindingKind::Nested { .. } => None,
        }
    }
}

/// A declared input object field with its ordered transformer chain.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    pub name: String,
    pub type_ref: TypeRef,
    /// Declared directive bindings in source order; a synthetic nested
    /// binding, if any, is appended after all of them.
    pub transformers: Vec<TransformerBinding>,
}

/// A declared input object: its fields and object-level validator chain.
#[derive(Debug, Clone)]
pub struct InputObjectDescriptor {
    pub name: String,
    pub fields: HashMap<String, FieldDescriptor>,
    pub object_validators: Vec<TransformerBinding>,
}

impl InputObjectDescriptor {
    pub(crate) fn new(name: String) -> Self {
        Self {
            name,
            fields: HashMap::new(),
            object_validators: Vec::new(),
        }
    }
}
