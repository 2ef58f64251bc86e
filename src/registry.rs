//! Caller-supplied transformer registry and invocation contract.
//!
//! A [`TransformerRegistry`] maps directive names to async transformer
//! functions. The compiler never invokes a function; it only binds them
//! into per-field and per-object pipelines. Invocation happens at request
//! time, when each bound function receives the current value, the
//! directive's static arguments, and a [`TransformContext`].
//!
//! Handlers are stored behind `Arc` so registries clone cheaply; one
//! registry may serve both field-level and object-level directives, or
//! two distinct registries may be supplied via
//! [`CompileConfig::split`](crate::config::CompileConfig::split).

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use serde_json::{Map, Value};

use crate::arguments::{ArgKind, DirectiveArgs};
use crate::error::TransformError;
use crate::type_ref::TypeRef;

/// Request-scoped data supplied by the caller at invocation time and made
/// visible to every transformer in the chain.
pub type RequestContext = Map<String, Value>;

/// Boxed future returned by a transformer function.
pub type TransformerFuture = BoxFuture<'static, Result<Value, TransformError>>;

/// A bound async transformer: current value in, transformed value out.
pub type TransformerFn =
    Arc<dyn Fn(Value, Arc<DirectiveArgs>, TransformContext) -> TransformerFuture + Send + Sync>;

/// The declaration a transformer invocation is attached to.
#[derive(Debug, Clone)]
pub enum Owner {
    Field {
        object: String,
        field: String,
        type_ref: TypeRef,
    },
    Object {
        object: String,
    },
}

/// Merged context passed to every transformer invocation: the owning
/// declaration's type descriptor, the per-request data, and the
/// compile-time config mapping.
#[derive(Debug, Clone)]
pub struct TransformContext {
    pub owner: Owner,
    pub request: Arc<RequestContext>,
    pub config: Arc<Map<String, Value>>,
}

/// A registered directive handler: the transformer function plus any
/// declared argument expectations.
#[derive(Clone)]
pub struct DirectiveHandler {
    pub(crate) function: TransformerFn,
    pub(crate) arg_kinds: HashMap<String, ArgKind>,
}

/// Name → handler table supplied by the caller.
#[derive(Clone, Default)]
pub struct TransformerRegistry {
    handlers: HashMap<String, DirectiveHandler>,
}

impl TransformerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a transformer for `name`, with no argument expectations.
    pub fn register<F, Fut>(self, name: impl Into<String>, function: F) -> Self
    where
        F: Fn(Value, Arc<DirectiveArgs>, TransformContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, TransformError>> + Send + 'static,
    {
        self.register_with_args(name, std::iter::empty::<(String, ArgKind)>(), function)
    }

    /// Register a transformer for `name`, declaring the literal kind each
    /// named argument must carry. A directive whose literal does not meet
    /// a declared kind fails the whole compile.
    pub fn register_with_args<F, Fut, K, I>(
        mut self,
        name: impl Into<String>,
        arg_kinds: I,
        function: F,
    ) -> Self
    where
        F: Fn(Value, Arc<DirectiveArgs>, TransformContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<Value, TransformError>> + Send + 'static,
        K: Into<String>,
        I: IntoIterator<Item = (K, ArgKind)>,
    {
        let function: TransformerFn =
            Arc::new(move |value, args, ctx| function(value, args, ctx).boxed());
        self.handlers.insert(
            name.into(),
            DirectiveHandler {
                function,
                arg_kinds: arg_kinds
                    .into_iter()
                    .map(|(name, kind)| (name.into(), kind))
                    .collect(),
            },
        );
        self
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    pub(crate) fn get(&self, name: &str) -> Option<&DirectiveHandler> {
        self.handlers.get(name)
    }
}

impl fmt::Debug for TransformerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("TransformerRegistry")
            .field("directives", &names)
            .finish()
    }
}
