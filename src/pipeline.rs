//! Sealing and request-time execution of composed transformer pipelines.
//!
//! `seal` is the phase transition after which no descriptor mutates: the
//! build registry becomes an `Arc`-shared arena of frozen descriptors,
//! and every [`CompiledInput`] resolves nested delegation by name against
//! that arena at call time.
//!
//! Execution is a strictly sequential awaited fold: each binding's
//! function settles before the next runs, within a field's chain, across
//! the fields of one object, and across the object-level chain. There is
//! no fan-out, no caching, and no retry; the first error aborts the
//! invocation.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt};
use serde_json::{Map, Value};

use crate::config::CompileOptions;
use crate::descriptor::{BindingKind, FieldDescriptor, InputObjectDescriptor, TransformerBinding};
use crate::error::{json_kind, TransformError};
use crate::registry::{Owner, RequestContext, TransformContext};

/// Frozen arena of descriptors shared by every compiled input of one
/// compile call.
pub(crate) struct SealedRegistry {
    types: HashMap<String, Arc<InputObjectDescriptor>>,
    config: Arc<Map<String, Value>>,
}

/// One declared input object with its composed transformer — the unit
/// returned to the caller for request-time validation/coercion.
#[derive(Clone)]
pub struct CompiledInput {
    descriptor: Arc<InputObjectDescriptor>,
    registry: Arc<SealedRegistry>,
}

impl CompiledInput {
    pub fn name(&self) -> &str {
        &self.descriptor.name
    }

    pub fn fields(&self) -> &HashMap<String, FieldDescriptor> {
        &self.descriptor.fields
    }

    pub fn object_validators(&self) -> &[TransformerBinding] {
        &self.descriptor.object_validators
    }

    /// Run the composed transformer: every field's pipeline over the
    /// input value, then the object-level pipeline over that result.
    pub async fn transform(
        &self,
        value: Value,
        request: RequestContext,
    ) -> Result<Value, TransformError> {
        let request = Arc::new(request);
        let value = run_fields(&self.registry, &self.descriptor, value, &request).await?;
        run_object_validators(&self.registry, &self.descriptor, value, &request).await
    }
}

impl fmt::Debug for CompiledInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledInput")
            .field("name", &self.descriptor.name)
            .field("fields", &self.descriptor.fields.len())
            .field("object_validators", &self.descriptor.object_validators.len())
            .finish()
    }
}

/// Freeze the registry and expose one [`CompiledInput`] per declared
/// type. Must run after cross-reference resolution; nothing mutates the
/// arena afterwards.
pub(crate) fn seal(
    types: HashMap<String, InputObjectDescriptor>,
    options: &CompileOptions,
) -> BTreeMap<String, CompiledInput> {
    let registry = Arc::new(SealedRegistry {
        types: types
            .into_iter()
            .map(|(name, descriptor)| (name, Arc::new(descriptor)))
            .collect(),
        config: Arc::new(options.context.clone()),
    });

    registry
        .types
        .iter()
        .map(|(name, descriptor)| {
            (
                name.clone(),
                CompiledInput {
                    descriptor: Arc::clone(descriptor),
                    registry: Arc::clone(&registry),
                },
            )
        })
        .collect()
}

/// Apply every field's transformer chain to the matching entry of
/// `value`, producing a new object with the same keys in the same order.
fn run_fields<'a>(
    registry: &'a SealedRegistry,
    object: &'a InputObjectDescriptor,
    value: Value,
    request: &'a Arc<RequestContext>,
) -> BoxFuture<'a, Result<Value, TransformError>> {
    async move {
        let entries = match value {
            Value::Object(entries) => entries,
            other => {
                return Err(TransformError::ExpectedObject {
                    type_name: object.name.clone(),
                    actual: json_kind(&other),
                })
            }
        };

        let mut result = Map::with_capacity(entries.len());
        for (key, field_value) in entries {
            let Some(field) = object.fields.get(&key) else {
                return Err(TransformError::UnknownField {
                    type_name: object.name.clone(),
                    field: key,
                });
            };
            let transformed =
                run_field_chain(registry, object, field, field_value, request).await?;
            result.insert(key, transformed);
        }
        Ok(Value::Object(result))
    }
    .boxed()
}

/// Left-to-right awaited fold of one field's bindings.
fn run_field_chain<'a>(
    registry: &'a SealedRegistry,
    object: &'a InputObjectDescriptor,
    field: &'a FieldDescriptor,
    mut value: Value,
    request: &'a Arc<RequestContext>,
) -> BoxFuture<'a, Result<Value, TransformError>> {
    async move {
        for binding in &field.transformers {
            value = match &binding.kind {
                BindingKind::Directive { function, args } => {
                    let ctx = TransformContext {
                        owner: Owner::Field {
                            object: object.name.clone(),
                            field: field.name.clone(),
                            type_ref: field.type_ref.clone(),
                        },
                        request: Arc::clone(request),
                        config: Arc::clone(&registry.config),
                    };
                    function(value, Arc::clone(args), ctx).await?
                }
                BindingKind::Nested { type_name } => {
                    run_nested(registry, type_name, value, request).await?
                }
            };
        }
        Ok(value)
    }
    .boxed()
}

/// Delegate a value to another input object's field pipeline.
///
/// `Null` passes through untouched; a list applies the referenced
/// pipeline per element in order; anything else must be an object.
fn run_nested<'a>(
    registry: &'a SealedRegistry,
    type_name: &'a str,
    value: Value,
    request: &'a Arc<RequestContext>,
) -> BoxFuture<'a, Result<Value, TransformError>> {
    async move {
        let Some(target) = registry.types.get(type_name) else {
            return Err(TransformError::UnresolvedNested {
                type_name: type_name.to_string(),
            });
        };
        match value {
            Value::Null => Ok(Value::Null),
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(run_fields(registry, target, item, request).await?);
                }
                Ok(Value::Array(out))
            }
            other => run_fields(registry, target, other, request).await,
        }
    }
    .boxed()
}

/// Left-to-right awaited fold of the object-level chain, with the whole
/// object as the accumulator.
async fn run_object_validators(
    registry: &SealedRegistry,
    object: &InputObjectDescriptor,
    mut value: Value,
    request: &Arc<RequestContext>,
) -> Result<Value, TransformError> {
    for binding in &object.object_validators {
        value = match &binding.kind {
            BindingKind::Directive { function, args } => {
                let ctx = TransformContext {
                    owner: Owner::Object {
                        object: object.name.clone(),
                    },
                    request: Arc::clone(request),
                    config: Arc::clone(&registry.config),
                };
                function(value, Arc::clone(args), ctx).await?
            }
            BindingKind::Nested { type_name } => {
                run_nested(registry, type_name, value, request).await?
            }
        };
    }
    Ok(value)
}
