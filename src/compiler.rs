//! The compile pass: document walk, registry build, link, seal.
//!
//! A single depth-first walk over the parsed document extracts every
//! `input` declaration into an [`InputObjectDescriptor`], routing field
//! and object annotations through the binder and pruning consumed
//! directive nodes from the document in place. Cross-reference resolution
//! then appends nested bindings over the completed registry, and sealing
//! produces the composed transformers. Data flows one direction:
//! walk → registry → link → seal.

use std::collections::{BTreeMap, HashMap};

use async_graphql_parser::types::{ServiceDocument, TypeKind, TypeSystemDefinition};

use crate::binder::{bind_directive, BindOutcome};
use crate::config::CompileConfig;
use crate::descriptor::{FieldDescriptor, InputObjectDescriptor};
use crate::error::CompileError;
use crate::link::link_nested;
use crate::pipeline::{seal, CompiledInput};
use crate::type_ref::resolve_type;
use crate::warning::CompileWarning;

/// Everything one compile call produces.
#[derive(Debug)]
pub struct CompiledSchema {
    /// The input document with consumed directive nodes removed, for any
    /// downstream consumer that still needs the tree.
    pub document: ServiceDocument,
    /// Declared input object name → composed transformer unit.
    pub inputs: BTreeMap<String, CompiledInput>,
    /// Non-fatal diagnostics collected along the way.
    pub warnings: Vec<CompileWarning>,
}

/// Parse `source` as SDL and compile it.
pub fn compile_sdl(
    source: impl AsRef<str>,
    config: &CompileConfig,
) -> Result<CompiledSchema, CompileError> {
    let document = async_graphql_parser::parse_schema(source)?;
    compile(document, config)
}

/// Compile a parsed document against the caller's transformer registries.
///
/// Compilation is fully synchronous; only invocation of the composed
/// transformers is asynchronous.
pub fn compile(
    mut document: ServiceDocument,
    config: &CompileConfig,
) -> Result<CompiledSchema, CompileError> {
    let mut warnings = Vec::new();
    let mut registry: HashMap<String, InputObjectDescriptor> = HashMap::new();

    for definition in document.definitions.iter_mut() {
        let TypeSystemDefinition::Type(type_def) = definition else {
            continue;
        };
        if type_def.node.extend {
            // Type extensions are not declarations; leave them untouched.
            continue;
        }
        let type_pos = type_def.pos;
        let TypeKind::InputObject(input_object) = &mut type_def.node.kind else {
            continue;
        };
        let type_name = type_def.node.name.node.to_string();
        let mut descriptor = InputObjectDescriptor::new(type_name.clone());

        // Object-level annotations.
        let mut kept = Vec::with_capacity(type_def.node.directives.len());
        for directive in std::mem::take(&mut type_def.node.directives) {
            match bind_directive(
                &directive,
                &type_name,
                &config.object_transformers,
                &config.options,
                &mut warnings,
            )? {
                BindOutcome::Bound(binding) => descriptor.object_validators.push(binding),
                BindOutcome::Unknown => kept.push(directive),
            }
        }
        type_def.node.directives = kept;

        // Field declarations, each with its own annotation chain.
        for field_def in input_object.fields.iter_mut() {
            let field_name = field_def.node.name.node.to_string();
            let owner = format!("{type_name}.{field_name}");
            let mut field = FieldDescriptor {
                name: field_name.clone(),
                type_ref: resolve_type(&field_def.node.ty.node),
                transformers: Vec::new(),
            };

            let mut kept = Vec::with_capacity(field_def.node.directives.len());
            for directive in std::mem::take(&mut field_def.node.directives) {
                match bind_directive(
                    &directive,
                    &owner,
                    &config.field_transformers,
                    &config.options,
                    &mut warnings,
                )? {
                    BindOutcome::Bound(binding) => field.transformers.push(binding),
                    BindOutcome::Unknown => kept.push(directive),
                }
            }
            field_def.node.directives = kept;

            if descriptor.fields.insert(field_name.clone(), field).is_some() {
                warnings.push(CompileWarning::duplicate_declaration(
                    &type_name,
                    field_def.pos,
                    &field_name,
                ));
            }
        }

        tracing::debug!(
            type_name = %type_name,
            fields = descriptor.fields.len(),
            object_validators = descriptor.object_validators.len(),
            "registered input object"
        );
        if registry.insert(type_name.clone(), descriptor).is_some() {
            warnings.push(CompileWarning::duplicate_declaration(
                &type_name, type_pos, &type_name,
            ));
        }
    }

    link_nested(&mut registry);
    let inputs = seal(registry, &config.options);

    Ok(CompiledSchema {
        document,
        inputs,
        warnings,
    })
}
