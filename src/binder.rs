//! Binding of a single directive annotation to a registered transformer.

use async_graphql_parser::types::ConstDirective;
use async_graphql_parser::Positioned;

use crate::arguments::extract_arguments;
use crate::config::CompileOptions;
use crate::descriptor::TransformerBinding;
use crate::error::CompileError;
use crate::registry::TransformerRegistry;
use crate::warning::CompileWarning;

/// Whether the annotation node was consumed by the binder.
#[derive(Debug)]
pub(crate) enum BindOutcome {
    /// The directive resolved to a transformer; the node may be removed
    /// from the document.
    Bound(TransformerBinding),
    /// No transformer is registered under this name; the node stays in
    /// the document for any downstream consumer.
    Unknown,
}

/// Look up `directive` in `registry` and produce a binding.
///
/// Unknown names warn and leave the node untouched (or abort, in strict
/// mode). Argument extraction errors are fatal. The transformer function
/// is never invoked here.
pub(crate) fn bind_directive(
    directive: &Positioned<ConstDirective>,
    owner: &str,
    registry: &TransformerRegistry,
    options: &CompileOptions,
    warnings: &mut Vec<CompileWarning>,
) -> Result<BindOutcome, CompileError> {
    let name = directive.node.name.node.as_str();

    let Some(handler) = registry.get(name) else {
        if options.strict_directives {
            return Err(CompileError::UnknownDirective {
                directive: name.to_string(),
                owner: owner.to_string(),
                line: directive.pos.line,
                column: directive.pos.column,
            });
        }
        tracing::warn!(directive = name, owner, "unknown directive, leaving node in place");
        warnings.push(CompileWarning::unknown_directive(owner, directive.pos, name));
        return Ok(BindOutcome::Unknown);
    };

    let args = extract_arguments(&directive.node, &handler.arg_kinds)?;
    Ok(BindOutcome::Bound(TransformerBinding::directive(
        name.to_string(),
        handler.function.clone(),
        args,
    )))
}
