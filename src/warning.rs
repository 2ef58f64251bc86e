//! Warning types collected during compilation.
//!
//! Warnings are non-fatal diagnostics: compilation continues and the full
//! list is returned on [`CompiledSchema`](crate::CompiledSchema) alongside
//! the compiled inputs. Each warning is also logged via `tracing`.

use async_graphql_parser::Pos;
use serde::{Deserialize, Serialize};

/// A non-fatal diagnostic emitted while compiling a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileWarning {
    /// The declaration the warning applies to (e.g. `"Profile"` or
    /// `"Profile.name"`).
    pub owner: String,
    /// Source line of the offending node.
    pub line: usize,
    /// Source column of the offending node.
    pub column: usize,
    /// Classification of the warning.
    pub kind: WarningKind,
    /// Human-readable description.
    pub message: String,
}

/// Classification of compile warnings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WarningKind {
    /// A directive name was not found in the transformer registry. The
    /// annotation node is left in the document for downstream consumers.
    UnknownDirective { directive: String },
    /// An input object or field re-used an already-declared name; the later
    /// declaration overwrote the earlier one.
    DuplicateDeclaration { name: String },
}

impl CompileWarning {
    pub(crate) fn unknown_directive(owner: &str, pos: Pos, directive: &str) -> Self {
        Self {
            owner: owner.to_string(),
            line: pos.line,
            column: pos.column,
            kind: WarningKind::UnknownDirective {
                directive: directive.to_string(),
            },
            message: format!("unknown directive `@{directive}` on `{owner}`"),
        }
    }

    pub(crate) fn duplicate_declaration(owner: &str, pos: Pos, name: &str) -> Self {
        Self {
            owner: owner.to_string(),
            line: pos.line,
            column: pos.column,
            kind: WarningKind::DuplicateDeclaration {
                name: name.to_string(),
            },
            message: format!("`{name}` declared more than once; later declaration wins"),
        }
    }
}
