//! Static directive argument extraction.
//!
//! Directive arguments are literal values fixed at declaration time. The
//! four common literal kinds (Int, Float, String, Boolean) are extracted
//! into typed [`ArgValue`]s; any other literal kind (enum, list, object,
//! null) is passed through raw for the transformer function to interpret
//! itself.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use async_graphql_parser::types::ConstDirective;
use async_graphql_value::ConstValue;
use serde::{Deserialize, Serialize};

use crate::error::CompileError;

/// Static arguments of one directive annotation, keyed by argument name.
pub type DirectiveArgs = BTreeMap<String, ArgValue>;

/// One extracted directive argument.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Int(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    /// Any literal kind outside the typed set, passed through unchanged.
    Other(ConstValue),
}

impl ArgValue {
    fn from_const(value: ConstValue) -> Self {
        match value {
            ConstValue::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ArgValue::Int(i)
                } else if let Some(f) = n.as_f64() {
                    ArgValue::Float(f)
                } else {
                    ArgValue::Other(ConstValue::Number(n))
                }
            }
            ConstValue::String(s) => ArgValue::String(s),
            ConstValue::Boolean(b) => ArgValue::Boolean(b),
            other => ArgValue::Other(other),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ArgValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ArgValue::Float(f) => Some(*f),
            ArgValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            ArgValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ArgValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }
}

/// Literal kind a directive handler may declare as expected for an
/// argument. A declared expectation that the literal does not meet is a
/// fatal compile error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArgKind {
    Int,
    Float,
    String,
    Boolean,
}

impl ArgKind {
    fn matches(&self, value: &ArgValue) -> bool {
        matches!(
            (self, value),
            (ArgKind::Int, ArgValue::Int(_))
                | (ArgKind::Float, ArgValue::Float(_))
                | (ArgKind::String, ArgValue::String(_))
                | (ArgKind::Boolean, ArgValue::Boolean(_))
        )
    }
}

impl fmt::Display for ArgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArgKind::Int => "Int",
            ArgKind::Float => "Float",
            ArgKind::String => "String",
            ArgKind::Boolean => "Boolean",
        };
        f.write_str(name)
    }
}

/// Extract all arguments of `directive`, validating any argument for
/// which the handler declared an expected literal kind.
pub(crate) fn extract_arguments(
    directive: &ConstDirective,
    expected: &HashMap<String, ArgKind>,
) -> Result<DirectiveArgs, CompileError> {
    let mut args = DirectiveArgs::new();
    for (name, value) in &directive.arguments {
        let arg_name = name.node.to_string();
        let extracted = ArgValue::from_const(value.node.clone());
        if let Some(kind) = expected.get(&arg_name) {
            if !kind.matches(&extracted) {
                return Err(CompileError::MalformedArgument {
                    directive: directive.name.node.to_string(),
                    argument: arg_name,
                    expected: *kind,
                    actual: literal_kind(&value.node),
                    line: value.pos.line,
                    column: value.pos.column,
                });
            }
        }
        args.insert(arg_name, extracted);
    }
    Ok(args)
}

/// GraphQL literal kind name of a const value, for error messages.
fn literal_kind(value: &ConstValue) -> &'static str {
    match value {
        ConstValue::Number(n) if n.is_f64() => "Float",
        ConstValue::Number(_) => "Int",
        ConstValue::String(_) => "String",
        ConstValue::Boolean(_) => "Boolean",
        ConstValue::Null => "Null",
        ConstValue::Enum(_) => "Enum",
        ConstValue::List(_) => "List",
        ConstValue::Object(_) => "Object",
        ConstValue::Binary(_) => "Binary",
    }
}
