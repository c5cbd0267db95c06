//! Translator error model.
//!
//! A closed, struct-carrying variant enum plus a thin wrapper type with a
//! `Display` impl. These are compiler diagnostics, so messages report
//! plainly: what construct or information was missing, and at which node.

use crate::node::NodeId;
use crate::objects::BridgeErrorKind;
use crate::writer::WriteError;

/// An unsupported construct or missing type information. Carries the
/// offending node's id so callers can map it back to a source position if
/// they tracked one.
#[derive(Debug, Clone)]
pub struct TranslateError {
    pub node: NodeId,
    pub kind: TranslateErrorKind,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TranslateErrorKind {
    UnhandledExprVariant(&'static str),
    UnhandledStmtVariant(&'static str),
    UnhandledDeclVariant(&'static str),
    UnhandledBuiltin(String),
    InvalidAssignLhs,
    InvalidCombinedAssignArity { lhs: usize, rhs: usize },
    CommentContainsLongBracketClose,
    RawStringContainsLongBracketClose,
    RangeOverNonRangeable,
    RangeRequiresDefine,
    MissingTypeInfo(BridgeErrorKind),
    VariadicCallMissingArgs,
    Other(String),
}

impl std::fmt::Display for TranslateErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TranslateErrorKind::UnhandledExprVariant(v) => {
                write!(f, "unsupported expression variant: {v}")
            }
            TranslateErrorKind::UnhandledStmtVariant(v) => {
                write!(f, "unsupported statement variant: {v}")
            }
            TranslateErrorKind::UnhandledDeclVariant(v) => {
                write!(f, "unsupported declaration variant: {v}")
            }
            TranslateErrorKind::UnhandledBuiltin(name) => write!(f, "unhandled builtin {name}"),
            TranslateErrorKind::InvalidAssignLhs => {
                write!(f, "assignment target must be an identifier, index, or selector")
            }
            TranslateErrorKind::InvalidCombinedAssignArity { lhs, rhs } => write!(
                f,
                "combined assignment must have exactly one expression per side (got {lhs} vs {rhs})"
            ),
            TranslateErrorKind::CommentContainsLongBracketClose => {
                write!(f, "block comment contains the long-bracket close sequence `]=]`")
            }
            TranslateErrorKind::RawStringContainsLongBracketClose => {
                write!(f, "raw string literal contains the long-bracket close sequence `]=]`")
            }
            TranslateErrorKind::RangeOverNonRangeable => write!(
                f,
                "range requires a slice, array, or map type; got neither"
            ),
            TranslateErrorKind::RangeRequiresDefine => write!(
                f,
                "range with loop variables requires the define form (`:=`)"
            ),
            TranslateErrorKind::MissingTypeInfo(kind) => write!(f, "{kind}"),
            TranslateErrorKind::VariadicCallMissingArgs => {
                write!(f, "ellipsis call requires at least one argument")
            }
            TranslateErrorKind::Other(msg) => f.write_str(msg),
        }
    }
}

impl std::fmt::Display for TranslateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "at node {:?}: {}", self.node, self.kind)
    }
}

impl std::error::Error for TranslateError {}

impl TranslateError {
    pub fn new(node: NodeId, kind: TranslateErrorKind) -> Self {
        TranslateError { node, kind }
    }
}

/// The single return-value error shape callers see: a translate error or a
/// write error, nothing else escapes a `translate_node` call.
#[derive(Debug)]
pub enum CoreError {
    Translate(TranslateError),
    Write(WriteError),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoreError::Translate(e) => write!(f, "{e}"),
            CoreError::Write(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CoreError::Translate(e) => Some(e),
            CoreError::Write(e) => Some(e),
        }
    }
}

impl From<TranslateError> for CoreError {
    fn from(e: TranslateError) -> Self {
        CoreError::Translate(e)
    }
}

impl From<WriteError> for CoreError {
    fn from(e: WriteError) -> Self {
        CoreError::Write(e)
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
