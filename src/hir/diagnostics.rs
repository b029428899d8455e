//! Diagnostics — the analyzer's reports this crate reacts to.
//!
//! Diagnostics are produced elsewhere (by the compiler front end); this
//! module only models what a quick fix needs to read from one: the file,
//! the code, and the syntactic shape of the flagged node.

use std::sync::Arc;

use smol_str::SmolStr;

use super::input::SourceFile;
use crate::base::TextRange;

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Hint,
}

/// Diagnostic codes this crate emits.
pub mod codes {
    /// Unresolved reference (name not found).
    pub const UNRESOLVED_REFERENCE: &str = "E0001";
}

/// The syntactic shape of the node a diagnostic points at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FlaggedNode {
    /// A bare identifier reference: `Foo`, `map`.
    SimpleName { name: SmolStr, range: TextRange },
    /// An indexed access: `items[0]`.
    ArrayAccess { range: TextRange },
    /// A dotted reference: `a.b.Foo`.
    QualifiedExpression { range: TextRange },
    /// A call expression: `f(x)`.
    Call { range: TextRange },
    /// An operator application that could not be resolved: `a + b`.
    Operator { range: TextRange },
    /// Anything else.
    Other { range: TextRange },
}

impl FlaggedNode {
    pub fn simple_name(name: impl Into<SmolStr>, range: TextRange) -> Self {
        FlaggedNode::SimpleName {
            name: name.into(),
            range,
        }
    }

    pub fn range(&self) -> TextRange {
        match self {
            FlaggedNode::SimpleName { range, .. }
            | FlaggedNode::ArrayAccess { range }
            | FlaggedNode::QualifiedExpression { range }
            | FlaggedNode::Call { range }
            | FlaggedNode::Operator { range }
            | FlaggedNode::Other { range } => *range,
        }
    }
}

/// A diagnostic message attached to a node of a file.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    /// The file containing the flagged node.
    pub file: SourceFile,
    pub node: FlaggedNode,
    pub severity: Severity,
    /// Error/warning code (e.g., "E0001").
    pub code: Option<Arc<str>>,
    pub message: Arc<str>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(file: SourceFile, node: FlaggedNode, message: impl Into<Arc<str>>) -> Self {
        Self {
            file,
            node,
            severity: Severity::Error,
            code: None,
            message: message.into(),
        }
    }

    /// An unresolved-reference error for `node`.
    pub fn unresolved_reference(file: SourceFile, node: FlaggedNode) -> Self {
        let message = match &node {
            FlaggedNode::SimpleName { name, .. } => format!("unresolved reference: '{name}'"),
            _ => "unresolved reference".to_string(),
        };
        Self::error(file, node, message).with_code(codes::UNRESOLVED_REFERENCE)
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<Arc<str>>) -> Self {
        self.code = Some(code.into());
        self
    }
}
