//! Error types shared across the crate.

use thiserror::Error;

use crate::base::{FileId, QualifiedName};

/// A declaration index could not answer a query.
///
/// The resolver never surfaces this: a failed source contributes no candidates.
#[derive(Debug, Clone, Error)]
pub enum IndexError {
    #[error("index is not available: {0}")]
    Unavailable(String),

    #[error("index query was cancelled")]
    Cancelled,

    #[error("index query failed: {0}")]
    Other(String),
}

/// Internal invariant violations found while resolving candidates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("visibility of source declaration '{name}' is unknown")]
    MissingVisibility { name: QualifiedName },
}

/// The document writer refused or failed to insert an import.
#[derive(Debug, Clone, Error)]
pub enum WriteError {
    #[error("file {0} is not open for writing")]
    FileNotFound(FileId),

    #[error("import insertion failed: {0}")]
    Failed(String),
}

/// Why a fix did not commit.
#[derive(Debug, Clone, Error)]
pub enum CommitError {
    #[error("fix is stale: the document or diagnostics changed since it was computed")]
    Stale,

    #[error("fix is not available")]
    Unavailable,

    #[error("'{0}' is not one of the suggested imports")]
    NotASuggestion(QualifiedName),

    #[error("fix has {0} candidates; an explicit choice is required")]
    NoSoleSuggestion(usize),

    #[error(transparent)]
    Write(#[from] WriteError),
}
