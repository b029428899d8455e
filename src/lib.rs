//! # autoimport-base
//!
//! Core library for turning unresolved identifier references into import
//! suggestions and committing the chosen import.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide     → Import quick fix (factory, hint, commit)
//!   ↓
//! hir     → Declarations, indices, accessibility, candidate resolution
//!   ↓
//! base    → Primitives (FileId, QualifiedName, TextRange)
//! ```

/// Foundation types: FileId, QualifiedName, TextRange
pub mod base;

/// Error types
pub mod error;

/// Semantic layer: declarations, indices and candidate resolution
pub mod hir;

/// IDE features: the import suggestion fix
pub mod ide;

// Re-export commonly needed items
pub use base::{FileId, ModuleId, QualifiedName, TextRange, TextSize};
pub use error::{CommitError, IndexError, ResolveError, WriteError};
