//! Foundation types for the import-fix toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`FileId`], [`ModuleId`] - Interned file and module identifiers
//! - [`QualifiedName`] - Dot-separated fully-qualified names
//! - [`TextRange`], [`TextSize`] - Source positions
//!
//! This module has NO dependencies on other crate modules.

mod file_id;
mod name;
mod span;

pub use file_id::{FileId, ModuleId};
pub use name::{NameError, QualifiedName, is_identifier};
pub use span::{TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
