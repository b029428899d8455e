//! Semantic layer: declarations, reference sites and candidate resolution.
//!
//! The declaration indices, the import state and the diagnostics all belong
//! to external collaborators; this layer fixes their interfaces and
//! implements the resolution logic on top of them.

mod decl;
mod diagnostics;
mod imports;
mod index;
mod input;
mod resolve;
mod visibility;

pub use decl::{DeclInfo, Declaration, Origin, Visibility};
pub use diagnostics::{Diagnostic, FlaggedNode, Severity, codes};
pub use imports::{DocumentState, DocumentWriter, FileImports, ImportNecessityFilter, ImportOracle, ImportTable};
pub use index::{DeclarationIndex, DeclarationTable, EmptyIndex, IndexContext, IndexKind};
pub use input::{FileKind, ReferenceSite, Revision, SearchScope, SourceFile, TargetKind};
pub use resolve::{CandidateResolver, InvariantPolicy, ResolveConfig, SuggestionSet};
pub use visibility::AccessibilityFilter;
