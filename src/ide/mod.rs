//! IDE features — the import quick fix.
//!
//! This module sits between the semantic model (HIR) and the host editor.
//!
//! ## Design Principles
//!
//! 1. **Pure decisions**: a fix exposes availability and ordered suggestions;
//!    display arbitration and threading belong to the UI
//! 2. **No editor types**: collaborators are traits, implemented by the host
//! 3. **Single-shot**: suggestions are computed once per diagnostic
//!
//! ## Usage
//!
//! ```ignore
//! use autoimport::hir::{IndexContext, ImportTable};
//! use autoimport::ide::FixFactory;
//!
//! let factory = FixFactory::new(IndexContext::empty().with_host_types(&host_index), &imports);
//! if let Some(mut fix) = factory.try_create(&diagnostic) {
//!     if fix.show_hint(&mut presenter, &imports).is_handled() {
//!         fix.commit_sole(&mut imports)?;
//!     }
//! }
//! ```

mod fix_factory;
mod import_fix;
mod presentation;
mod registry;

pub use fix_factory::FixFactory;
pub use import_fix::{Committed, FixConfig, FixState, HintOutcome, ImportSuggestionFix};
pub use presentation::{ExecutionMode, HintPresenter, ImportHint, PresentOutcome, hint_message};
pub use registry::{FixRegistry, FixTicket, OccurrenceKey};
