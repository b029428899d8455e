//! The import suggestion fix for one unresolved reference.
//!
//! ```text
//! Constructed ─┬─> Available ──> HintShown ──> Committed
//!              │       │             │
//!              │       ├─────────────┴──> Dismissed
//!              │       └─────────────────> Stale
//!              └─> Unavailable
//! ```
//!
//! Suggestions are computed once, at construction. Availability is checked
//! again before any hint or commit, because the document may have changed
//! in between.

use std::fmt;

use super::presentation::{ExecutionMode, HintPresenter, ImportHint, PresentOutcome};
use super::registry::FixTicket;
use crate::base::{FileId, QualifiedName};
use crate::error::CommitError;
use crate::hir::{
    CandidateResolver, DocumentState, DocumentWriter, ReferenceSite, ResolveConfig, Revision,
    SuggestionSet,
};

/// Settings for fixes built by a [`FixFactory`](super::FixFactory).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FixConfig {
    pub mode: ExecutionMode,
    pub resolve: ResolveConfig,
}

impl FixConfig {
    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_resolve(mut self, resolve: ResolveConfig) -> Self {
        self.resolve = resolve;
        self
    }
}

/// Lifecycle state of an [`ImportSuggestionFix`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FixState {
    Available,
    Unavailable,
    HintShown,
    Committed,
    Dismissed,
    Stale,
}

impl FixState {
    /// States from which nothing else can happen.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            FixState::Unavailable | FixState::Committed | FixState::Dismissed | FixState::Stale
        )
    }
}

impl fmt::Display for FixState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FixState::Available => "available",
            FixState::Unavailable => "unavailable",
            FixState::HintShown => "hint-shown",
            FixState::Committed => "committed",
            FixState::Dismissed => "dismissed",
            FixState::Stale => "stale",
        })
    }
}

/// Result of asking a fix to show its hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HintOutcome {
    /// The hint is on screen.
    Shown,
    /// Batch execution: nothing displayed, but the fix counts as handled.
    Suppressed,
    /// The UI declined to display it.
    Declined,
    /// Another hint already occupies the slot.
    Occupied,
    /// No project or editor is active.
    NoHostContext,
    /// The fix has nothing to offer (empty, stale, or already finished).
    NotApplicable,
}

impl HintOutcome {
    /// Whether the fix took care of the reference.
    pub fn is_handled(self) -> bool {
        matches!(self, HintOutcome::Shown | HintOutcome::Suppressed)
    }
}

/// A successful commit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Committed {
    pub file: FileId,
    pub name: QualifiedName,
    pub revision: Revision,
}

/// Suggestions for one unresolved reference plus the workflow to import one.
#[derive(Debug)]
pub struct ImportSuggestionFix {
    site: ReferenceSite,
    suggestions: SuggestionSet,
    state: FixState,
    mode: ExecutionMode,
    ticket: Option<FixTicket>,
}

impl ImportSuggestionFix {
    /// Resolve `site` eagerly and wrap the result.
    pub fn compute(site: ReferenceSite, resolver: &CandidateResolver<'_>, mode: ExecutionMode) -> Self {
        let suggestions = resolver.resolve(&site);
        Self::new(site, suggestions, mode)
    }

    pub fn new(site: ReferenceSite, suggestions: SuggestionSet, mode: ExecutionMode) -> Self {
        let state = if suggestions.is_empty() {
            FixState::Unavailable
        } else {
            FixState::Available
        };
        tracing::debug!(
            reference = %site.name,
            suggestions = suggestions.len(),
            %state,
            "import fix constructed"
        );
        Self {
            site,
            suggestions,
            state,
            mode,
            ticket: None,
        }
    }

    /// Tie the fix to a registry ticket; a superseded ticket makes it stale.
    /// An inert fix drops the ticket at once.
    pub fn with_ticket(mut self, ticket: FixTicket) -> Self {
        if !self.state.is_terminal() {
            self.ticket = Some(ticket);
        }
        self
    }

    pub fn site(&self) -> &ReferenceSite {
        &self.site
    }

    pub fn suggestions(&self) -> &SuggestionSet {
        &self.suggestions
    }

    pub fn state(&self) -> FixState {
        self.state
    }

    pub fn text(&self) -> &'static str {
        "Import"
    }

    pub fn family_name(&self) -> &'static str {
        "Import"
    }

    /// Import fixes outrank ordinary quick fixes in the menu.
    pub fn is_high_priority(&self) -> bool {
        true
    }

    /// The commit runs inside the host's write action.
    pub fn starts_in_write_action(&self) -> bool {
        true
    }

    /// Whether the document or the diagnostic pass moved on since construction.
    pub fn is_stale(&self, document: &(impl DocumentState + ?Sized)) -> bool {
        if self.state == FixState::Stale {
            return true;
        }
        if self.ticket.as_ref().is_some_and(|t| !t.is_current()) {
            return true;
        }
        document.revision(self.site.file.id) != Some(self.site.file.revision)
    }

    /// Whether the fix can still be shown or committed.
    pub fn is_available(&self, document: &(impl DocumentState + ?Sized)) -> bool {
        matches!(self.state, FixState::Available | FixState::HintShown)
            && !self.suggestions.is_empty()
            && !self.is_stale(document)
    }

    /// Move to `Stale` if the world changed. Returns whether the fix is still usable.
    pub fn revalidate(&mut self, document: &(impl DocumentState + ?Sized)) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        if self.is_stale(document) {
            self.transition(FixState::Stale);
            return false;
        }
        true
    }

    /// Mark the fix stale because its diagnostics were recomputed.
    pub fn mark_stale(&mut self) {
        if !self.state.is_terminal() {
            self.transition(FixState::Stale);
        }
    }

    /// The hint to display, headlined by the first suggestion.
    pub fn hint(&self) -> Option<ImportHint> {
        let headline = self.suggestions.first()?.clone();
        Some(ImportHint::new(headline, self.suggestions.len() > 1, self.site.range))
    }

    /// Offer the hint through `presenter`.
    pub fn show_hint(
        &mut self,
        presenter: &mut dyn HintPresenter,
        document: &(impl DocumentState + ?Sized),
    ) -> HintOutcome {
        if self.state != FixState::Available || !self.revalidate(document) {
            return HintOutcome::NotApplicable;
        }
        let Some(hint) = self.hint() else {
            return HintOutcome::NotApplicable;
        };
        if !presenter.has_host_context() {
            return HintOutcome::NoHostContext;
        }
        if presenter.has_competing_hint() {
            return HintOutcome::Occupied;
        }
        if self.mode == ExecutionMode::Batch {
            return HintOutcome::Suppressed;
        }

        match presenter.present(&hint) {
            PresentOutcome::Shown => {
                self.transition(FixState::HintShown);
                HintOutcome::Shown
            }
            PresentOutcome::Declined => HintOutcome::Declined,
        }
    }

    /// The user declined the fix.
    pub fn dismiss(&mut self) {
        if matches!(self.state, FixState::Available | FixState::HintShown) {
            self.transition(FixState::Dismissed);
        }
    }

    /// Import the only suggestion.
    pub fn commit_sole(&mut self, writer: &mut dyn DocumentWriter) -> Result<Committed, CommitError> {
        if self.suggestions.len() != 1 {
            return Err(CommitError::NoSoleSuggestion(self.suggestions.len()));
        }
        let Some(name) = self.suggestions.first().cloned() else {
            return Err(CommitError::NoSoleSuggestion(0));
        };
        self.commit(&name, writer)
    }

    /// Import `chosen`, which must be one of the suggestions.
    ///
    /// Availability is re-checked first: a stale fix refuses to commit. A
    /// failed write leaves the fix as it was.
    pub fn commit(
        &mut self,
        chosen: &QualifiedName,
        writer: &mut dyn DocumentWriter,
    ) -> Result<Committed, CommitError> {
        if !matches!(self.state, FixState::Available | FixState::HintShown) {
            return Err(match self.state {
                FixState::Stale => CommitError::Stale,
                _ => CommitError::Unavailable,
            });
        }
        if !self.revalidate(&*writer) {
            tracing::warn!(reference = %self.site.name, "refusing to commit stale import fix");
            return Err(CommitError::Stale);
        }
        if !self.suggestions.contains(chosen) {
            return Err(CommitError::NotASuggestion(chosen.clone()));
        }

        let file = self.site.file.id;
        let revision = writer.apply_import(file, chosen).inspect_err(|err| {
            tracing::warn!(%file, name = %chosen, error = %err, "import insertion failed");
        })?;

        self.transition(FixState::Committed);
        Ok(Committed {
            file,
            name: chosen.clone(),
            revision,
        })
    }

    fn transition(&mut self, next: FixState) {
        tracing::debug!(reference = %self.site.name, from = %self.state, to = %next, "import fix transition");
        self.state = next;
        if next.is_terminal() {
            // Release the occurrence in the registry.
            self.ticket = None;
        }
    }
}
