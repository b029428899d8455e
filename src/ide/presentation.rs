//! Hint presentation — the UI side of an import fix.
//!
//! The UI owns display arbitration and threading; a fix only asks it the
//! questions below and hands it an [`ImportHint`].

use crate::base::{QualifiedName, TextRange};

/// How the host is running.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExecutionMode {
    /// An editor with a user in front of it.
    #[default]
    Interactive,
    /// Headless or test execution: hints are never displayed.
    Batch,
}

/// What the UI did with a hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PresentOutcome {
    Shown,
    Declined,
}

/// The UI collaborator that can show a question hint.
pub trait HintPresenter {
    /// Whether a project and editor are active.
    fn has_host_context(&self) -> bool;

    /// Whether a higher-priority hint already occupies the slot.
    fn has_competing_hint(&self) -> bool;

    fn present(&mut self, hint: &ImportHint) -> PresentOutcome;
}

/// A question hint offering to import one of the suggestions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImportHint {
    pub text: String,
    pub headline: QualifiedName,
    pub multiple: bool,
    /// Range of the reference the hint is anchored to.
    pub range: TextRange,
}

impl ImportHint {
    pub fn new(headline: QualifiedName, multiple: bool, range: TextRange) -> Self {
        Self {
            text: hint_message(&headline, multiple),
            headline,
            multiple,
            range,
        }
    }
}

/// `"a.b.Foo?"`, or `"a.b.Foo? (multiple choices...)"` when there are several candidates.
pub fn hint_message(headline: &QualifiedName, multiple: bool) -> String {
    if multiple {
        format!("{headline}? (multiple choices...)")
    } else {
        format!("{headline}?")
    }
}
