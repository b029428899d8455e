//! Inputs to resolution: the reference site and the search scope.

use std::sync::Arc;

use smol_str::SmolStr;

use crate::base::{FileId, ModuleId, TextRange};

/// Delimits which declarations an index query considers.
///
/// The resolver only passes it through; interpretation belongs to the index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SearchScope {
    /// Every declaration in the project and its libraries.
    #[default]
    WholeProject,
    /// Only declarations from these modules.
    Modules(Arc<[ModuleId]>),
    /// Only declarations from these files.
    Files(Arc<[FileId]>),
}

impl SearchScope {
    pub fn whole_project() -> Self {
        SearchScope::WholeProject
    }

    pub fn modules(modules: impl IntoIterator<Item = ModuleId>) -> Self {
        SearchScope::Modules(modules.into_iter().collect())
    }

    pub fn files(files: impl IntoIterator<Item = FileId>) -> Self {
        SearchScope::Files(files.into_iter().collect())
    }

    /// Whether a declaration located in `file` / `module` is inside this scope.
    ///
    /// Library declarations have no file; they are only part of the whole-project scope
    /// or of a module scope naming their module.
    pub fn contains(&self, file: Option<FileId>, module: Option<ModuleId>) -> bool {
        match self {
            SearchScope::WholeProject => true,
            SearchScope::Modules(modules) => module.is_some_and(|m| modules.contains(&m)),
            SearchScope::Files(files) => file.is_some_and(|f| files.contains(&f)),
        }
    }
}

/// What a module compiles to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TargetKind {
    /// The module runs on the host platform and sees its types by short name.
    #[default]
    HostInterop,
    /// The module has no host-platform symbol table (e.g. a script target).
    PureSource,
}

/// Language of a file an unresolved reference can appear in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FileKind {
    #[default]
    Source,
    /// Any other file (host-language sources, resources). Never gets import suggestions.
    Foreign,
}

/// Monotonic document revision, bumped by every edit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Revision(pub u64);

impl Revision {
    pub fn next(self) -> Self {
        Revision(self.0 + 1)
    }
}

/// The file a reference (or a diagnostic) lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SourceFile {
    pub id: FileId,
    pub module: ModuleId,
    pub target: TargetKind,
    pub kind: FileKind,
    /// Revision of the document the diagnostics were computed against.
    pub revision: Revision,
}

impl SourceFile {
    pub fn new(id: FileId, module: ModuleId) -> Self {
        Self {
            id,
            module,
            target: TargetKind::default(),
            kind: FileKind::default(),
            revision: Revision::default(),
        }
    }

    pub fn with_target(mut self, target: TargetKind) -> Self {
        self.target = target;
        self
    }

    pub fn with_kind(mut self, kind: FileKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn at_revision(mut self, revision: Revision) -> Self {
        self.revision = revision;
        self
    }
}

/// An unresolved identifier occurrence plus the context of its file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceSite {
    /// The short name being resolved.
    pub name: SmolStr,
    pub file: SourceFile,
    pub range: TextRange,
}

impl ReferenceSite {
    pub fn new(name: impl Into<SmolStr>, file: SourceFile, range: TextRange) -> Self {
        Self {
            name: name.into(),
            file,
            range,
        }
    }

    pub fn module(&self) -> ModuleId {
        self.file.module
    }

    pub fn target(&self) -> TargetKind {
        self.file.target
    }
}
