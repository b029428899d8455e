//! Import state of a file: what is already visible without a new import.
//!
//! [`ImportOracle`] answers "would an unqualified use of this name already
//! resolve here?". [`DocumentWriter`] inserts an import. All of these are
//! external collaborators; [`ImportTable`] implements them in memory.

use indexmap::IndexSet;
use rustc_hash::FxHashMap;

use super::input::{ReferenceSite, Revision};
use crate::base::{FileId, QualifiedName};
use crate::error::WriteError;

/// Decides whether a candidate still needs an import at a reference site.
pub trait ImportOracle {
    fn needs_import(&self, name: &QualifiedName, site: &ReferenceSite) -> bool;
}

/// Read access to document revisions, used to detect stale fixes.
pub trait DocumentState {
    /// Current revision of the document, or `None` if it is not open.
    fn revision(&self, file: FileId) -> Option<Revision>;
}

/// Inserts imports into documents.
///
/// `&mut self` gives the writer exclusive access for the duration of one
/// insertion; the implementation records it as a single undoable edit.
pub trait DocumentWriter: DocumentState {
    /// Insert `import <name>` into `file` and nothing else.
    fn apply_import(&mut self, file: FileId, name: &QualifiedName) -> Result<Revision, WriteError>;
}

/// Keeps candidates that need a new import, dropping the rest.
#[derive(Clone, Copy)]
pub struct ImportNecessityFilter<'a> {
    oracle: &'a dyn ImportOracle,
}

impl<'a> ImportNecessityFilter<'a> {
    pub fn new(oracle: &'a dyn ImportOracle) -> Self {
        Self { oracle }
    }

    pub fn needs_import(&self, name: &QualifiedName, site: &ReferenceSite) -> bool {
        let needed = self.oracle.needs_import(name, site);
        if !needed {
            tracing::trace!(%name, "already resolvable without import");
        }
        needed
    }
}

// ============================================================================
// FILE IMPORTS
// ============================================================================

/// Package and import directives of one file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FileImports {
    package: QualifiedName,
    /// `import a.b.C`
    explicit: IndexSet<QualifiedName>,
    /// `import a.b.*`, stored as `a.b`
    wildcards: IndexSet<QualifiedName>,
}

impl FileImports {
    pub fn new(package: QualifiedName) -> Self {
        Self {
            package,
            ..Self::default()
        }
    }

    pub fn package(&self) -> &QualifiedName {
        &self.package
    }

    pub fn add_import(&mut self, name: QualifiedName) -> bool {
        self.explicit.insert(name)
    }

    pub fn add_wildcard(&mut self, package: QualifiedName) -> bool {
        self.wildcards.insert(package)
    }

    pub fn imports(&self) -> impl Iterator<Item = &QualifiedName> {
        self.explicit.iter()
    }

    pub fn wildcards(&self) -> impl Iterator<Item = &QualifiedName> {
        self.wildcards.iter()
    }

    /// Whether `name` is reachable by its short name through this file's own
    /// package or imports.
    pub fn covers(&self, name: &QualifiedName) -> bool {
        if self.explicit.contains(name) {
            return true;
        }
        match name.parent() {
            Some(parent) => parent == self.package || self.wildcards.contains(&parent),
            None => false,
        }
    }
}

// ============================================================================
// IMPORT TABLE
// ============================================================================

/// In-memory import state for a set of open files.
#[derive(Clone, Debug, Default)]
pub struct ImportTable {
    files: FxHashMap<FileId, FileImports>,
    revisions: FxHashMap<FileId, Revision>,
    /// Packages every file sees without importing them.
    default_imports: IndexSet<QualifiedName>,
}

impl ImportTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package that is implicitly star-imported into every file.
    pub fn add_default_import(&mut self, package: QualifiedName) {
        self.default_imports.insert(package);
    }

    /// Register (or replace) a file.
    ///
    /// A newly opened file starts at `Revision::default()`, the revision a
    /// plain [`SourceFile::new`](crate::hir::SourceFile::new) assumes.
    /// Replacing an open file counts as an edit.
    pub fn set_file(&mut self, file: FileId, imports: FileImports) {
        if self.files.insert(file, imports).is_some() {
            self.bump(file);
        } else {
            self.revisions.insert(file, Revision::default());
        }
    }

    pub fn file(&self, file: FileId) -> Option<&FileImports> {
        self.files.get(&file)
    }

    /// Record an edit that did not touch imports.
    pub fn touch(&mut self, file: FileId) {
        if self.files.contains_key(&file) {
            self.bump(file);
        }
    }

    fn bump(&mut self, file: FileId) -> Revision {
        let revision = self.revisions.entry(file).or_default();
        *revision = revision.next();
        *revision
    }
}

impl ImportOracle for ImportTable {
    fn needs_import(&self, name: &QualifiedName, site: &ReferenceSite) -> bool {
        // Root-package declarations are visible everywhere.
        let Some(parent) = name.parent() else {
            return false;
        };
        if parent.is_root() {
            return false;
        }
        if self.default_imports.contains(&parent) {
            return false;
        }
        match self.files.get(&site.file.id) {
            Some(imports) => !imports.covers(name),
            None => true,
        }
    }
}

impl DocumentState for ImportTable {
    fn revision(&self, file: FileId) -> Option<Revision> {
        if !self.files.contains_key(&file) {
            return None;
        }
        Some(self.revisions.get(&file).copied().unwrap_or_default())
    }
}

impl DocumentWriter for ImportTable {
    fn apply_import(&mut self, file: FileId, name: &QualifiedName) -> Result<Revision, WriteError> {
        let imports = self
            .files
            .get_mut(&file)
            .ok_or(WriteError::FileNotFound(file))?;
        imports.add_import(name.clone());
        let revision = self.bump(file);
        tracing::debug!(%file, %name, ?revision, "import inserted");
        Ok(revision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{ModuleId, TextRange, TextSize};
    use crate::hir::input::SourceFile;

    fn qn(s: &str) -> QualifiedName {
        QualifiedName::parse(s).unwrap()
    }

    fn site(name: &str, file: FileId) -> ReferenceSite {
        ReferenceSite::new(
            name,
            SourceFile::new(file, ModuleId::new(0)),
            TextRange::empty(TextSize::from(0)),
        )
    }

    fn table_with(imports: FileImports) -> ImportTable {
        let mut table = ImportTable::new();
        table.set_file(FileId::new(0), imports);
        table
    }

    #[test]
    fn test_explicit_import_covers() {
        let mut imports = FileImports::new(qn("app"));
        imports.add_import(qn("com.acme.Bar"));
        let table = table_with(imports);

        assert!(!table.needs_import(&qn("com.acme.Bar"), &site("Bar", FileId::new(0))));
        assert!(table.needs_import(&qn("com.other.Bar"), &site("Bar", FileId::new(0))));
    }

    #[test]
    fn test_same_package_and_wildcard() {
        let mut imports = FileImports::new(qn("app"));
        imports.add_wildcard(qn("com.acme"));
        let table = table_with(imports);
        let site = site("Foo", FileId::new(0));

        assert!(!table.needs_import(&qn("app.Foo"), &site));
        assert!(!table.needs_import(&qn("com.acme.Foo"), &site));
        assert!(table.needs_import(&qn("com.acme.util.Foo"), &site));
    }

    #[test]
    fn test_root_and_default_imports() {
        let mut table = table_with(FileImports::new(qn("app")));
        table.add_default_import(qn("lang.collections"));
        let site = site("listOf", FileId::new(0));

        assert!(!table.needs_import(&qn("listOf"), &site));
        assert!(!table.needs_import(&qn("lang.collections.listOf"), &site));
        assert!(table.needs_import(&qn("other.listOf"), &site));
    }

    #[test]
    fn test_unknown_file_needs_import() {
        let table = ImportTable::new();
        assert!(table.needs_import(&qn("com.acme.Foo"), &site("Foo", FileId::new(9))));
    }

    #[test]
    fn test_apply_import_bumps_revision() {
        let mut table = table_with(FileImports::new(qn("app")));
        let before = table.revision(FileId::new(0)).unwrap();

        let after = table.apply_import(FileId::new(0), &qn("com.acme.Foo")).unwrap();

        assert!(after > before);
        assert!(!table.needs_import(&qn("com.acme.Foo"), &site("Foo", FileId::new(0))));
        assert_eq!(table.file(FileId::new(0)).unwrap().imports().count(), 1);
    }

    #[test]
    fn test_apply_import_unknown_file() {
        let mut table = ImportTable::new();
        let result = table.apply_import(FileId::new(3), &qn("com.acme.Foo"));
        assert!(matches!(result, Err(WriteError::FileNotFound(f)) if f == FileId::new(3)));
        assert_eq!(table.revision(FileId::new(3)), None);
    }

    #[test]
    fn test_new_file_starts_at_default_revision() {
        let mut table = table_with(FileImports::new(qn("app")));
        assert_eq!(table.revision(FileId::new(0)), Some(Revision::default()));

        table.set_file(FileId::new(0), FileImports::new(qn("app")));
        assert!(table.revision(FileId::new(0)) > Some(Revision::default()));
    }
}
