//! Declaration indices queried by short name.
//!
//! The project-wide indexer is an external collaborator; this module only
//! fixes the query interface ([`DeclarationIndex`]) and the context object
//! that carries the four index handles through resolution ([`IndexContext`]).
//!
//! [`DeclarationTable`] is an in-memory implementation, keyed by short name
//! and maintained per file, for hosts without an indexer of their own.

use std::fmt;

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::decl::Declaration;
use super::input::SearchScope;
use crate::base::FileId;
use crate::error::IndexError;

/// A provider of declarations by short name.
pub trait DeclarationIndex: Send + Sync {
    /// All declarations named `name` that `scope` admits, in a stable order.
    fn query_by_short_name(
        &self,
        name: &str,
        scope: &SearchScope,
    ) -> Result<Vec<Declaration>, IndexError>;
}

/// Which of the logical indices a query went to. Used for logging.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum IndexKind {
    HostTypes,
    SourceTypes,
    TopLevelFunctions,
    ExtensionFunctions,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            IndexKind::HostTypes => "host-types",
            IndexKind::SourceTypes => "source-types",
            IndexKind::TopLevelFunctions => "top-level-functions",
            IndexKind::ExtensionFunctions => "extension-functions",
        })
    }
}

/// An index that never has anything.
#[derive(Clone, Copy, Debug, Default)]
pub struct EmptyIndex;

impl DeclarationIndex for EmptyIndex {
    fn query_by_short_name(&self, _: &str, _: &SearchScope) -> Result<Vec<Declaration>, IndexError> {
        Ok(Vec::new())
    }
}

static EMPTY: EmptyIndex = EmptyIndex;

/// Index handles plus the search scope, threaded explicitly through resolution.
#[derive(Clone)]
pub struct IndexContext<'a> {
    pub host_types: &'a dyn DeclarationIndex,
    pub source_types: &'a dyn DeclarationIndex,
    pub top_level_functions: &'a dyn DeclarationIndex,
    pub extension_functions: &'a dyn DeclarationIndex,
    pub scope: SearchScope,
}

impl<'a> IndexContext<'a> {
    /// A context where every index is empty.
    pub fn empty() -> Self {
        Self {
            host_types: &EMPTY,
            source_types: &EMPTY,
            top_level_functions: &EMPTY,
            extension_functions: &EMPTY,
            scope: SearchScope::WholeProject,
        }
    }

    pub fn with_host_types(mut self, index: &'a dyn DeclarationIndex) -> Self {
        self.host_types = index;
        self
    }

    pub fn with_source_types(mut self, index: &'a dyn DeclarationIndex) -> Self {
        self.source_types = index;
        self
    }

    pub fn with_top_level_functions(mut self, index: &'a dyn DeclarationIndex) -> Self {
        self.top_level_functions = index;
        self
    }

    pub fn with_extension_functions(mut self, index: &'a dyn DeclarationIndex) -> Self {
        self.extension_functions = index;
        self
    }

    pub fn with_scope(mut self, scope: SearchScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn index(&self, kind: IndexKind) -> &'a dyn DeclarationIndex {
        match kind {
            IndexKind::HostTypes => self.host_types,
            IndexKind::SourceTypes => self.source_types,
            IndexKind::TopLevelFunctions => self.top_level_functions,
            IndexKind::ExtensionFunctions => self.extension_functions,
        }
    }
}

impl fmt::Debug for IndexContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexContext")
            .field("scope", &self.scope)
            .finish_non_exhaustive()
    }
}

// ============================================================================
// DECLARATION TABLE
// ============================================================================

/// Index into the entries vector.
type EntryIdx = usize;

#[derive(Clone, Debug)]
struct Entry {
    /// `None` for library declarations that have no source file.
    file: Option<FileId>,
    decl: Declaration,
}

/// An in-memory declaration index keyed by short name.
///
/// Entries are stored in a single vector and referenced by index from the
/// lookup maps, so queries return declarations in insertion order.
#[derive(Clone, Debug, Default)]
pub struct DeclarationTable {
    entries: Vec<Entry>,
    /// Short name -> entry indices.
    by_short_name: FxHashMap<SmolStr, Vec<EntryIdx>>,
    /// File -> entry indices.
    by_file: FxHashMap<FileId, Vec<EntryIdx>>,
}

impl DeclarationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the declarations contributed by `file`.
    pub fn add_file(&mut self, file: FileId, decls: Vec<Declaration>) {
        self.remove_file(file);
        let indices = self.insert_all(Some(file), decls);
        self.by_file.insert(file, indices);
    }

    /// Add declarations that come from a library rather than a project file.
    pub fn add_library(&mut self, decls: Vec<Declaration>) {
        self.insert_all(None, decls);
    }

    fn insert_all(&mut self, file: Option<FileId>, decls: Vec<Declaration>) -> Vec<EntryIdx> {
        let mut indices = Vec::with_capacity(decls.len());
        for decl in decls {
            let Some(short) = decl.short_name().map(SmolStr::new) else {
                tracing::debug!("skipping declaration with root name");
                continue;
            };
            let idx = self.entries.len();
            self.by_short_name.entry(short).or_default().push(idx);
            indices.push(idx);
            self.entries.push(Entry { file, decl });
        }
        indices
    }

    /// Remove all declarations of a file.
    ///
    /// Entries stay in the vector so other indices remain valid; they are
    /// only unlinked from the lookup maps.
    pub fn remove_file(&mut self, file: FileId) {
        let Some(indices) = self.by_file.remove(&file) else {
            return;
        };
        for idx in indices {
            let Some(short) = self.entries.get(idx).and_then(|e| e.decl.short_name()) else {
                continue;
            };
            if let Some(list) = self.by_short_name.get_mut(short) {
                list.retain(|&i| i != idx);
                if list.is_empty() {
                    self.by_short_name.remove(short);
                }
            }
        }
    }

    /// All live declarations with the given short name, regardless of scope.
    pub fn lookup_short(&self, name: &str) -> Vec<&Declaration> {
        self.by_short_name
            .get(name)
            .map(|indices| indices.iter().filter_map(|&i| self.entries.get(i)).map(|e| &e.decl).collect())
            .unwrap_or_default()
    }

    /// Number of live declarations.
    pub fn len(&self) -> usize {
        self.by_short_name.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_short_name.is_empty()
    }
}

impl DeclarationIndex for DeclarationTable {
    fn query_by_short_name(
        &self,
        name: &str,
        scope: &SearchScope,
    ) -> Result<Vec<Declaration>, IndexError> {
        let Some(indices) = self.by_short_name.get(name) else {
            return Ok(Vec::new());
        };
        Ok(indices
            .iter()
            .filter_map(|&i| self.entries.get(i))
            .filter(|e| scope.contains(e.file, e.decl.module()))
            .map(|e| e.decl.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::{ModuleId, QualifiedName};
    use crate::hir::decl::Visibility;

    fn func(name: &str) -> Declaration {
        Declaration::top_level_function(QualifiedName::parse(name).unwrap(), Visibility::Public)
    }

    #[test]
    fn test_table_lookup_by_short_name() {
        let mut table = DeclarationTable::new();
        table.add_file(FileId::new(0), vec![func("pkg.a.map"), func("pkg.a.filter")]);
        table.add_file(FileId::new(1), vec![func("pkg.b.map")]);

        let found = table
            .query_by_short_name("map", &SearchScope::WholeProject)
            .unwrap();
        let names: Vec<_> = found.iter().map(|d| d.qualified_name().to_string()).collect();
        assert_eq!(names, vec!["pkg.a.map", "pkg.b.map"]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn test_table_remove_file() {
        let mut table = DeclarationTable::new();
        table.add_file(FileId::new(0), vec![func("pkg.a.map")]);
        table.add_file(FileId::new(1), vec![func("pkg.b.map")]);

        table.remove_file(FileId::new(0));

        let found = table.lookup_short("map");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].qualified_name().to_string(), "pkg.b.map");
    }

    #[test]
    fn test_table_re_add_replaces() {
        let mut table = DeclarationTable::new();
        table.add_file(FileId::new(0), vec![func("pkg.a.map")]);
        table.add_file(FileId::new(0), vec![func("pkg.a.map")]);
        assert_eq!(table.lookup_short("map").len(), 1);
    }

    #[test]
    fn test_table_respects_scope() {
        let mut table = DeclarationTable::new();
        table.add_file(FileId::new(0), vec![func("pkg.a.map").in_module(ModuleId::new(1))]);
        table.add_library(vec![func("lib.map")]);

        let in_file = table
            .query_by_short_name("map", &SearchScope::files([FileId::new(0)]))
            .unwrap();
        assert_eq!(in_file.len(), 1);

        let everywhere = table
            .query_by_short_name("map", &SearchScope::WholeProject)
            .unwrap();
        assert_eq!(everywhere.len(), 2);
    }

    #[test]
    fn test_empty_context() {
        let ctx = IndexContext::empty();
        for kind in [
            IndexKind::HostTypes,
            IndexKind::SourceTypes,
            IndexKind::TopLevelFunctions,
            IndexKind::ExtensionFunctions,
        ] {
            assert!(ctx.index(kind).query_by_short_name("Foo", &ctx.scope).unwrap().is_empty());
        }
    }
}
