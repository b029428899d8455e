//! Candidate resolution — turning an unresolved short name into import suggestions.
//!
//! # Pipeline
//!
//! 1. **Type query** - the host-platform type index for host-interop modules,
//!    the source-language type index for pure-source modules
//! 2. **Function queries** - top-level functions, then extension functions
//!    (matched on simple name only; receiver applicability is left to the
//!    type checker that raised the diagnostic)
//! 3. **Accessibility** - per-origin visibility rules, see [`AccessibilityFilter`]
//! 4. **Union** - deduplicated by [`QualifiedName`], first occurrence wins
//! 5. **Necessity** - drop names already resolvable without a new import
//!
//! A failing index contributes nothing; it never aborts the pipeline.

use indexmap::IndexSet;
use rustc_hash::FxHashSet;

use super::decl::Declaration;
use super::imports::{ImportNecessityFilter, ImportOracle};
use super::index::{IndexContext, IndexKind};
use super::input::{FileKind, ReferenceSite, TargetKind};
use super::visibility::AccessibilityFilter;
use crate::base::QualifiedName;
use crate::error::ResolveError;

// ============================================================================
// CONFIGURATION
// ============================================================================

/// What to do when an index hands back a declaration that breaks an internal invariant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InvariantPolicy {
    /// Panic. The default in debug builds.
    Panic,
    /// Treat the declaration as inaccessible and log the anomaly. The default in release builds.
    Conservative,
}

impl Default for InvariantPolicy {
    fn default() -> Self {
        if cfg!(debug_assertions) {
            InvariantPolicy::Panic
        } else {
            InvariantPolicy::Conservative
        }
    }
}

/// Resolver settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ResolveConfig {
    pub invariant_policy: InvariantPolicy,
    /// Run the three index queries on the rayon pool. Output is identical either way.
    pub parallel_queries: bool,
}

impl ResolveConfig {
    pub fn with_invariant_policy(mut self, policy: InvariantPolicy) -> Self {
        self.invariant_policy = policy;
        self
    }

    pub fn with_parallel_queries(mut self, parallel: bool) -> Self {
        self.parallel_queries = parallel;
        self
    }
}

// ============================================================================
// SUGGESTION SET
// ============================================================================

/// Deduplicated, deterministically ordered candidate names for one reference.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SuggestionSet {
    names: Vec<QualifiedName>,
}

impl SuggestionSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// The headline suggestion.
    pub fn first(&self) -> Option<&QualifiedName> {
        self.names.first()
    }

    pub fn contains(&self, name: &QualifiedName) -> bool {
        self.names.contains(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QualifiedName> {
        self.names.iter()
    }

    pub fn as_slice(&self) -> &[QualifiedName] {
        &self.names
    }
}

impl FromIterator<QualifiedName> for SuggestionSet {
    fn from_iter<I: IntoIterator<Item = QualifiedName>>(iter: I) -> Self {
        let unique: IndexSet<QualifiedName> = iter.into_iter().collect();
        Self {
            names: unique.into_iter().collect(),
        }
    }
}

impl<'s> IntoIterator for &'s SuggestionSet {
    type Item = &'s QualifiedName;
    type IntoIter = std::slice::Iter<'s, QualifiedName>;

    fn into_iter(self) -> Self::IntoIter {
        self.names.iter()
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Computes the [`SuggestionSet`] for a reference site.
pub struct CandidateResolver<'a> {
    indices: IndexContext<'a>,
    oracle: &'a dyn ImportOracle,
    config: ResolveConfig,
}

impl<'a> CandidateResolver<'a> {
    pub fn new(indices: IndexContext<'a>, oracle: &'a dyn ImportOracle) -> Self {
        Self {
            indices,
            oracle,
            config: ResolveConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ResolveConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ResolveConfig {
        &self.config
    }

    /// Resolve `site` into the names that could be imported for it.
    pub fn resolve(&self, site: &ReferenceSite) -> SuggestionSet {
        if site.file.kind != FileKind::Source {
            tracing::debug!(file = %site.file.id, "not a source file, no import suggestions");
            return SuggestionSet::empty();
        }
        if site.name.is_empty() {
            return SuggestionSet::empty();
        }

        let name = site.name.as_str();
        let type_index = match site.target() {
            TargetKind::HostInterop => IndexKind::HostTypes,
            TargetKind::PureSource => IndexKind::SourceTypes,
        };

        let indices = &self.indices;
        let (types, (functions, extensions)) = if self.config.parallel_queries {
            rayon::join(
                || query(indices, type_index, name),
                || {
                    rayon::join(
                        || query(indices, IndexKind::TopLevelFunctions, name),
                        || query(indices, IndexKind::ExtensionFunctions, name),
                    )
                },
            )
        } else {
            (
                query(indices, type_index, name),
                (
                    query(indices, IndexKind::TopLevelFunctions, name),
                    query(indices, IndexKind::ExtensionFunctions, name),
                ),
            )
        };

        let accessibility = AccessibilityFilter::for_site(site);
        let mut accepted: IndexSet<QualifiedName> = IndexSet::new();
        let mut rejected: FxHashSet<QualifiedName> = FxHashSet::default();

        for decl in types.iter().chain(&functions).chain(&extensions) {
            if self.is_accessible(&accessibility, decl) {
                accepted.insert(decl.qualified_name().clone());
            } else {
                tracing::trace!(
                    name = %decl.qualified_name(),
                    kind = decl.kind_name(),
                    "inaccessible declaration"
                );
                rejected.insert(decl.qualified_name().clone());
            }
        }

        // An inaccessible declaration hides its name even if another index offered it.
        accepted.retain(|name| !rejected.contains(name));

        let necessity = ImportNecessityFilter::new(self.oracle);
        accepted.retain(|name| necessity.needs_import(name, site));

        tracing::debug!(
            reference = %site.name,
            types = types.len(),
            functions = functions.len(),
            extensions = extensions.len(),
            suggestions = accepted.len(),
            "resolved import candidates"
        );

        accepted.into_iter().collect()
    }

    fn is_accessible(&self, filter: &AccessibilityFilter, decl: &Declaration) -> bool {
        match filter.is_accessible(decl) {
            Ok(accessible) => accessible,
            Err(err) => self.invariant_violated(err),
        }
    }

    fn invariant_violated(&self, err: ResolveError) -> bool {
        match self.config.invariant_policy {
            InvariantPolicy::Panic => panic!("internal invariant violated: {err}"),
            InvariantPolicy::Conservative => {
                tracing::error!(error = %err, "internal invariant violated; treating declaration as inaccessible");
                false
            }
        }
    }
}

/// Query one index, degrading a failure to an empty result.
fn query(indices: &IndexContext<'_>, kind: IndexKind, name: &str) -> Vec<Declaration> {
    match indices.index(kind).query_by_short_name(name, &indices.scope) {
        Ok(mut decls) => {
            if kind == IndexKind::ExtensionFunctions {
                decls.retain(|d| d.short_name() == Some(name));
            }
            tracing::trace!(index = %kind, reference = name, hits = decls.len(), "index query");
            decls
        }
        Err(err) => {
            tracing::warn!(index = %kind, reference = name, error = %err, "index query failed; treating as empty");
            Vec::new()
        }
    }
}
