//! Builds import fixes from unresolved-reference diagnostics.

use super::import_fix::{FixConfig, ImportSuggestionFix};
use super::registry::{FixRegistry, OccurrenceKey};
use crate::hir::{CandidateResolver, Diagnostic, FlaggedNode, ImportOracle, IndexContext, ReferenceSite};

/// Decides whether a diagnostic gets an [`ImportSuggestionFix`], and builds it.
pub struct FixFactory<'a> {
    resolver: CandidateResolver<'a>,
    config: FixConfig,
    registry: Option<&'a FixRegistry>,
}

impl<'a> FixFactory<'a> {
    pub fn new(indices: IndexContext<'a>, oracle: &'a dyn ImportOracle) -> Self {
        let config = FixConfig::default();
        Self {
            resolver: CandidateResolver::new(indices, oracle).with_config(config.resolve),
            config,
            registry: None,
        }
    }

    pub fn with_config(mut self, config: FixConfig) -> Self {
        self.resolver = self.resolver.with_config(config.resolve);
        self.config = config;
        self
    }

    /// Register every fix built here, so later passes supersede it.
    pub fn with_registry(mut self, registry: &'a FixRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Build a fix for `diagnostic`, if its flagged node is a bare identifier reference.
    ///
    /// The returned fix may be unavailable (no candidates); it is still
    /// returned so the caller can tell "nothing to import" from "not applicable".
    pub fn try_create(&self, diagnostic: &Diagnostic) -> Option<ImportSuggestionFix> {
        let (name, range) = match &diagnostic.node {
            FlaggedNode::SimpleName { name, range } => (name.clone(), *range),
            FlaggedNode::ArrayAccess { .. }
            | FlaggedNode::QualifiedExpression { .. }
            | FlaggedNode::Call { .. }
            | FlaggedNode::Operator { .. }
            | FlaggedNode::Other { .. } => {
                tracing::trace!(node = ?diagnostic.node, "not a bare identifier reference, no import fix");
                return None;
            }
        };

        let site = ReferenceSite::new(name, diagnostic.file, range);
        let fix = ImportSuggestionFix::compute(site, &self.resolver, self.config.mode);

        Some(match self.registry {
            Some(registry) => fix.with_ticket(registry.register(OccurrenceKey::new(diagnostic.file.id, range))),
            None => fix,
        })
    }
}
