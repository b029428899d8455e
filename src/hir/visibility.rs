//! Accessibility of candidate declarations from a reference site.
//!
//! Host-platform declarations are accessible when `public` or `protected`
//! (a protected host type is still importable). Source-language declarations
//! are accessible when `public` or `internal`; `internal` additionally
//! requires the declaration's module, when known, to be the site's module.

use super::decl::{Declaration, Origin, Visibility};
use super::input::ReferenceSite;
use crate::base::ModuleId;
use crate::error::ResolveError;

/// Decides whether a declaration is visible from one reference site.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AccessibilityFilter {
    site_module: ModuleId,
}

impl AccessibilityFilter {
    pub fn new(site_module: ModuleId) -> Self {
        Self { site_module }
    }

    pub fn for_site(site: &ReferenceSite) -> Self {
        Self::new(site.module())
    }

    /// Whether `decl` may be suggested at the site.
    ///
    /// A source-language declaration without visibility is an indexer bug and
    /// is reported as [`ResolveError::MissingVisibility`] rather than guessed.
    pub fn is_accessible(&self, decl: &Declaration) -> Result<bool, ResolveError> {
        match decl.origin() {
            Origin::HostPlatform => Ok(matches!(
                decl.visibility(),
                Some(Visibility::Public | Visibility::Protected)
            )),
            Origin::SourceLanguage => {
                let visibility = decl.visibility().ok_or_else(|| ResolveError::MissingVisibility {
                    name: decl.qualified_name().clone(),
                })?;
                Ok(match visibility {
                    Visibility::Public => true,
                    Visibility::Internal => decl.module().is_none_or(|m| m == self.site_module),
                    Visibility::Protected | Visibility::Private => false,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::base::QualifiedName;
    use rstest::rstest;

    fn qn(s: &str) -> QualifiedName {
        QualifiedName::parse(s).unwrap()
    }

    #[rstest]
    #[case(Visibility::Public, true)]
    #[case(Visibility::Protected, true)]
    #[case(Visibility::Internal, false)]
    #[case(Visibility::Private, false)]
    fn test_host_rules(#[case] visibility: Visibility, #[case] expected: bool) {
        let filter = AccessibilityFilter::new(ModuleId::new(0));
        let decl = Declaration::host_type(qn("com.acme.Foo"), visibility);
        assert_eq!(filter.is_accessible(&decl), Ok(expected));
    }

    #[rstest]
    #[case(Visibility::Public, true)]
    #[case(Visibility::Internal, true)]
    #[case(Visibility::Protected, false)]
    #[case(Visibility::Private, false)]
    fn test_source_rules(#[case] visibility: Visibility, #[case] expected: bool) {
        let filter = AccessibilityFilter::new(ModuleId::new(0));
        let decl = Declaration::top_level_function(qn("pkg.map"), visibility);
        assert_eq!(filter.is_accessible(&decl), Ok(expected));
    }

    #[test]
    fn test_internal_from_other_module() {
        let filter = AccessibilityFilter::new(ModuleId::new(0));
        let same = Declaration::top_level_function(qn("pkg.b.map"), Visibility::Internal)
            .in_module(ModuleId::new(0));
        let other = Declaration::top_level_function(qn("pkg.b.map"), Visibility::Internal)
            .in_module(ModuleId::new(1));

        assert_eq!(filter.is_accessible(&same), Ok(true));
        assert_eq!(filter.is_accessible(&other), Ok(false));
    }

    #[test]
    fn test_missing_visibility() {
        let filter = AccessibilityFilter::new(ModuleId::new(0));

        let source = Declaration::source_type(qn("pkg.Foo"), Visibility::Public).without_visibility();
        assert_eq!(
            filter.is_accessible(&source),
            Err(ResolveError::MissingVisibility { name: qn("pkg.Foo") })
        );

        // Host declarations without modifiers are simply not public.
        let host = Declaration::host_type(qn("com.Foo"), Visibility::Public).without_visibility();
        assert_eq!(filter.is_accessible(&host), Ok(false));
    }
}
