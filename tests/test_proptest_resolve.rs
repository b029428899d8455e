//! Property-based tests for candidate resolution.
//!
//! Generates arbitrary declaration sets spread over the four indices plus an
//! arbitrary import state, then checks the invariants every suggestion set
//! must satisfy: no duplicates, every name needs an import, inaccessible
//! names never leak through another index, and resolution is deterministic.
#![cfg(feature = "proptest")]

use proptest::prelude::*;
use std::collections::HashSet;

use autoimport::base::{FileId, ModuleId, QualifiedName, TextRange, TextSize};
use autoimport::hir::{
    AccessibilityFilter, CandidateResolver, Declaration, DeclarationTable, FileImports,
    ImportOracle, ImportTable, IndexContext, InvariantPolicy, Origin, ReferenceSite,
    ResolveConfig, SourceFile, Visibility,
};

// ============================================================================
// PROPTEST STRATEGIES
// ============================================================================

/// Packages drawn from a small pool so names collide across indices.
fn arb_package() -> impl Strategy<Value = QualifiedName> {
    prop_oneof![
        Just("app"),
        Just("com.acme"),
        Just("com.acme.util"),
        Just("pkg.a"),
        Just("pkg.b"),
    ]
    .prop_map(|p| QualifiedName::parse(p).unwrap())
}

fn arb_visibility() -> impl Strategy<Value = Visibility> {
    prop_oneof![
        Just(Visibility::Public),
        Just(Visibility::Internal),
        Just(Visibility::Protected),
        Just(Visibility::Private),
    ]
}

fn arb_module() -> impl Strategy<Value = Option<ModuleId>> {
    prop_oneof![Just(None), (0u32..3).prop_map(|m| Some(ModuleId::new(m)))]
}

/// A declaration named `Foo` or `map` in some package.
fn arb_decl(origin: Origin) -> impl Strategy<Value = Declaration> {
    (arb_package(), prop_oneof![Just("Foo"), Just("map")], arb_visibility(), arb_module()).prop_map(
        move |(package, short, visibility, module)| {
            let decl = Declaration::source_type(package.child(short), visibility).with_origin(origin);
            match module {
                Some(m) => decl.in_module(m),
                None => decl,
            }
        },
    )
}

fn arb_table(origin: Origin) -> impl Strategy<Value = DeclarationTable> {
    prop::collection::vec(arb_decl(origin), 0..6).prop_map(|decls| {
        let mut table = DeclarationTable::new();
        table.add_library(decls);
        table
    })
}

fn arb_imports() -> impl Strategy<Value = ImportTable> {
    (
        prop::collection::vec(arb_package(), 0..2),
        prop::collection::vec((arb_package(), prop_oneof![Just("Foo"), Just("map")]), 0..3),
    )
        .prop_map(|(wildcards, explicit)| {
            let mut file = FileImports::new(QualifiedName::parse("app").unwrap());
            for package in wildcards {
                file.add_wildcard(package);
            }
            for (package, short) in explicit {
                file.add_import(package.child(short));
            }
            let mut table = ImportTable::new();
            table.set_file(FileId::new(0), file);
            table
        })
}

fn site(name: &str) -> ReferenceSite {
    ReferenceSite::new(
        name,
        SourceFile::new(FileId::new(0), ModuleId::new(0)),
        TextRange::empty(TextSize::from(0)),
    )
}

// ============================================================================
// PROPERTIES
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn suggestions_are_unique_needed_and_stable(
        host in arb_table(Origin::HostPlatform),
        functions in arb_table(Origin::SourceLanguage),
        extensions in arb_table(Origin::SourceLanguage),
        imports in arb_imports(),
        short in prop_oneof![Just("Foo"), Just("map")],
    ) {
        let ctx = IndexContext::empty()
            .with_host_types(&host)
            .with_top_level_functions(&functions)
            .with_extension_functions(&extensions);
        let config = ResolveConfig::default().with_invariant_policy(InvariantPolicy::Conservative);
        let resolver = CandidateResolver::new(ctx, &imports).with_config(config);
        let site = site(short);

        let first = resolver.resolve(&site);
        let second = resolver.resolve(&site);
        prop_assert_eq!(&first, &second);

        let unique: HashSet<_> = first.iter().collect();
        prop_assert_eq!(unique.len(), first.len());

        for name in &first {
            prop_assert!(imports.needs_import(name, &site));
            prop_assert_eq!(name.short_name(), Some(short));
        }
    }

    #[test]
    fn inaccessible_names_never_leak(
        host in arb_table(Origin::HostPlatform),
        functions in arb_table(Origin::SourceLanguage),
        short in prop_oneof![Just("Foo"), Just("map")],
    ) {
        let imports = ImportTable::new();
        let ctx = IndexContext::empty()
            .with_host_types(&host)
            .with_top_level_functions(&functions);
        let resolver = CandidateResolver::new(ctx, &imports);
        let site = site(short);
        let filter = AccessibilityFilter::for_site(&site);

        let result = resolver.resolve(&site);

        for decl in host.lookup_short(short).into_iter().chain(functions.lookup_short(short)) {
            if filter.is_accessible(decl) == Ok(false) {
                prop_assert!(!result.contains(decl.qualified_name()));
            }
        }
    }

    #[test]
    fn parallel_queries_match_sequential(
        host in arb_table(Origin::HostPlatform),
        functions in arb_table(Origin::SourceLanguage),
        short in prop_oneof![Just("Foo"), Just("map")],
    ) {
        let imports = ImportTable::new();
        let ctx = IndexContext::empty()
            .with_host_types(&host)
            .with_top_level_functions(&functions);
        let site = site(short);

        let sequential = CandidateResolver::new(ctx.clone(), &imports).resolve(&site);
        let parallel = CandidateResolver::new(ctx, &imports)
            .with_config(ResolveConfig::default().with_parallel_queries(true))
            .resolve(&site);

        prop_assert_eq!(sequential, parallel);
    }
}
