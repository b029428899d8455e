//! Declarations returned by the short-name indices.

use smol_str::SmolStr;

use crate::base::{ModuleId, QualifiedName};

/// Declared visibility of a declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Internal,
    Protected,
    Private,
}

/// Which world a declaration comes from.
///
/// The two origins have different default-visibility semantics, so the
/// accessibility rules are chosen per origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Declared by the host platform (its class files / type symbol table).
    HostPlatform,
    /// Declared in the project's source language.
    SourceLanguage,
}

/// Data shared by every declaration kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DeclInfo {
    pub name: QualifiedName,
    /// `None` when the indexer has no semantic model for the declaration.
    pub visibility: Option<Visibility>,
    pub origin: Origin,
    /// Module the declaration lives in, when the indexer knows it.
    pub module: Option<ModuleId>,
}

/// A resolvable named entity.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Declaration {
    Type(DeclInfo),
    TopLevelFunction(DeclInfo),
    /// Matched by simple name; `receiver` is only meaningful to the index.
    ExtensionFunction { info: DeclInfo, receiver: SmolStr },
}

impl Declaration {
    /// A public-by-default host-platform type, e.g. a library class.
    pub fn host_type(name: QualifiedName, visibility: Visibility) -> Self {
        Declaration::Type(DeclInfo {
            name,
            visibility: Some(visibility),
            origin: Origin::HostPlatform,
            module: None,
        })
    }

    pub fn source_type(name: QualifiedName, visibility: Visibility) -> Self {
        Declaration::Type(DeclInfo {
            name,
            visibility: Some(visibility),
            origin: Origin::SourceLanguage,
            module: None,
        })
    }

    pub fn top_level_function(name: QualifiedName, visibility: Visibility) -> Self {
        Declaration::TopLevelFunction(DeclInfo {
            name,
            visibility: Some(visibility),
            origin: Origin::SourceLanguage,
            module: None,
        })
    }

    pub fn extension_function(
        name: QualifiedName,
        receiver: impl Into<SmolStr>,
        visibility: Visibility,
    ) -> Self {
        Declaration::ExtensionFunction {
            info: DeclInfo {
                name,
                visibility: Some(visibility),
                origin: Origin::SourceLanguage,
                module: None,
            },
            receiver: receiver.into(),
        }
    }

    /// Place the declaration in a module.
    pub fn in_module(mut self, module: ModuleId) -> Self {
        self.info_mut().module = Some(module);
        self
    }

    /// Override the origin (a source type seen through the host index, say).
    pub fn with_origin(mut self, origin: Origin) -> Self {
        self.info_mut().origin = origin;
        self
    }

    /// Drop the visibility, as an indexer without a semantic model would report it.
    pub fn without_visibility(mut self) -> Self {
        self.info_mut().visibility = None;
        self
    }

    pub fn info(&self) -> &DeclInfo {
        match self {
            Declaration::Type(info) | Declaration::TopLevelFunction(info) => info,
            Declaration::ExtensionFunction { info, .. } => info,
        }
    }

    fn info_mut(&mut self) -> &mut DeclInfo {
        match self {
            Declaration::Type(info) | Declaration::TopLevelFunction(info) => info,
            Declaration::ExtensionFunction { info, .. } => info,
        }
    }

    pub fn qualified_name(&self) -> &QualifiedName {
        &self.info().name
    }

    /// Simple name the short-name indices key on.
    pub fn short_name(&self) -> Option<&str> {
        self.info().name.short_name()
    }

    pub fn visibility(&self) -> Option<Visibility> {
        self.info().visibility
    }

    pub fn origin(&self) -> Origin {
        self.info().origin
    }

    pub fn module(&self) -> Option<ModuleId> {
        self.info().module
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Declaration::Type(_) => "type",
            Declaration::TopLevelFunction(_) => "top-level function",
            Declaration::ExtensionFunction { .. } => "extension function",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qn(s: &str) -> QualifiedName {
        QualifiedName::parse(s).unwrap()
    }

    #[test]
    fn test_constructors_set_origin() {
        let host = Declaration::host_type(qn("java.util.List"), Visibility::Public);
        assert_eq!(host.origin(), Origin::HostPlatform);

        let func = Declaration::top_level_function(qn("pkg.a.map"), Visibility::Public);
        assert_eq!(func.origin(), Origin::SourceLanguage);
        assert_eq!(func.kind_name(), "top-level function");
    }

    #[test]
    fn test_extension_keeps_receiver() {
        let ext = Declaration::extension_function(qn("pkg.ext.size"), "String", Visibility::Internal)
            .in_module(ModuleId::new(2));
        assert_eq!(ext.short_name(), Some("size"));
        assert_eq!(ext.module(), Some(ModuleId::new(2)));
        match ext {
            Declaration::ExtensionFunction { receiver, .. } => assert_eq!(receiver, "String"),
            other => panic!("unexpected declaration {other:?}"),
        }
    }

    #[test]
    fn test_without_visibility() {
        let decl = Declaration::source_type(qn("pkg.Foo"), Visibility::Public).without_visibility();
        assert_eq!(decl.visibility(), None);
    }
}
