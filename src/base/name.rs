//! Fully-qualified, dot-separated declaration names.

use smol_str::SmolStr;
use std::fmt;
use std::sync::Arc;

/// A fully-qualified name such as `com.acme.util.Foo`.
///
/// Stored as its segments. Equality, ordering and hashing are over the
/// segment sequence, which makes `QualifiedName` usable as a dedup key.
/// The root (empty) name has no segments.
#[derive(Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Default)]
pub struct QualifiedName {
    segments: Arc<[SmolStr]>,
}

/// Why a string could not be parsed as a [`QualifiedName`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    #[error("empty segment in qualified name '{0}'")]
    EmptySegment(String),
    #[error("'{segment}' is not an identifier (in '{name}')")]
    NotAnIdentifier { name: String, segment: String },
}

impl QualifiedName {
    /// The root name (no segments).
    pub fn root() -> Self {
        Self::default()
    }

    /// Parse a dot-separated name, validating every segment as an identifier.
    ///
    /// The empty string parses to the root name.
    pub fn parse(text: &str) -> Result<Self, NameError> {
        if text.is_empty() {
            return Ok(Self::root());
        }

        let mut segments = Vec::new();
        for segment in text.split('.') {
            if segment.is_empty() {
                return Err(NameError::EmptySegment(text.to_string()));
            }
            if !is_identifier(segment) {
                return Err(NameError::NotAnIdentifier {
                    name: text.to_string(),
                    segment: segment.to_string(),
                });
            }
            segments.push(SmolStr::new(segment));
        }

        Ok(Self { segments: segments.into() })
    }

    /// Build a name from already-split segments.
    pub fn from_segments<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    pub fn segments(&self) -> &[SmolStr] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The last segment, or `None` for the root name.
    pub fn short_name(&self) -> Option<&str> {
        self.segments.last().map(SmolStr::as_str)
    }

    /// The enclosing name (`com.acme` for `com.acme.Foo`).
    ///
    /// A single-segment name has the root as its parent; the root has none.
    pub fn parent(&self) -> Option<QualifiedName> {
        let (_, init) = self.segments.split_last()?;
        Some(Self { segments: init.into() })
    }

    /// Append a segment.
    pub fn child(&self, segment: impl Into<SmolStr>) -> QualifiedName {
        let mut segments = self.segments.to_vec();
        segments.push(segment.into());
        Self { segments: segments.into() }
    }

    /// Render with `.` separators.
    pub fn as_dotted(&self) -> String {
        self.segments.join(".")
    }
}

impl fmt::Debug for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QualifiedName({})", self.as_dotted())
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_dotted())
    }
}

impl std::str::FromStr for QualifiedName {
    type Err = NameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Whether `text` is a single identifier (XID start or `_`, then XID continue).
pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first == '_' || unicode_ident::is_xid_start(first) => {
            chars.all(unicode_ident::is_xid_continue)
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qn(s: &str) -> QualifiedName {
        QualifiedName::parse(s).unwrap()
    }

    #[test]
    fn test_parse_and_display() {
        let name = qn("com.acme.util.Foo");
        assert_eq!(name.segments().len(), 4);
        assert_eq!(name.to_string(), "com.acme.util.Foo");
        assert_eq!(name.short_name(), Some("Foo"));
    }

    #[test]
    fn test_equality_by_segments() {
        let a = qn("pkg.a.map");
        let b = QualifiedName::from_segments(["pkg", "a", "map"]);
        assert_eq!(a, b);
        assert_ne!(a, qn("pkg.b.map"));
    }

    #[test]
    fn test_parent_chain() {
        let name = qn("pkg.Foo");
        assert_eq!(name.parent(), Some(qn("pkg")));
        assert_eq!(qn("pkg").parent(), Some(QualifiedName::root()));
        assert_eq!(QualifiedName::root().parent(), None);
    }

    #[test]
    fn test_child() {
        assert_eq!(qn("pkg").child("Foo"), qn("pkg.Foo"));
        assert_eq!(QualifiedName::root().child("Foo"), qn("Foo"));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            QualifiedName::parse("pkg..Foo"),
            Err(NameError::EmptySegment(_))
        ));
        assert!(matches!(
            QualifiedName::parse("pkg.1Foo"),
            Err(NameError::NotAnIdentifier { .. })
        ));
        assert!(QualifiedName::parse("").unwrap().is_root());
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("map"));
        assert!(is_identifier("_tmp9"));
        assert!(is_identifier("Größe"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("a-b"));
        assert!(!is_identifier("9lives"));
    }
}
