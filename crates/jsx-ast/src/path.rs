//! Qualified module paths.

use std::fmt;

use smol_str::SmolStr;

/// A dotted path of name segments, e.g. `Foo.Bar.make`.
///
/// Always non-empty. Sibling entry points are derived by replacing or
/// appending the final segment (`Foo.make` ↔ `Foo.props`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QualifiedPath {
    segments: Vec<SmolStr>,
}

impl QualifiedPath {
    /// Creates a path from its segments. Panics on an empty segment list.
    pub fn new(segments: Vec<SmolStr>) -> Self {
        assert!(!segments.is_empty(), "a qualified path has at least one segment");
        Self { segments }
    }

    /// Creates a single-segment path.
    pub fn single(name: impl Into<SmolStr>) -> Self {
        Self {
            segments: vec![name.into()],
        }
    }

    /// Parses a dotted string like `"ReactDOMRe.createElement"`.
    pub fn dotted(path: &str) -> Self {
        Self::new(path.split('.').map(SmolStr::new).collect())
    }

    /// The path segments, in order.
    pub fn segments(&self) -> &[SmolStr] {
        &self.segments
    }

    /// The final segment.
    pub fn last(&self) -> &SmolStr {
        self.segments.last().expect("paths are non-empty")
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// True for an unqualified single-segment path.
    pub fn is_single(&self) -> bool {
        self.segments.len() == 1
    }

    /// Returns a copy with the final segment replaced.
    pub fn with_last(&self, segment: impl Into<SmolStr>) -> Self {
        let mut segments = self.segments.clone();
        *segments.last_mut().expect("paths are non-empty") = segment.into();
        Self { segments }
    }

    /// Returns a copy with a segment appended.
    pub fn appended(&self, segment: impl Into<SmolStr>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self { segments }
    }
}

impl fmt::Display for QualifiedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dotted_roundtrip() {
        let path = QualifiedPath::dotted("Foo.Bar.make");
        assert_eq!(path.len(), 3);
        assert_eq!(path.last(), "make");
        assert_eq!(path.to_string(), "Foo.Bar.make");
    }

    #[test]
    fn test_with_last() {
        let path = QualifiedPath::dotted("Foo.make");
        assert_eq!(path.with_last("props").to_string(), "Foo.props");
    }

    #[test]
    fn test_appended() {
        let path = QualifiedPath::single("Foo");
        assert_eq!(path.appended("make").to_string(), "Foo.make");
    }

    #[test]
    fn test_is_single() {
        assert!(QualifiedPath::single("div").is_single());
        assert!(!QualifiedPath::dotted("Foo.make").is_single());
    }
}
