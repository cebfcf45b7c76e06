//! Rewrite error types.

use smol_str::SmolStr;
use source_span::Span;
use thiserror::Error;

/// An error that aborts the rewrite of a whole unit.
///
/// There is no partial output: the first violation is returned and the
/// original tree is discarded. The host renders the message together with
/// the location resolved from `span`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}")]
pub struct RewriteError {
    /// The kind of error.
    pub kind: RewriteErrorKind,
    /// The location of the offending node.
    pub span: Span,
}

impl RewriteError {
    /// Creates a new rewrite error.
    pub fn new(kind: RewriteErrorKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The kind of rewrite error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RewriteErrorKind {
    /// More than one argument was labelled `children`.
    #[error("only one `children` argument is allowed")]
    MultipleChildrenLabels,

    /// A positional argument appeared where only labelled arguments may
    /// precede the final `()`.
    #[error("found a non-labelled argument before the final ()")]
    NonLabelledArgumentBeforeLast,

    /// A bare `createElement`/`make` call without a module path.
    #[error("`{entry}` should be preceded by a module name, e.g. `MyComponent.{entry}`")]
    MissingModuleQualifier {
        /// The bare entry-point name that was called.
        entry: SmolStr,
    },

    /// A qualified call ending in an unrecognized segment.
    #[error("expected a call to `Module.createElement` or `Module.make`, found `{segment}`")]
    WrongEntryPoint {
        /// The unrecognized final segment.
        segment: SmolStr,
    },

    /// The marked call's callee is not an identifier or module path.
    #[error("this call cannot be rewritten: the callee is not a name or module path")]
    UnsupportedCalleeShape,

    /// A children spread was combined with an array literal.
    #[error("a spread cannot be combined with an array literal as children")]
    AmbiguousChildrenSpreadArray,

    /// A children spread was combined with another marked element.
    #[error("a spread cannot be combined with another element as children")]
    AmbiguousChildrenSpreadMarkup,

    /// The component attribute was attached to something other than a
    /// function bound to a plain name.
    #[error("the component attribute only applies to a function bound to a plain name")]
    InvalidComponentTarget,

    /// The file-level version field holds something other than 2 or 3.
    #[error("jsx version must be 2 or 3, found {found}")]
    InvalidVersionNumber {
        /// A rendering of the offending value.
        found: SmolStr,
    },

    /// The file-level config payload is not a record.
    #[error("the jsx configuration attribute expects a record payload")]
    InvalidVersionConfigShape,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = RewriteError::new(
            RewriteErrorKind::WrongEntryPoint {
                segment: SmolStr::new("render"),
            },
            Span::new(0u32, 6u32),
        );
        assert_eq!(
            error.to_string(),
            "expected a call to `Module.createElement` or `Module.make`, found `render`"
        );
    }

    #[test]
    fn test_version_error_display() {
        let error = RewriteError::new(
            RewriteErrorKind::InvalidVersionNumber {
                found: SmolStr::new("4"),
            },
            Span::at(0u32),
        );
        assert_eq!(error.to_string(), "jsx version must be 2 or 3, found 4");
    }
}
