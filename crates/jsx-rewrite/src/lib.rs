//! JSX element and component rewriting over parsed syntax trees.
//!
//! This crate rewrites marked call and sequence-literal nodes into calls
//! against the React runtime conventions, and expands `@react.component`
//! bindings into a props record type, a props constructor external, and a
//! record-destructuring wrapper. It consumes and produces [`jsx_ast`] trees;
//! parsing and printing belong to the host compiler.
//!
//! The pass is single-threaded and all-or-nothing: the first violation
//! aborts the unit and no partial tree is returned.
//!
//! # Example
//!
//! ```
//! use jsx_ast::{Argument, DeclKind, Declaration, Expr, Marker, Pattern, Program, Span, ValueBinding};
//! use jsx_rewrite::{rewrite, MARKUP_MARKER};
//!
//! let span = Span::new(0u32, 10u32);
//! let element = Expr::call(
//!     Expr::name("div", span),
//!     vec![Argument::positional(Expr::unit(span))],
//!     span,
//! )
//! .with_markers(vec![Marker::flag(MARKUP_MARKER, span)]);
//!
//! let program = Program {
//!     items: vec![Declaration {
//!         kind: DeclKind::Value(vec![ValueBinding {
//!             pattern: Pattern::Var("app".into()),
//!             expr: element,
//!             markers: vec![],
//!             span,
//!         }]),
//!         span,
//!     }],
//!     span,
//! };
//!
//! let rewritten = rewrite(program).unwrap();
//! assert_eq!(rewritten.items.len(), 1);
//! ```

mod children;
mod component;
mod config;
mod element;
mod error;
mod expand;
mod transform;

pub use config::{JsxVersion, CONFIG_ATTRIBUTE, VERSION_FIELD};
pub use error::{RewriteError, RewriteErrorKind};
pub use transform::{rewrite, Rewriter};

/// The name under which the host registers this pass.
pub const REGISTERED_NAME: &str = "jsx";

/// The marker flagging a call or sequence literal for rewriting.
pub const MARKUP_MARKER: &str = "JSX";

/// The marker requesting component-definition expansion on a binding.
pub const COMPONENT_MARKER: &str = "react.component";

/// The secondary marker carrying a component's debug display name.
pub const DISPLAY_NAME_MARKER: &str = "react.displayName";
