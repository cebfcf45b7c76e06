//! Syntax tree for the JSX rewrite pass.
//!
//! This crate defines the tree-node grammar the rewriter consumes and
//! produces: expressions with labelled arguments and markers, binding and
//! declaration forms, type expressions for synthesized declarations, and
//! qualified paths. Parsing source text into these nodes (and printing them
//! back) belongs to the host compiler, not to this crate.

mod ast;
mod path;

pub use ast::*;
pub use path::QualifiedPath;
pub use source_span::Span;
