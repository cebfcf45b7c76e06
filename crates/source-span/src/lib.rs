//! Source positions for the JSX rewrite pass.
//!
//! Tree nodes carry byte-offset [`Span`]s; diagnostics resolve them to
//! start/end line and column pairs through a [`LineIndex`] built from the
//! original source text.

mod line_index;
mod span;

pub use line_index::{LineCol, LineIndex, Location};
pub use span::{ByteOffset, Span};
