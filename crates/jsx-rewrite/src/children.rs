//! Children extraction and sequence conversion.
//!
//! Marked calls carry their children as a `~children=`-labelled argument
//! holding a cons/nil-encoded literal sequence, or an arbitrary expression
//! when the author spread a value into child position. The extractor splits
//! that argument off; the converters decode the sequence encoding into the
//! shape each target convention expects.

use jsx_ast::{Argument, ArgLabel, Expr, ExprKind, Span, SEQ_CONS, SEQ_NIL};

use crate::error::{RewriteError, RewriteErrorKind};

/// The argument label carrying an element's children.
pub(crate) const CHILDREN_LABEL: &str = "children";

/// The decoded shape of a children sequence.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Children {
    /// A single expression standing in for the children value. A one-element
    /// literal sequence collapses to this, so a lone child is never wrapped
    /// in a one-element array.
    Exact(Expr),
    /// An explicit ordered list of child expressions (possibly empty).
    List(Vec<Expr>),
}

/// Splits the `children` argument off a marked call's argument list.
///
/// Returns the children node (the canonical empty sequence when no argument
/// was labelled `children`) and the remaining arguments in their original
/// order. With `strip_trailing_unit`, the final remaining argument must be
/// the positional `()` and is dropped; every argument before it must be
/// labelled.
pub(crate) fn extract_children(
    args: Vec<Argument>,
    strip_trailing_unit: bool,
    call_span: Span,
) -> Result<(Expr, Vec<Argument>), RewriteError> {
    let mut children: Vec<Argument> = Vec::new();
    let mut rest: Vec<Argument> = Vec::new();
    for arg in args {
        let is_children = matches!(&arg.label, ArgLabel::Named(name) if name == CHILDREN_LABEL);
        if is_children {
            children.push(arg);
        } else {
            rest.push(arg);
        }
    }

    if children.len() > 1 {
        return Err(RewriteError::new(
            RewriteErrorKind::MultipleChildrenLabels,
            children[1].value.span,
        ));
    }
    let node = match children.pop() {
        Some(arg) => arg.value,
        None => Expr::empty_seq(call_span),
    };

    let rest = if strip_trailing_unit {
        drop_trailing_unit(rest)?
    } else {
        rest
    };
    Ok((node, rest))
}

fn drop_trailing_unit(mut rest: Vec<Argument>) -> Result<Vec<Argument>, RewriteError> {
    if rest.is_empty() {
        return Ok(rest);
    }
    let last_index = rest.len() - 1;
    for arg in &rest[..last_index] {
        if arg.label.is_positional() {
            return Err(RewriteError::new(
                RewriteErrorKind::NonLabelledArgumentBeforeLast,
                arg.value.span,
            ));
        }
    }
    let last = &rest[last_index];
    if !(last.label.is_positional() && last.value.is_unit()) {
        return Err(RewriteError::new(
            RewriteErrorKind::NonLabelledArgumentBeforeLast,
            last.value.span,
        ));
    }
    rest.pop();
    Ok(rest)
}

/// One step of the cons/nil sequence decoding.
enum SeqStep {
    Nil,
    Cons(Expr, Expr),
    Other(Expr),
}

fn step(expr: Expr) -> SeqStep {
    let Expr {
        kind,
        markers,
        span,
    } = expr;
    match kind {
        ExprKind::Construct { name, payload } if name == SEQ_NIL && payload.is_empty() => {
            SeqStep::Nil
        }
        ExprKind::Construct { name, mut payload } if name == SEQ_CONS && payload.len() == 2 => {
            let tail = payload.pop().expect("cons has two payload elements");
            let head = payload.pop().expect("cons has two payload elements");
            SeqStep::Cons(head, tail)
        }
        kind => SeqStep::Other(Expr {
            kind,
            markers,
            span,
        }),
    }
}

/// Decodes a children node into [`Children`], visiting every element.
///
/// A non-sequence input (a spread) becomes `Exact` of the visited node. A
/// cons chain ending in a non-sequence tail also collapses to `Exact` of
/// that tail; the walked prefix is discarded.
pub(crate) fn to_exact_or_list<F>(node: Expr, visit: &mut F) -> Result<Children, RewriteError>
where
    F: FnMut(Expr) -> Result<Expr, RewriteError>,
{
    let mut acc: Vec<Expr> = Vec::new();
    let mut cur = node;
    loop {
        match step(cur) {
            SeqStep::Nil => {
                if acc.len() == 1 {
                    return Ok(Children::Exact(acc.pop().expect("one element")));
                }
                return Ok(Children::List(acc));
            }
            SeqStep::Cons(head, tail) => {
                acc.push(visit(head)?);
                cur = tail;
            }
            SeqStep::Other(other) => return Ok(Children::Exact(visit(other)?)),
        }
    }
}

/// Decodes a children node into a concrete sequence expression.
///
/// A literal sequence becomes an array literal of the visited elements
/// (empty included); a non-sequence input is visited and returned as-is, to
/// be spread at the call site.
pub(crate) fn to_sequence<F>(node: Expr, visit: &mut F) -> Result<Expr, RewriteError>
where
    F: FnMut(Expr) -> Result<Expr, RewriteError>,
{
    let span = node.span;
    let mut acc: Vec<Expr> = Vec::new();
    let mut cur = node;
    loop {
        match step(cur) {
            SeqStep::Nil => return Ok(Expr::array(acc, span)),
            SeqStep::Cons(head, tail) => {
                acc.push(visit(head)?);
                cur = tail;
            }
            SeqStep::Other(other) => return Ok(visit(other)?),
        }
    }
}
