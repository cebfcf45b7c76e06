//! User-component element calls and fragments.
//!
//! A marked call whose callee is a qualified path ending in `createElement`
//! or `make` targets a user-defined component. The two output conventions
//! differ structurally here: v2 hoists `key`/`ref` onto a wrapping
//! `ReasonReact.element` call around `<path>.make`, while v3 routes every
//! prop through the component's derived props constructor and wraps the
//! result in `React.createElement`.

use jsx_ast::{Argument, ArgLabel, Expr, Marker, QualifiedPath, Span};

use crate::children::{extract_children, to_exact_or_list, to_sequence, Children, CHILDREN_LABEL};
use crate::error::RewriteError;
use crate::transform::Rewriter;

/// Wrapper entry point for v2 component elements.
const ELEMENT_WRAPPER_V2: &str = "ReasonReact.element";
/// Fixed creation entry point for v3 components and for fragments.
const CREATE_ELEMENT: &str = "React.createElement";
/// The fragment marker identifier passed to [`CREATE_ELEMENT`].
const FRAGMENT: &str = "React.fragment";

/// Rewrites a marked component call under the v2 convention:
/// `ReasonReact.element(~key?, ~ref?, Foo.make(props…, children))`.
pub(crate) fn transform_component_call_v2(
    rw: &mut Rewriter,
    path: &QualifiedPath,
    args: Vec<Argument>,
    markers: Vec<Marker>,
    span: Span,
) -> Result<Expr, RewriteError> {
    let (children, rest) = extract_children(args, true, span)?;

    // key and ref belong to the outer wrapper, not the component itself.
    let (key_ref, make_args): (Vec<Argument>, Vec<Argument>) =
        rest.into_iter().partition(|arg| is_key_or_ref(&arg.label));

    let mut inner_args = Vec::with_capacity(make_args.len() + 1);
    for arg in make_args {
        inner_args.push(Argument {
            label: arg.label,
            value: rw.transform_expr(arg.value)?,
        });
    }
    inner_args.push(Argument::positional(to_sequence(children, &mut |expr| {
        rw.transform_expr(expr)
    })?));

    let inner = Expr::call(Expr::ident(path.with_last("make"), span), inner_args, span);

    let mut outer_args = key_ref;
    outer_args.push(Argument::positional(inner));
    let wrapper = Expr::ident(QualifiedPath::dotted(ELEMENT_WRAPPER_V2), span);
    Ok(Expr::call(wrapper, outer_args, span).with_markers(markers))
}

/// Rewrites a marked component call under the v3 convention:
/// `React.createElement(Foo.make, Foo.props(props…, ~children=?, ()))`.
pub(crate) fn transform_component_call_v3(
    rw: &mut Rewriter,
    path: &QualifiedPath,
    args: Vec<Argument>,
    markers: Vec<Marker>,
    span: Span,
) -> Result<Expr, RewriteError> {
    let (children, rest) = extract_children(args, true, span)?;

    let mut props_args = Vec::with_capacity(rest.len() + 2);
    for arg in rest {
        props_args.push(Argument {
            label: arg.label,
            value: rw.transform_expr(arg.value)?,
        });
    }

    match to_exact_or_list(children, &mut |expr| rw.transform_expr(expr))? {
        Children::Exact(child) => props_args.push(Argument::named(CHILDREN_LABEL, child)),
        Children::List(items) if items.is_empty() => {}
        Children::List(items) => {
            let wrapped = fragment_call(Expr::array(items, span), span);
            props_args.push(Argument::named(CHILDREN_LABEL, wrapped));
        }
    }
    // The props constructor is an object-building external ending in unit.
    props_args.push(Argument::positional(Expr::unit(span)));

    let props_call = Expr::call(Expr::ident(props_entry(path), span), props_args, span);
    let make_ident = Expr::ident(path.with_last("make"), span);
    let create = Expr::ident(QualifiedPath::dotted(CREATE_ELEMENT), span);
    Ok(Expr::call(
        create,
        vec![
            Argument::positional(make_ident),
            Argument::positional(props_call),
        ],
        span,
    )
    .with_markers(markers))
}

/// Rewrites a marked bare sequence literal into a fragment:
/// `React.createElement(React.fragment, children)`.
pub(crate) fn transform_fragment(
    rw: &mut Rewriter,
    node: Expr,
    markers: Vec<Marker>,
    span: Span,
) -> Result<Expr, RewriteError> {
    let seq = match to_exact_or_list(node, &mut |expr| rw.transform_expr(expr))? {
        Children::Exact(child) => child,
        Children::List(items) => Expr::array(items, span),
    };
    Ok(fragment_call(seq, span).with_markers(markers))
}

fn fragment_call(seq: Expr, span: Span) -> Expr {
    Expr::call(
        Expr::ident(QualifiedPath::dotted(CREATE_ELEMENT), span),
        vec![
            Argument::positional(Expr::ident(QualifiedPath::dotted(FRAGMENT), span)),
            Argument::positional(seq),
        ],
        span,
    )
}

fn is_key_or_ref(label: &ArgLabel) -> bool {
    matches!(label.name(), Some("key") | Some("ref"))
}

/// Derives the props-constructor entry point next to a component's `make`.
///
/// `Foo.make` gets the sibling `Foo.props`; deeper paths suffix the
/// constructor segment instead: `Foo.Bar.make` becomes `Foo.Bar.make_props`.
fn props_entry(path: &QualifiedPath) -> QualifiedPath {
    let make = path.with_last("make");
    if make.len() == 2 {
        make.with_last("props")
    } else {
        make.with_last("make_props")
    }
}
