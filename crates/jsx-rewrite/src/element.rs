//! Plain-tag element calls.
//!
//! A marked call whose callee is a bare name, e.g. `div(~className, ~children, ())`,
//! targets the DOM creation API. Both output conventions share one
//! algorithm and differ only in the entry-point names they target.

use jsx_ast::{Argument, Expr, ExprKind, Marker, QualifiedPath, Span};
use smol_str::SmolStr;

use crate::children::{extract_children, to_sequence};
use crate::error::{RewriteError, RewriteErrorKind};
use crate::transform::Rewriter;
use crate::MARKUP_MARKER;

/// The DOM-side entry points one output convention targets.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DomApi {
    /// Module holding the creation entry points.
    pub module: &'static str,
    /// Creation entry point when children are a literal sequence.
    pub fixed: &'static str,
    /// Creation entry point when children are spread in opaquely.
    pub variadic: &'static str,
    /// The prop-builder entry point.
    pub props: &'static str,
}

pub(crate) const DOM_API_V2: DomApi = DomApi {
    module: "ReactDOMRe",
    fixed: "createElement",
    variadic: "createElementVariadic",
    props: "props",
};

pub(crate) const DOM_API_V3: DomApi = DomApi {
    module: "ReactDOM",
    fixed: "createDOMElement",
    variadic: "createDOMElementVariadic",
    props: "domProps",
};

/// Rewrites a marked plain-tag call into a DOM creation call.
pub(crate) fn transform_dom_call(
    rw: &mut Rewriter,
    tag: &SmolStr,
    tag_span: Span,
    args: Vec<Argument>,
    markers: Vec<Marker>,
    span: Span,
    api: DomApi,
) -> Result<Expr, RewriteError> {
    let (children, rest) = extract_children(args, false, span)?;

    // A literal sequence (empty included) gets the fixed-arity entry point.
    // A bare expression is a spread and goes variadic; an array literal or
    // another marked element in child position is ambiguous authoring.
    let entry = if children.is_sequence() {
        api.fixed
    } else if matches!(children.kind, ExprKind::Array(_)) {
        return Err(RewriteError::new(
            RewriteErrorKind::AmbiguousChildrenSpreadArray,
            children.span,
        ));
    } else if children.has_marker(MARKUP_MARKER) {
        return Err(RewriteError::new(
            RewriteErrorKind::AmbiguousChildrenSpreadMarkup,
            children.span,
        ));
    } else {
        api.variadic
    };

    let children_expr = to_sequence(children, &mut |expr| rw.transform_expr(expr))?;

    let mut out_args = vec![Argument::positional(Expr::string(tag.clone(), tag_span))];
    if !prop_free(&rest) {
        let mut prop_args = Vec::with_capacity(rest.len());
        for arg in rest {
            prop_args.push(Argument {
                label: arg.label,
                value: rw.transform_expr(arg.value)?,
            });
        }
        let builder = Expr::ident(
            QualifiedPath::new(vec![SmolStr::new(api.module), SmolStr::new(api.props)]),
            span,
        );
        out_args.push(Argument::named("props", Expr::call(builder, prop_args, span)));
    }
    out_args.push(Argument::positional(children_expr));

    let callee = Expr::ident(
        QualifiedPath::new(vec![SmolStr::new(api.module), SmolStr::new(entry)]),
        span,
    );
    Ok(Expr::call(callee, out_args, span).with_markers(markers))
}

/// True when the remaining arguments carry no real props: nothing left, or
/// only the implicit trailing `()`.
fn prop_free(rest: &[Argument]) -> bool {
    match rest {
        [] => true,
        [only] => only.label.is_positional() && only.value.is_unit(),
        _ => false,
    }
}
