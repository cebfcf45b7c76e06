//! Component-definition expansion.
//!
//! A `let` binding marked `@react.component` is expanded into three pieces:
//! a `props` record type, a `props` object-building external, and a
//! rewritten single-parameter function that destructures the incoming props
//! record back into the names the original body closes over.

use jsx_ast::{
    Argument, ArgLabel, DeclKind, Declaration, Expr, ExprKind, ExternalDecl, FunParam, Literal,
    Marker, MatchArm, ObjectField, Pattern, QualifiedPath, Span, TypeDecl, TypeExpr, ValueBinding,
};
use smol_str::SmolStr;

use crate::error::{RewriteError, RewriteErrorKind};
use crate::transform::Rewriter;
use crate::{COMPONENT_MARKER, DISPLAY_NAME_MARKER};

/// Name of the synthesized record type and external constructor.
const PROPS_NAME: &str = "props";
/// The implicit optional parameter every component accepts.
const KEY_LABEL: &str = "key";
/// Synthetic name of the wrapper's incoming props record.
const PROPS_PARAM: &str = "__props";
/// Marker tagging the external as an object-construction primitive.
const OBJ_PRIMITIVE: &str = "obj";
/// Marker requesting uncurried invocation of the wrapper.
const UNCURRIED: &str = "uncurried";
/// Entry point assigning a debug display name.
const SET_DISPLAY_NAME: &str = "React.setDisplayName";

/// The declarations one component definition expands into.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ExpandedComponent {
    /// Synthesized externals, emitted before everything else.
    pub externals: Vec<Declaration>,
    /// Synthesized type declarations, emitted after the externals.
    pub types: Vec<Declaration>,
    /// The rewritten binding, kept inside its original group.
    pub binding: ValueBinding,
    /// Naming side-declarations, emitted after the group.
    pub trailing: Vec<Declaration>,
}

/// One labelled parameter collected from the definition's parameter chain.
#[derive(Debug, Clone, PartialEq)]
struct CollectedParam {
    name: SmolStr,
    default: Option<Expr>,
    optional: bool,
    span: Span,
}

/// Expands one marked binding. Fails with [`RewriteErrorKind::InvalidComponentTarget`]
/// unless the binding puts a function behind a plain name.
pub(crate) fn expand_component(
    rw: &mut Rewriter,
    binding: ValueBinding,
) -> Result<ExpandedComponent, RewriteError> {
    let span = binding.span;
    let Pattern::Var(fn_name) = binding.pattern.clone() else {
        return Err(RewriteError::new(
            RewriteErrorKind::InvalidComponentTarget,
            span,
        ));
    };
    if !matches!(binding.expr.kind, ExprKind::Fun { .. }) {
        return Err(RewriteError::new(
            RewriteErrorKind::InvalidComponentTarget,
            binding.expr.span,
        ));
    }

    let display_name = binding.find_marker(DISPLAY_NAME_MARKER).and_then(|marker| {
        match &marker.payload {
            Some(Expr {
                kind: ExprKind::Literal(Literal::Str(text)),
                ..
            }) => Some((text.clone(), marker.span)),
            _ => None,
        }
    });
    let kept_markers: Vec<Marker> = binding
        .markers
        .iter()
        .filter(|marker| {
            marker.name != COMPONENT_MARKER
                && !(display_name.is_some() && marker.name == DISPLAY_NAME_MARKER)
        })
        .cloned()
        .collect();

    let (params, body) = collect_params(binding.expr);
    let body = rw.transform_expr(body)?;

    let types = vec![props_type_decl(&params, span)];
    let externals = vec![props_external_decl(&params, span)];
    let binding = wrapper_binding(rw, fn_name.clone(), kept_markers, &params, body, span)?;

    let trailing = display_name
        .map(|(text, name_span)| display_name_decl(&fn_name, text, name_span))
        .into_iter()
        .collect();

    Ok(ExpandedComponent {
        externals,
        types,
        binding,
        trailing,
    })
}

/// Walks the parameter chain left to right, collecting every labelled
/// parameter. Collection stops at the first positional parameter: the
/// terminal `()`/`_` parameter is consumed, anything else stays attached to
/// the returned body.
fn collect_params(expr: Expr) -> (Vec<CollectedParam>, Expr) {
    let mut params = Vec::new();
    let mut cur = expr;
    loop {
        let Expr {
            kind,
            markers,
            span,
        } = cur;
        match kind {
            ExprKind::Fun { param, body } => match param.label.clone() {
                ArgLabel::Named(name) => {
                    params.push(CollectedParam {
                        name,
                        default: param.default.map(|default| *default),
                        optional: false,
                        span: param.span,
                    });
                    cur = *body;
                }
                ArgLabel::Optional(name) => {
                    params.push(CollectedParam {
                        name,
                        default: param.default.map(|default| *default),
                        optional: true,
                        span: param.span,
                    });
                    cur = *body;
                }
                ArgLabel::Positional => {
                    if matches!(param.pattern, Pattern::Unit | Pattern::Wildcard) {
                        cur = *body;
                    } else {
                        cur = Expr {
                            kind: ExprKind::Fun { param, body },
                            markers,
                            span,
                        };
                    }
                    break;
                }
            },
            kind => {
                cur = Expr {
                    kind,
                    markers,
                    span,
                };
                break;
            }
        }
    }
    (params, cur)
}

/// `type props<'a, 'b> = Js.t<{"a": 'a, "b": 'b}>`
fn props_type_decl(params: &[CollectedParam], span: Span) -> Declaration {
    let fields = params
        .iter()
        .map(|param| ObjectField {
            name: param.name.clone(),
            ty: TypeExpr::Var(param.name.clone()),
        })
        .collect();
    let manifest = TypeExpr::Constr {
        path: QualifiedPath::dotted("Js.t"),
        args: vec![TypeExpr::Object(fields)],
    };
    Declaration {
        kind: DeclKind::Type(TypeDecl {
            name: SmolStr::new(PROPS_NAME),
            params: params.iter().map(|param| param.name.clone()).collect(),
            manifest: Some(manifest),
            span,
        }),
        span,
    }
}

/// `external props: (~key: string=?, ~a: 'a, ~b: 'b=?, unit) => props<'a, 'b> = ""`
fn props_external_decl(params: &[CollectedParam], span: Span) -> Declaration {
    let record = TypeExpr::Constr {
        path: QualifiedPath::single(PROPS_NAME),
        args: params
            .iter()
            .map(|param| TypeExpr::Var(param.name.clone()))
            .collect(),
    };
    let mut ty = TypeExpr::Arrow {
        label: ArgLabel::Positional,
        param: Box::new(TypeExpr::unit()),
        ret: Box::new(record),
    };
    for param in params.iter().rev() {
        let label = if param.optional {
            ArgLabel::Optional(param.name.clone())
        } else {
            ArgLabel::Named(param.name.clone())
        };
        ty = TypeExpr::Arrow {
            label,
            param: Box::new(TypeExpr::Var(param.name.clone())),
            ret: Box::new(ty),
        };
    }
    ty = TypeExpr::Arrow {
        label: ArgLabel::Optional(SmolStr::new(KEY_LABEL)),
        param: Box::new(TypeExpr::string()),
        ret: Box::new(ty),
    };

    Declaration {
        kind: DeclKind::External(ExternalDecl {
            name: SmolStr::new(PROPS_NAME),
            ty,
            primitive: SmolStr::default(),
            markers: vec![Marker::flag(OBJ_PRIMITIVE, span)],
            span,
        }),
        span,
    }
}

/// Builds `let <name> = (__props) => { let a = __props.a; …; body }`,
/// marked for uncurried invocation.
fn wrapper_binding(
    rw: &mut Rewriter,
    fn_name: SmolStr,
    markers: Vec<Marker>,
    params: &[CollectedParam],
    body: Expr,
    span: Span,
) -> Result<ValueBinding, RewriteError> {
    let mut wrapped = body;
    for param in params.iter().rev() {
        let projection = Expr::field(
            Expr::name(PROPS_PARAM, param.span),
            param.name.clone(),
            param.span,
        );
        let value = match &param.default {
            Some(default) => option_match(
                projection,
                param.name.clone(),
                rw.transform_expr(default.clone())?,
                param.span,
            ),
            None => projection,
        };
        let local = ValueBinding {
            pattern: Pattern::Var(param.name.clone()),
            expr: value,
            markers: vec![],
            span: param.span,
        };
        wrapped = Expr::let_in(local, wrapped, param.span);
    }

    let wrapper = Expr {
        kind: ExprKind::Fun {
            param: FunParam {
                label: ArgLabel::Positional,
                default: None,
                pattern: Pattern::Var(SmolStr::new(PROPS_PARAM)),
                span,
            },
            body: Box::new(wrapped),
        },
        markers: vec![Marker::flag(UNCURRIED, span)],
        span,
    };
    Ok(ValueBinding {
        pattern: Pattern::Var(fn_name),
        expr: wrapper,
        markers,
        span,
    })
}

/// `switch __props.name { | Some(name) => name | None => default }`
fn option_match(subject: Expr, name: SmolStr, default: Expr, span: Span) -> Expr {
    Expr::new(
        ExprKind::Match {
            subject: Box::new(subject),
            arms: vec![
                MatchArm {
                    pattern: Pattern::Construct(
                        SmolStr::new("Some"),
                        Some(Box::new(Pattern::Var(name.clone()))),
                    ),
                    body: Expr::name(name, span),
                },
                MatchArm {
                    pattern: Pattern::Construct(SmolStr::new("None"), None),
                    body: default,
                },
            ],
        },
        span,
    )
}

/// `let _ = React.setDisplayName(<name>, "<text>")`
fn display_name_decl(fn_name: &SmolStr, text: SmolStr, span: Span) -> Declaration {
    let set = Expr::call(
        Expr::ident(QualifiedPath::dotted(SET_DISPLAY_NAME), span),
        vec![
            Argument::positional(Expr::name(fn_name.clone(), span)),
            Argument::positional(Expr::string(text, span)),
        ],
        span,
    );
    Declaration {
        kind: DeclKind::Value(vec![ValueBinding {
            pattern: Pattern::Wildcard,
            expr: set,
            markers: vec![],
            span,
        }]),
        span,
    }
}
