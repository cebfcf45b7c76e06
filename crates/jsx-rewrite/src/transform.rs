//! The rewrite driver.
//!
//! A single depth-first pass over one program unit. Marked calls and
//! sequence literals are dispatched to the element, component, or fragment
//! transform; marked bindings are expanded; every other node is rebuilt
//! identically with its children visited, so no node kind is ever dropped.

use jsx_ast::{
    Argument, DeclKind, Declaration, Expr, ExprKind, FunParam, Marker, Program, Span,
    ValueBinding, SEQ_CONS, SEQ_NIL,
};

use crate::component;
use crate::config::{self, JsxVersion, CONFIG_ATTRIBUTE};
use crate::element::{self, DOM_API_V2, DOM_API_V3};
use crate::error::{RewriteError, RewriteErrorKind};
use crate::expand;
use crate::{COMPONENT_MARKER, MARKUP_MARKER};

/// Terminal path segments recognized as component entry points.
const COMPONENT_ENTRY_SYNONYMS: [&str; 2] = ["createElement", "make"];

/// Rewrites one parsed unit, returning the transformed unit or the first
/// violation. This is the pass's single entry point; the host registers it
/// under [`crate::REGISTERED_NAME`].
pub fn rewrite(program: Program) -> Result<Program, RewriteError> {
    Rewriter::new().transform_program(program)
}

/// Per-unit rewrite context.
///
/// Holds the version selection, which is written at most once (by the first
/// `jsxConfig` attribute carrying a `jsx` field) and read by every transform
/// thereafter; an unset version reads as v2.
#[derive(Debug)]
pub struct Rewriter {
    version: Option<JsxVersion>,
}

impl Rewriter {
    /// Creates a context with the version still unset.
    pub fn new() -> Self {
        Self { version: None }
    }

    /// The version the unit's transforms run under.
    pub fn version(&self) -> JsxVersion {
        self.version.unwrap_or_default()
    }

    /// Rewrites a whole unit.
    pub fn transform_program(&mut self, program: Program) -> Result<Program, RewriteError> {
        let mut items = Vec::with_capacity(program.items.len());
        for item in program.items {
            items.extend(self.transform_declaration(item)?);
        }
        Ok(Program {
            items,
            span: program.span,
        })
    }

    /// Rewrites one declaration; expansion may return several.
    pub fn transform_declaration(
        &mut self,
        decl: Declaration,
    ) -> Result<Vec<Declaration>, RewriteError> {
        let Declaration { kind, span } = decl;
        match kind {
            DeclKind::Attribute(marker) if marker.name == CONFIG_ATTRIBUTE => {
                let scan = config::scan_config(&marker)?;
                if let Some(version) = scan.version {
                    // The first configuration wins; the cell is write-once.
                    if self.version.is_none() {
                        self.version = Some(version);
                    }
                }
                Ok(scan
                    .remaining
                    .map(|marker| Declaration {
                        kind: DeclKind::Attribute(marker),
                        span,
                    })
                    .into_iter()
                    .collect())
            }
            DeclKind::Attribute(marker) => Ok(vec![Declaration {
                kind: DeclKind::Attribute(marker),
                span,
            }]),
            DeclKind::Value(bindings) => self.transform_value_group(bindings, span),
            DeclKind::External(external) if external.has_marker(COMPONENT_MARKER) => Err(
                RewriteError::new(RewriteErrorKind::InvalidComponentTarget, span),
            ),
            kind @ (DeclKind::Type(_) | DeclKind::External(_)) => {
                Ok(vec![Declaration { kind, span }])
            }
        }
    }

    /// Rewrites a binding group. Component expansion emits its synthesized
    /// externals first and type declarations second, keeps the rewritten
    /// binding in the group, and appends naming side-declarations last.
    fn transform_value_group(
        &mut self,
        bindings: Vec<ValueBinding>,
        span: Span,
    ) -> Result<Vec<Declaration>, RewriteError> {
        let mut externals = Vec::new();
        let mut types = Vec::new();
        let mut group = Vec::with_capacity(bindings.len());
        let mut trailing = Vec::new();
        for binding in bindings {
            if binding.has_marker(COMPONENT_MARKER) {
                let expanded = expand::expand_component(self, binding)?;
                externals.extend(expanded.externals);
                types.extend(expanded.types);
                group.push(expanded.binding);
                trailing.extend(expanded.trailing);
            } else {
                group.push(self.transform_binding(binding)?);
            }
        }
        let mut out = externals;
        out.extend(types);
        out.push(Declaration {
            kind: DeclKind::Value(group),
            span,
        });
        out.extend(trailing);
        Ok(out)
    }

    fn transform_binding(&mut self, binding: ValueBinding) -> Result<ValueBinding, RewriteError> {
        let ValueBinding {
            pattern,
            expr,
            markers,
            span,
        } = binding;
        Ok(ValueBinding {
            pattern,
            expr: self.transform_expr(expr)?,
            markers,
            span,
        })
    }

    /// Rewrites one expression.
    pub(crate) fn transform_expr(&mut self, expr: Expr) -> Result<Expr, RewriteError> {
        let marked = expr.has_marker(MARKUP_MARKER);
        let Expr {
            kind,
            markers,
            span,
        } = expr;
        match kind {
            ExprKind::Call { callee, args } if marked => {
                let kept = without_marker(markers, MARKUP_MARKER);
                self.dispatch_marked_call(*callee, args, kept, span)
            }
            ExprKind::Construct { name, payload }
                if marked && (name == SEQ_CONS || name == SEQ_NIL) =>
            {
                let kept = without_marker(markers, MARKUP_MARKER);
                let node = Expr::new(ExprKind::Construct { name, payload }, span);
                component::transform_fragment(self, node, kept, span)
            }

            // Everything below is the identity fallback: rebuild the node
            // unchanged, visiting each child.
            kind @ (ExprKind::Ident(_) | ExprKind::Literal(_)) => Ok(Expr {
                kind,
                markers,
                span,
            }),
            ExprKind::Call { callee, args } => {
                let callee = Box::new(self.transform_expr(*callee)?);
                let args = args
                    .into_iter()
                    .map(|arg| {
                        Ok(Argument {
                            label: arg.label,
                            value: self.transform_expr(arg.value)?,
                        })
                    })
                    .collect::<Result<Vec<_>, RewriteError>>()?;
                Ok(Expr {
                    kind: ExprKind::Call { callee, args },
                    markers,
                    span,
                })
            }
            ExprKind::Construct { name, payload } => {
                let payload = payload
                    .into_iter()
                    .map(|element| self.transform_expr(element))
                    .collect::<Result<Vec<_>, RewriteError>>()?;
                Ok(Expr {
                    kind: ExprKind::Construct { name, payload },
                    markers,
                    span,
                })
            }
            ExprKind::Array(items) => {
                let items = items
                    .into_iter()
                    .map(|item| self.transform_expr(item))
                    .collect::<Result<Vec<_>, RewriteError>>()?;
                Ok(Expr {
                    kind: ExprKind::Array(items),
                    markers,
                    span,
                })
            }
            ExprKind::Record(fields) => {
                let fields = fields
                    .into_iter()
                    .map(|mut field| {
                        field.value = self.transform_expr(field.value)?;
                        Ok(field)
                    })
                    .collect::<Result<Vec<_>, RewriteError>>()?;
                Ok(Expr {
                    kind: ExprKind::Record(fields),
                    markers,
                    span,
                })
            }
            ExprKind::Field { object, name } => Ok(Expr {
                kind: ExprKind::Field {
                    object: Box::new(self.transform_expr(*object)?),
                    name,
                },
                markers,
                span,
            }),
            ExprKind::Fun { param, body } => {
                let FunParam {
                    label,
                    default,
                    pattern,
                    span: param_span,
                } = param;
                let default = match default {
                    Some(default) => Some(Box::new(self.transform_expr(*default)?)),
                    None => None,
                };
                Ok(Expr {
                    kind: ExprKind::Fun {
                        param: FunParam {
                            label,
                            default,
                            pattern,
                            span: param_span,
                        },
                        body: Box::new(self.transform_expr(*body)?),
                    },
                    markers,
                    span,
                })
            }
            ExprKind::Let { binding, body } => Ok(Expr {
                kind: ExprKind::Let {
                    binding: Box::new(self.transform_binding(*binding)?),
                    body: Box::new(self.transform_expr(*body)?),
                },
                markers,
                span,
            }),
            ExprKind::Match { subject, arms } => {
                let subject = Box::new(self.transform_expr(*subject)?);
                let arms = arms
                    .into_iter()
                    .map(|mut arm| {
                        arm.body = self.transform_expr(arm.body)?;
                        Ok(arm)
                    })
                    .collect::<Result<Vec<_>, RewriteError>>()?;
                Ok(Expr {
                    kind: ExprKind::Match { subject, arms },
                    markers,
                    span,
                })
            }
        }
    }

    /// Routes a marked call to the element or component transform.
    fn dispatch_marked_call(
        &mut self,
        callee: Expr,
        args: Vec<Argument>,
        markers: Vec<Marker>,
        span: Span,
    ) -> Result<Expr, RewriteError> {
        let ExprKind::Ident(path) = &callee.kind else {
            return Err(RewriteError::new(
                RewriteErrorKind::UnsupportedCalleeShape,
                callee.span,
            ));
        };

        if path.is_single() {
            let name = path.last().clone();
            if COMPONENT_ENTRY_SYNONYMS.contains(&name.as_str()) {
                return Err(RewriteError::new(
                    RewriteErrorKind::MissingModuleQualifier { entry: name },
                    callee.span,
                ));
            }
            let api = match self.version() {
                JsxVersion::V2 => DOM_API_V2,
                JsxVersion::V3 => DOM_API_V3,
            };
            return element::transform_dom_call(self, &name, callee.span, args, markers, span, api);
        }

        let last = path.last();
        if !COMPONENT_ENTRY_SYNONYMS.contains(&last.as_str()) {
            return Err(RewriteError::new(
                RewriteErrorKind::WrongEntryPoint {
                    segment: last.clone(),
                },
                callee.span,
            ));
        }
        match self.version() {
            JsxVersion::V2 => component::transform_component_call_v2(self, path, args, markers, span),
            JsxVersion::V3 => component::transform_component_call_v3(self, path, args, markers, span),
        }
    }
}

impl Default for Rewriter {
    fn default() -> Self {
        Self::new()
    }
}

fn without_marker(markers: Vec<Marker>, name: &str) -> Vec<Marker> {
    markers.into_iter().filter(|m| m.name != name).collect()
}
