//! Tree node types for the JSX rewrite pass.
//!
//! The grammar mirrors the slice of the surface language the rewriter
//! dispatches on: calls and literal sequences that may carry markers,
//! function/binding shapes for component definitions, and the declaration
//! forms the expander synthesizes. Everything else flows through the
//! rewriter untouched.

use smol_str::SmolStr;
use source_span::Span;

use crate::path::QualifiedPath;

/// Constructor name encoding a cons cell of a literal sequence.
pub const SEQ_CONS: &str = "::";
/// Constructor name encoding the empty-sequence terminator.
pub const SEQ_NIL: &str = "[]";
/// Constructor name of the unit value `()`.
pub const UNIT_CTOR: &str = "()";

/// One parsed program unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    /// Top-level declarations, in source order.
    pub items: Vec<Declaration>,
    /// The span of the entire unit.
    pub span: Span,
}

/// A top-level declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    /// What kind of declaration this is.
    pub kind: DeclKind,
    /// The span of the declaration.
    pub span: Span,
}

/// The kind of declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclKind {
    /// A group of `let` bindings declared together.
    Value(Vec<ValueBinding>),
    /// A type declaration.
    Type(TypeDecl),
    /// An external (foreign) declaration.
    External(ExternalDecl),
    /// A free-standing file-level attribute.
    Attribute(Marker),
}

/// A single `let` binding: pattern, bound expression, markers.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueBinding {
    /// The bound pattern.
    pub pattern: Pattern,
    /// The bound expression.
    pub expr: Expr,
    /// Markers attached to the binding.
    pub markers: Vec<Marker>,
    /// The span of the binding.
    pub span: Span,
}

impl ValueBinding {
    /// Returns true if a marker with the given name is attached.
    pub fn has_marker(&self, name: &str) -> bool {
        self.markers.iter().any(|m| m.name == name)
    }

    /// Returns the first marker with the given name, if any.
    pub fn find_marker(&self, name: &str) -> Option<&Marker> {
        self.markers.iter().find(|m| m.name == name)
    }
}

/// A type declaration, e.g. `type props<'a> = Js.t<{"a": 'a}>`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    /// The declared type name.
    pub name: SmolStr,
    /// Type parameter names, without the leading tick.
    pub params: Vec<SmolStr>,
    /// The manifest (right-hand side), if any.
    pub manifest: Option<TypeExpr>,
    /// The span of the declaration.
    pub span: Span,
}

/// An external declaration, e.g. `external props: … = ""`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExternalDecl {
    /// The declared name.
    pub name: SmolStr,
    /// The declared type.
    pub ty: TypeExpr,
    /// The primitive string the external is bound to.
    pub primitive: SmolStr,
    /// Markers attached to the declaration.
    pub markers: Vec<Marker>,
    /// The span of the declaration.
    pub span: Span,
}

impl ExternalDecl {
    /// Returns true if a marker with the given name is attached.
    pub fn has_marker(&self, name: &str) -> bool {
        self.markers.iter().any(|m| m.name == name)
    }
}

/// A named attribute attached to a node, with an optional expression payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// The marker name.
    pub name: SmolStr,
    /// The payload expression, if the marker carries one.
    pub payload: Option<Expr>,
    /// The span of the marker.
    pub span: Span,
}

impl Marker {
    /// Creates a payload-less marker.
    pub fn flag(name: impl Into<SmolStr>, span: Span) -> Self {
        Self {
            name: name.into(),
            payload: None,
            span,
        }
    }

    /// Creates a marker carrying a payload expression.
    pub fn with_payload(name: impl Into<SmolStr>, payload: Expr, span: Span) -> Self {
        Self {
            name: name.into(),
            payload: Some(payload),
            span,
        }
    }
}

/// A binding or parameter pattern.
#[derive(Debug, Clone, PartialEq)]
pub enum Pattern {
    /// A plain name.
    Var(SmolStr),
    /// The unit pattern `()`.
    Unit,
    /// The wildcard pattern `_`.
    Wildcard,
    /// A constructor pattern with an optional payload, e.g. `Some(x)`.
    Construct(SmolStr, Option<Box<Pattern>>),
}

/// An expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    /// What kind of expression this is.
    pub kind: ExprKind,
    /// Markers attached to the expression.
    pub markers: Vec<Marker>,
    /// The span of the expression.
    pub span: Span,
}

/// The kind of expression.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// A possibly-qualified identifier.
    Ident(QualifiedPath),
    /// A literal constant.
    Literal(Literal),
    /// A call with labelled arguments.
    Call {
        /// The callee expression.
        callee: Box<Expr>,
        /// The arguments, in source order.
        args: Vec<Argument>,
    },
    /// A variant constructor with a payload, covering the builtin
    /// sequence encoding (`::`/`[]`) and unit (`()`).
    Construct {
        /// The constructor name.
        name: SmolStr,
        /// The payload elements.
        payload: Vec<Expr>,
    },
    /// An array literal `[|a, b|]`, distinct from the `::`/`[]` encoding.
    Array(Vec<Expr>),
    /// A record literal `{a: 1, b: 2}`.
    Record(Vec<RecordField>),
    /// A field projection `object.name`.
    Field {
        /// The projected-from expression.
        object: Box<Expr>,
        /// The field name.
        name: SmolStr,
    },
    /// A single-parameter function.
    Fun {
        /// The parameter.
        param: FunParam,
        /// The body.
        body: Box<Expr>,
    },
    /// A `let … in` expression.
    Let {
        /// The local binding.
        binding: Box<ValueBinding>,
        /// The expression the binding scopes over.
        body: Box<Expr>,
    },
    /// A pattern match.
    Match {
        /// The matched expression.
        subject: Box<Expr>,
        /// The arms, in order.
        arms: Vec<MatchArm>,
    },
}

/// A literal constant.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A string literal.
    Str(SmolStr),
    /// An integer literal.
    Int(i64),
}

/// A field of a record literal.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordField {
    /// The field name.
    pub name: SmolStr,
    /// The field value.
    pub value: Expr,
    /// The span of the field.
    pub span: Span,
}

/// One parameter of a function expression.
#[derive(Debug, Clone, PartialEq)]
pub struct FunParam {
    /// How the parameter is passed.
    pub label: ArgLabel,
    /// The default value of an optional parameter, if any.
    pub default: Option<Box<Expr>>,
    /// The parameter pattern.
    pub pattern: Pattern,
    /// The span of the parameter.
    pub span: Span,
}

/// One arm of a match expression.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchArm {
    /// The arm's pattern.
    pub pattern: Pattern,
    /// The arm's body.
    pub body: Expr,
}

/// How an argument or parameter is labelled.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArgLabel {
    /// Unlabelled, passed by position.
    Positional,
    /// Labelled `~name`.
    Named(SmolStr),
    /// Optional `~name=?`.
    Optional(SmolStr),
}

impl ArgLabel {
    /// The label name, if the argument is labelled.
    pub fn name(&self) -> Option<&str> {
        match self {
            ArgLabel::Positional => None,
            ArgLabel::Named(name) | ArgLabel::Optional(name) => Some(name),
        }
    }

    /// Returns true for an unlabelled argument.
    pub fn is_positional(&self) -> bool {
        matches!(self, ArgLabel::Positional)
    }
}

/// A labelled call argument.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    /// The argument label.
    pub label: ArgLabel,
    /// The argument value.
    pub value: Expr,
}

impl Argument {
    /// Creates a positional argument.
    pub fn positional(value: Expr) -> Self {
        Self {
            label: ArgLabel::Positional,
            value,
        }
    }

    /// Creates a named argument.
    pub fn named(name: impl Into<SmolStr>, value: Expr) -> Self {
        Self {
            label: ArgLabel::Named(name.into()),
            value,
        }
    }

    /// Creates an optional argument.
    pub fn optional(name: impl Into<SmolStr>, value: Expr) -> Self {
        Self {
            label: ArgLabel::Optional(name.into()),
            value,
        }
    }
}

/// A type expression.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeExpr {
    /// A type variable `'name`.
    Var(SmolStr),
    /// A type constructor application, e.g. `Js.t<…>` or `props<'a>`.
    Constr {
        /// The constructor path.
        path: QualifiedPath,
        /// The type arguments.
        args: Vec<TypeExpr>,
    },
    /// A structural object type `{"a": 'a, …}`.
    Object(Vec<ObjectField>),
    /// One arrow of a function type.
    Arrow {
        /// The parameter label.
        label: ArgLabel,
        /// The parameter type.
        param: Box<TypeExpr>,
        /// The result type.
        ret: Box<TypeExpr>,
    },
}

impl TypeExpr {
    /// The `unit` type.
    pub fn unit() -> Self {
        TypeExpr::Constr {
            path: QualifiedPath::single("unit"),
            args: vec![],
        }
    }

    /// The `string` type.
    pub fn string() -> Self {
        TypeExpr::Constr {
            path: QualifiedPath::single("string"),
            args: vec![],
        }
    }
}

/// A field of a structural object type.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectField {
    /// The field name.
    pub name: SmolStr,
    /// The field type.
    pub ty: TypeExpr,
}

impl Expr {
    /// Creates a marker-less expression.
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Self {
            kind,
            markers: vec![],
            span,
        }
    }

    /// Replaces the expression's markers.
    pub fn with_markers(mut self, markers: Vec<Marker>) -> Self {
        self.markers = markers;
        self
    }

    /// An identifier expression for a qualified path.
    pub fn ident(path: QualifiedPath, span: Span) -> Self {
        Self::new(ExprKind::Ident(path), span)
    }

    /// An identifier expression for a single name.
    pub fn name(name: impl Into<SmolStr>, span: Span) -> Self {
        Self::ident(QualifiedPath::single(name), span)
    }

    /// A string literal.
    pub fn string(value: impl Into<SmolStr>, span: Span) -> Self {
        Self::new(ExprKind::Literal(Literal::Str(value.into())), span)
    }

    /// An integer literal.
    pub fn int(value: i64, span: Span) -> Self {
        Self::new(ExprKind::Literal(Literal::Int(value)), span)
    }

    /// A call expression.
    pub fn call(callee: Expr, args: Vec<Argument>, span: Span) -> Self {
        Self::new(
            ExprKind::Call {
                callee: Box::new(callee),
                args,
            },
            span,
        )
    }

    /// The unit value `()`.
    pub fn unit(span: Span) -> Self {
        Self::new(
            ExprKind::Construct {
                name: SmolStr::new(UNIT_CTOR),
                payload: vec![],
            },
            span,
        )
    }

    /// The empty-sequence terminator.
    pub fn empty_seq(span: Span) -> Self {
        Self::new(
            ExprKind::Construct {
                name: SmolStr::new(SEQ_NIL),
                payload: vec![],
            },
            span,
        )
    }

    /// A sequence cons cell.
    pub fn cons(head: Expr, tail: Expr, span: Span) -> Self {
        Self::new(
            ExprKind::Construct {
                name: SmolStr::new(SEQ_CONS),
                payload: vec![head, tail],
            },
            span,
        )
    }

    /// Builds the cons/nil sequence encoding of the given elements.
    pub fn seq(elements: Vec<Expr>, span: Span) -> Self {
        let mut encoded = Self::empty_seq(span);
        for element in elements.into_iter().rev() {
            encoded = Self::cons(element, encoded, span);
        }
        encoded
    }

    /// An array literal.
    pub fn array(items: Vec<Expr>, span: Span) -> Self {
        Self::new(ExprKind::Array(items), span)
    }

    /// A field projection.
    pub fn field(object: Expr, name: impl Into<SmolStr>, span: Span) -> Self {
        Self::new(
            ExprKind::Field {
                object: Box::new(object),
                name: name.into(),
            },
            span,
        )
    }

    /// A `let … in` expression.
    pub fn let_in(binding: ValueBinding, body: Expr, span: Span) -> Self {
        Self::new(
            ExprKind::Let {
                binding: Box::new(binding),
                body: Box::new(body),
            },
            span,
        )
    }

    /// Returns true if a marker with the given name is attached.
    pub fn has_marker(&self, name: &str) -> bool {
        self.markers.iter().any(|m| m.name == name)
    }

    /// Returns true for the unit value.
    pub fn is_unit(&self) -> bool {
        matches!(&self.kind, ExprKind::Construct { name, payload } if name == UNIT_CTOR && payload.is_empty())
    }

    /// Returns true for a cons/nil-encoded literal sequence node.
    pub fn is_sequence(&self) -> bool {
        matches!(&self.kind, ExprKind::Construct { name, .. } if name == SEQ_CONS || name == SEQ_NIL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sp() -> Span {
        Span::new(0u32, 1u32)
    }

    #[test]
    fn test_seq_encoding() {
        let seq = Expr::seq(vec![Expr::int(1, sp()), Expr::int(2, sp())], sp());
        let ExprKind::Construct { name, payload } = &seq.kind else {
            panic!("expected a cons cell");
        };
        assert_eq!(name, SEQ_CONS);
        assert_eq!(payload[0], Expr::int(1, sp()));
        assert!(payload[1].is_sequence());
    }

    #[test]
    fn test_empty_seq_is_sequence_not_unit() {
        let nil = Expr::empty_seq(sp());
        assert!(nil.is_sequence());
        assert!(!nil.is_unit());
        assert!(Expr::unit(sp()).is_unit());
    }

    #[test]
    fn test_markers() {
        let expr = Expr::name("div", sp()).with_markers(vec![Marker::flag("JSX", sp())]);
        assert!(expr.has_marker("JSX"));
        assert!(!expr.has_marker("react.component"));
    }

    #[test]
    fn test_arg_label_name() {
        assert_eq!(ArgLabel::Named(SmolStr::new("key")).name(), Some("key"));
        assert_eq!(ArgLabel::Optional(SmolStr::new("ref")).name(), Some("ref"));
        assert_eq!(ArgLabel::Positional.name(), None);
    }
}
