//! End-to-end tests for the rewrite pass.
//!
//! Each test drives the public `rewrite` entry point with a small program
//! and checks the shape of the transformed tree.

use jsx_ast::{
    Argument, ArgLabel, DeclKind, Declaration, Expr, ExprKind, FunParam, Marker, Pattern, Program,
    QualifiedPath, RecordField, Span, ValueBinding,
};
use jsx_rewrite::{
    rewrite, RewriteErrorKind, COMPONENT_MARKER, CONFIG_ATTRIBUTE, MARKUP_MARKER,
};
use pretty_assertions::assert_eq;
use smol_str::SmolStr;

fn sp() -> Span {
    Span::new(0u32, 8u32)
}

fn marked(expr: Expr) -> Expr {
    expr.with_markers(vec![Marker::flag(MARKUP_MARKER, sp())])
}

fn value_decl(name: &str, expr: Expr) -> Declaration {
    Declaration {
        kind: DeclKind::Value(vec![ValueBinding {
            pattern: Pattern::Var(SmolStr::new(name)),
            expr,
            markers: vec![],
            span: sp(),
        }]),
        span: sp(),
    }
}

fn config_decl(fields: Vec<(&str, Expr)>) -> Declaration {
    let record = Expr::new(
        ExprKind::Record(
            fields
                .into_iter()
                .map(|(name, value)| RecordField {
                    name: SmolStr::new(name),
                    value,
                    span: sp(),
                })
                .collect(),
        ),
        sp(),
    );
    Declaration {
        kind: DeclKind::Attribute(Marker::with_payload(CONFIG_ATTRIBUTE, record, sp())),
        span: sp(),
    }
}

fn program(items: Vec<Declaration>) -> Program {
    Program { items, span: sp() }
}

fn bound_expr(decl: &Declaration) -> &Expr {
    let DeclKind::Value(bindings) = &decl.kind else {
        panic!("expected a value group");
    };
    &bindings[0].expr
}

fn callee_path(expr: &Expr) -> String {
    let ExprKind::Call { callee, .. } = &expr.kind else {
        panic!("expected a call");
    };
    let ExprKind::Ident(path) = &callee.kind else {
        panic!("expected an identifier callee");
    };
    path.to_string()
}

fn call_args(expr: &Expr) -> &[Argument] {
    let ExprKind::Call { args, .. } = &expr.kind else {
        panic!("expected a call");
    };
    args
}

#[test]
fn test_zero_children_tag_call_has_two_positional_args() {
    let element = marked(Expr::call(
        Expr::name("div", sp()),
        vec![Argument::positional(Expr::unit(sp()))],
        sp(),
    ));
    let out = rewrite(program(vec![value_decl("app", element)])).unwrap();

    let call = bound_expr(&out.items[0]);
    assert_eq!(callee_path(call), "ReactDOMRe.createElement");
    let args = call_args(call);
    assert_eq!(args.len(), 2);
    assert!(args.iter().all(|arg| arg.label.is_positional()));
    assert_eq!(args[0].value, Expr::string("div", sp()));
    assert_eq!(args[1].value, Expr::array(vec![], sp()));
}

#[test]
fn test_prop_order_is_preserved() {
    let element = marked(Expr::call(
        Expr::name("input", sp()),
        vec![
            Argument::named("value", Expr::name("v", sp())),
            Argument::named("onChange", Expr::name("f", sp())),
            Argument::optional("disabled", Expr::name("d", sp())),
            Argument::positional(Expr::unit(sp())),
        ],
        sp(),
    ));
    let out = rewrite(program(vec![value_decl("field", element)])).unwrap();

    let props = &call_args(bound_expr(&out.items[0]))[1];
    assert_eq!(props.label, ArgLabel::Named(SmolStr::new("props")));
    let labels: Vec<_> = call_args(&props.value)
        .iter()
        .filter_map(|arg| arg.label.name().map(str::to_owned))
        .collect();
    assert_eq!(labels, vec!["value", "onChange", "disabled"]);
}

#[test]
fn test_key_and_ref_reach_the_wrapper_not_the_constructor() {
    let element = marked(Expr::call(
        Expr::ident(QualifiedPath::dotted("Button.createElement"), sp()),
        vec![
            Argument::named("label", Expr::string("ok", sp())),
            Argument::named("key", Expr::string("k1", sp())),
            Argument::positional(Expr::unit(sp())),
        ],
        sp(),
    ));
    let out = rewrite(program(vec![value_decl("button", element)])).unwrap();

    let wrapper = bound_expr(&out.items[0]);
    assert_eq!(callee_path(wrapper), "ReasonReact.element");
    let outer = call_args(wrapper);
    assert_eq!(outer[0].label.name(), Some("key"));

    let inner = &outer[1].value;
    assert_eq!(callee_path(inner), "Button.make");
    assert!(call_args(inner)
        .iter()
        .all(|arg| arg.label.name() != Some("key")));
}

#[test]
fn test_version_two_config_keeps_other_fields_and_routes_v2() {
    let items = vec![
        config_decl(vec![
            ("jsx", Expr::int(2, sp())),
            ("other", Expr::name("x", sp())),
        ]),
        value_decl(
            "el",
            marked(Expr::call(
                Expr::ident(QualifiedPath::dotted("Foo.make"), sp()),
                vec![Argument::positional(Expr::unit(sp()))],
                sp(),
            )),
        ),
    ];
    let out = rewrite(program(items)).unwrap();

    assert_eq!(out.items.len(), 2);
    let DeclKind::Attribute(marker) = &out.items[0].kind else {
        panic!("expected the config attribute to survive");
    };
    let ExprKind::Record(fields) = &marker.payload.as_ref().unwrap().kind else {
        panic!("expected a record payload");
    };
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].name, "other");

    assert_eq!(callee_path(bound_expr(&out.items[1])), "ReasonReact.element");
}

#[test]
fn test_version_three_config_is_removed_and_routes_v3() {
    let items = vec![
        config_decl(vec![("jsx", Expr::int(3, sp()))]),
        value_decl(
            "el",
            marked(Expr::call(
                Expr::ident(QualifiedPath::dotted("Foo.make"), sp()),
                vec![Argument::positional(Expr::unit(sp()))],
                sp(),
            )),
        ),
    ];
    let out = rewrite(program(items)).unwrap();

    assert_eq!(out.items.len(), 1);
    let call = bound_expr(&out.items[0]);
    assert_eq!(callee_path(call), "React.createElement");
    let props_call = &call_args(call)[1].value;
    assert_eq!(callee_path(props_call), "Foo.props");
}

#[test]
fn test_single_child_is_never_wrapped_in_an_array() {
    let child = marked(Expr::call(
        Expr::name("span", sp()),
        vec![Argument::positional(Expr::unit(sp()))],
        sp(),
    ));
    let items = vec![
        config_decl(vec![("jsx", Expr::int(3, sp()))]),
        value_decl(
            "el",
            marked(Expr::call(
                Expr::ident(QualifiedPath::dotted("Card.make"), sp()),
                vec![
                    Argument::named("children", Expr::seq(vec![child], sp())),
                    Argument::positional(Expr::unit(sp())),
                ],
                sp(),
            )),
        ),
    ];
    let out = rewrite(program(items)).unwrap();

    let props_call = &call_args(bound_expr(&out.items[0]))[1].value;
    let children = call_args(props_call)
        .iter()
        .find(|arg| arg.label.name() == Some("children"))
        .expect("children argument present");
    // The lone child arrives as the (transformed) element itself.
    assert_eq!(callee_path(&children.value), "ReactDOM.createDOMElement");
}

#[test]
fn test_double_children_is_fatal() {
    let element = marked(Expr::call(
        Expr::name("div", sp()),
        vec![
            Argument::named("children", Expr::name("a", sp())),
            Argument::named("children", Expr::name("b", sp())),
            Argument::positional(Expr::unit(sp())),
        ],
        sp(),
    ));
    let err = rewrite(program(vec![value_decl("app", element)])).unwrap_err();
    assert_eq!(err.kind, RewriteErrorKind::MultipleChildrenLabels);
}

#[test]
fn test_fragment_in_expression_position() {
    let fragment = Expr::seq(
        vec![Expr::name("a", sp()), Expr::name("b", sp())],
        sp(),
    )
    .with_markers(vec![Marker::flag(MARKUP_MARKER, sp())]);
    let out = rewrite(program(vec![value_decl("pair", fragment)])).unwrap();

    let call = bound_expr(&out.items[0]);
    assert_eq!(callee_path(call), "React.createElement");
    let args = call_args(call);
    assert_eq!(
        args[0].value,
        Expr::ident(QualifiedPath::dotted("React.fragment"), sp())
    );
    assert_eq!(
        args[1].value,
        Expr::array(vec![Expr::name("a", sp()), Expr::name("b", sp())], sp())
    );
}

#[test]
fn test_component_definition_expands_in_declaration_order() {
    let body = marked(Expr::call(
        Expr::name("div", sp()),
        vec![Argument::positional(Expr::unit(sp()))],
        sp(),
    ));
    let component = Expr::new(
        ExprKind::Fun {
            param: FunParam {
                label: ArgLabel::Named(SmolStr::new("title")),
                default: None,
                pattern: Pattern::Var(SmolStr::new("title")),
                span: sp(),
            },
            body: Box::new(Expr::new(
                ExprKind::Fun {
                    param: FunParam {
                        label: ArgLabel::Positional,
                        default: None,
                        pattern: Pattern::Unit,
                        span: sp(),
                    },
                    body: Box::new(body),
                },
                sp(),
            )),
        },
        sp(),
    );
    let decl = Declaration {
        kind: DeclKind::Value(vec![ValueBinding {
            pattern: Pattern::Var(SmolStr::new("make")),
            expr: component,
            markers: vec![Marker::flag(COMPONENT_MARKER, sp())],
            span: sp(),
        }]),
        span: sp(),
    };
    let out = rewrite(program(vec![decl])).unwrap();

    assert_eq!(out.items.len(), 3);
    assert!(matches!(out.items[0].kind, DeclKind::External(_)));
    assert!(matches!(out.items[1].kind, DeclKind::Type(_)));
    let DeclKind::Value(bindings) = &out.items[2].kind else {
        panic!("expected the rewritten group");
    };
    assert_eq!(bindings[0].pattern, Pattern::Var(SmolStr::new("make")));

    // The marked call inside the body was rewritten as well.
    let ExprKind::Fun { body, .. } = &bindings[0].expr.kind else {
        panic!("expected the wrapper function");
    };
    let ExprKind::Let { body: inner, .. } = &body.kind else {
        panic!("expected the projection binding");
    };
    assert_eq!(callee_path(inner), "ReactDOMRe.createElement");
}

#[test]
fn test_rewrite_is_deterministic() {
    let build = || {
        program(vec![value_decl(
            "el",
            marked(Expr::call(
                Expr::name("div", sp()),
                vec![
                    Argument::named("className", Expr::string("x", sp())),
                    Argument::positional(Expr::unit(sp())),
                ],
                sp(),
            )),
        )])
    };
    assert_eq!(rewrite(build()).unwrap(), rewrite(build()).unwrap());
}
