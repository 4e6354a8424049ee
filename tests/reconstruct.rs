mod helpers;

use weft::syntax::{
    Append, Attribute, Block, CloseElement, Comment, DynamicAttr, DynamicProp, Expression,
    ExpressionSyntax, OpenElement, Statement, StatementSyntax, StaticAttr, Syntax, SyntaxKind,
    Text, Yield,
};
use weft::{spec, ErrorKind, PrettyPrint, PrettyPrintValue, RawTemplate, Value};

use crate::helpers::{assert_err, pretty, statement};

/// Reconstructs `spec` as `T` directly and through the dispatcher, checking
/// both agree and that a clone prints the same.
#[track_caller]
fn roundtrip<T>(spec: Value, templates: &[RawTemplate], expected: &str)
where
    T: StatementSyntax + PartialEq + std::fmt::Debug,
{
    let node = T::from_spec(&spec, templates).unwrap();
    let again = T::from_spec(&spec, templates).unwrap();
    assert_eq!(node, again);
    assert_eq!(node.pretty_print().to_string(), expected);
    assert_eq!(node.clone().pretty_print(), node.pretty_print());

    let stmt = Statement::from_spec(&spec, templates).unwrap();
    assert_eq!(stmt.kind(), node.kind());
    assert_eq!(pretty(&stmt), expected);
}

#[test]
fn reconstruct_statements() {
    let templates = vec![RawTemplate::default(); 2];
    roundtrip::<Text>(spec!(["text", "Hello"]), &[], r#"(text "Hello")"#);
    roundtrip::<Comment>(spec!(["comment", "todo"]), &[], r#"(comment "todo")"#);
    roundtrip::<Append>(
        spec!(["append", ["concat", ["a", ["get", ["this", "b"]]]]]),
        &[],
        r#"(append (concat "a" (get this.b)))"#,
    );
    roundtrip::<Append>(
        spec!(["append", ["arg", ["body"]], true]),
        &[],
        "(append:trusting-append (arg @body))",
    );
    roundtrip::<Block>(
        spec!(["block", ["if"], [["unknown", ["ok"]]], { key: 1 }, 0, 1]),
        &templates,
        "(block:if (unknown ok) key=1 &default=0 &inverse=1)",
    );
    roundtrip::<OpenElement>(spec!(["open-element", "div"]), &[], "(open-element div)");
    roundtrip::<CloseElement>(spec!(["close-element"]), &[], "(close-element)");
    roundtrip::<Yield>(spec!(["yield", "inverse"]), &[], "(yield to=inverse)");
}

#[test]
fn reconstruct_attributes() {
    roundtrip::<Attribute>(
        spec!(["static-attr", "class", "greeting"]),
        &[],
        r#"(static-attr class "greeting")"#,
    );
    roundtrip::<Attribute>(
        spec!(["static-attr", "href", "#", "xlink"]),
        &[],
        r##"(static-attr href "#" namespace=xlink)"##,
    );
    roundtrip::<Attribute>(
        spec!(["dynamic-attr", "title", ["helper", ["t"], ["hello"]]]),
        &[],
        r#"(dynamic-attr title (helper:t "hello"))"#,
    );
    roundtrip::<Attribute>(
        spec!(["dynamic-prop", "checked", false]),
        &[],
        "(dynamic-prop checked false)",
    );
    assert_eq!(
        StaticAttr::from_spec(&spec!(["static-attr", "id", "x"]), &[]).unwrap(),
        StaticAttr::new("id", "x")
    );
    assert_eq!(
        DynamicAttr::from_spec(&spec!(["dynamic-attr", "id", "x"]), &[]).unwrap(),
        DynamicAttr::new("id", weft::syntax::Literal::from("x"))
    );
    assert!(DynamicProp::from_spec(&spec!(["dynamic-prop", "id", "x"]), &[]).is_ok());
}

#[test]
fn reconstruct_expressions() {
    let tests = [
        (spec!(null), "null"),
        (spec!(1.5), "1.5"),
        (spec!("str"), r#""str""#),
        (spec!(["get", ["this"]]), "(get this)"),
        (spec!(["arg", ["title", "text"]]), "(arg @title.text)"),
        (spec!(["unknown", ["foo-bar"]]), "(unknown foo-bar)"),
        (spec!(["helper", ["now"]]), "(helper:now)"),
        (spec!(["concat", []]), "(concat)"),
    ];
    for (spec, expected) in tests {
        let expr = Expression::from_spec(&spec, &[]).unwrap();
        assert_eq!(expr.pretty_print().to_string(), expected);
        assert_eq!(expr.clone(), expr);
    }
}

#[test]
fn reconstruct_absent_is_not_empty() {
    let absent = statement(spec!(["block", ["each"]]));
    let null = statement(spec!(["block", ["each"], null, null]));
    let empty = statement(spec!(["block", ["each"], [], {}]));
    assert_eq!(absent, null);
    assert_ne!(absent, empty);

    let pp = |stmt: &Statement| match stmt.pretty_print() {
        PrettyPrintValue::Node(pp) => pp,
        pp => panic!("unexpected pretty-print {pp}"),
    };
    assert_eq!(pp(&absent).params, None);
    assert_eq!(pp(&absent).hash, None);
    assert_eq!(pp(&absent).templates, None);
    assert_eq!(pp(&empty).params, Some(vec![]));
    assert_eq!(pp(&empty).hash, Some(Default::default()));
}

#[test]
fn reconstruct_default_pretty_print() {
    assert_eq!(
        CloseElement.pretty_print(),
        PrettyPrintValue::Node(PrettyPrint::new("close-element", "close-element"))
    );
}

#[test]
fn reconstruct_is_deterministic() {
    let spec = spec!([
        "block",
        ["each"],
        [["get", ["this", "items"]]],
        { sep: ["concat", [",", " "]] },
        0,
    ]);
    let templates = [RawTemplate::default()];
    let a = Statement::from_spec(&spec, &templates).unwrap();
    let b = Statement::from_spec(&spec, &templates).unwrap();
    assert_eq!(a, b);
    assert_eq!(pretty(&a), pretty(&b));
}

#[test]
fn reconstruct_err_malformed() {
    let tests = [
        spec!("text"),
        spec!([]),
        spec!([1, "x"]),
        spec!(["text"]),
        spec!(["text", 1]),
        spec!(["text", "a", "b"]),
        spec!(["append"]),
        spec!(["open-element", null]),
        spec!(["block", []]),
        spec!(["block", ["1st"]]),
        spec!(["block", ["each"], "items"]),
        spec!(["yield", "default", { a: 1 }]),
        spec!(["static-attr", "id"]),
        spec!(["dynamic-prop", "checked", false, "ns"]),
        spec!(["get"]),
        spec!(["append", ["get", "this"]]),
        spec!(["append", { a: 1 }]),
    ];
    for spec in tests {
        let err = Statement::from_spec(&spec, &[]).unwrap_err();
        assert!(
            matches!(err.kind(), ErrorKind::MalformedSpec(_)),
            "expected malformed for {spec}, got {err}"
        );
        assert!(err.fragment().is_some());
    }
}

#[test]
fn reconstruct_err_wrong_discriminant_for_type() {
    let err = Text::from_spec(&spec!(["comment", "x"]), &[]).unwrap_err();
    assert_err(
        &err,
        "malformed specification: expected `text` syntax, found `comment` in `text` syntax",
        r#"
malformed specification: expected `text` syntax, found `comment`
  --> syntax: text
  --> block: main
   |
   | ["comment","x"]
   |
"#,
    );
}

#[test]
fn reconstruct_err_family_mismatch() {
    let err = Statement::from_spec(&spec!(["get", ["this"]]), &[]).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::MalformedSpec(_)));
    let err = Expression::from_spec(&spec!(["text", "x"]), &[]).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::MalformedSpec(_)));
}

#[test]
fn reconstruct_err_unimplemented() {
    let err = Statement::from_spec(&spec!(["component", "Nav"]), &[]).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Unimplemented("component".into()));
    assert_eq!(err.syntax(), None);

    let err = Expression::from_spec(&spec!(["call", ["x"]]), &[]).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Unimplemented("call".into()));
    assert!(!err.is_resolution_failure());
}

#[test]
fn syntax_kind_families() {
    let kind: SyntaxKind = "dynamic-prop".parse().unwrap();
    assert!(kind.is_attribute());
    assert!(!kind.is_expression());
    assert_eq!(kind.to_string(), "dynamic-prop");
    assert!("frobnicate".parse::<SyntaxKind>().is_err());
}
