use weft::{spec, Value};

#[test]
fn spec_scalars() {
    let tests = [
        (spec!(null), Value::None),
        (spec!(true), Value::Bool(true)),
        (spec!(123), Value::Integer(123)),
        (spec!(-123), Value::Integer(-123)),
        (spec!(12.3), Value::Float(12.3)),
        (spec!("text"), Value::from("text")),
    ];
    for (v, exp) in tests {
        assert_eq!(v, exp);
    }
}

#[test]
fn spec_list() {
    // empty list
    assert_eq!(spec!([]), Value::List(vec![]));

    // single element list, with trailing comma
    assert_eq!(spec!(["close-element",]), Value::from(vec!["close-element"]));

    // single element expression list
    assert_eq!(spec!([(1 + 2 * 3)]), Value::from(vec![7]));

    // a variety of elements
    let v = spec!([null, false, 123, 12.3, "testing...", [], {}]);
    let exp = Value::List(vec![
        Value::None,
        Value::Bool(false),
        Value::Integer(123),
        Value::Float(12.3),
        Value::from("testing..."),
        Value::List(vec![]),
        Value::Map(Default::default()),
    ]);
    assert_eq!(v, exp);
}

#[test]
fn spec_nested_statement() {
    let v = spec!(["append", ["get", ["this", "name"]], null]);
    let exp = Value::from(vec![
        Value::from("append"),
        Value::from(vec![Value::from("get"), Value::from(vec!["this", "name"])]),
        Value::None,
    ]);
    assert_eq!(v, exp);
}

#[test]
fn spec_map() {
    // identifier and literal keys, with trailing comma
    let v = spec!({ statements: [], "named": ["title"], locals: null, });
    let exp = Value::from([
        ("statements", Value::List(vec![])),
        ("named", Value::from(vec!["title"])),
        ("locals", Value::None),
    ]);
    assert_eq!(v, exp);

    // nested maps
    let v = spec!({ main: { statements: [["text", "hi"]] } });
    let exp = Value::from([(
        "main",
        Value::from([("statements", Value::from(vec![Value::from(vec!["text", "hi"])]))]),
    )]);
    assert_eq!(v, exp);
}

#[test]
fn spec_variables() {
    let name = String::from("class");
    let v = spec!(["static-attr", name, "greeting"]);
    assert_eq!(v.as_list().map(<[Value]>::len), Some(3));
    assert_eq!(v.as_list().unwrap()[1].as_str(), Some("class"));
}
