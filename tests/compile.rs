mod helpers;

use weft::syntax::{Literal, SyntaxKind};
use weft::{
    spec, BlockId, CompiledArgs, CompiledExpr, Environment, ErrorKind, HelperId, Opcode,
    SerializedTemplate, Symbol, Value,
};

use crate::helpers::{assert_err, compile};

fn template(value: Value) -> SerializedTemplate {
    SerializedTemplate::from_value(&value).unwrap()
}

fn local(symbol: usize, path: &[&str]) -> CompiledExpr {
    CompiledExpr::Local {
        symbol: Symbol(symbol),
        path: path.iter().map(|s| s.to_string()).collect(),
    }
}

fn positional(exprs: Vec<CompiledExpr>) -> CompiledArgs {
    CompiledArgs {
        positional: exprs,
        named: Vec::new(),
    }
}

#[test]
fn compile_empty() {
    let compiled = Environment::new()
        .compile(&template(spec!({ main: { statements: [] } })))
        .unwrap();
    assert!(compiled.main.opcodes.is_empty());
    assert!(compiled.blocks.is_empty());
}

#[test]
fn compile_nested_blocks() {
    let mut env = Environment::new();
    let each = env.add_helper("each");
    let if_ = env.add_helper("if");
    assert_eq!((each, if_), (HelperId(0), HelperId(1)));

    let t = template(spec!({
        main: {
            statements: [["block", ["each"], [["get", ["items"]]], null, 0, 1]],
            locals: ["items"],
        },
        blocks: [
            {
                statements: [
                    ["append", ["get", ["item"]]],
                    ["block", ["if"], [["get", ["item", "ok"]]], null, 2],
                ],
                locals: ["item"],
            },
            { statements: [["text", "empty"]] },
            { statements: [["append", ["get", ["items"]]]] },
            { statements: [["text", "unused"]] },
        ],
    }));
    let compiled = env.compile(&t).unwrap();

    assert_eq!(
        compiled.main.opcodes,
        [Opcode::Block {
            helper: each,
            args: positional(vec![local(1, &[])]),
            default: Some(BlockId(0)),
            inverse: Some(BlockId(1)),
        }]
    );
    assert_eq!(
        compiled.block(BlockId(0)).unwrap().opcodes,
        [
            Opcode::Append {
                expr: local(2, &[]),
                trusting: false,
            },
            Opcode::Block {
                helper: if_,
                args: positional(vec![local(2, &["ok"])]),
                default: Some(BlockId(2)),
                inverse: None,
            },
        ]
    );
    assert_eq!(
        compiled.block(BlockId(1)).unwrap().opcodes,
        [Opcode::Text("empty".into())]
    );
    // Outer locals stay in scope in nested blocks.
    assert_eq!(
        compiled.block(BlockId(2)).unwrap().opcodes,
        [Opcode::Append {
            expr: local(1, &[]),
            trusting: false,
        }]
    );
    assert_eq!(compiled.block(BlockId(3)), None);
    assert_eq!(compiled.blocks.len(), 4);
}

#[test]
fn compile_inner_local_shadows_outer() {
    let mut env = Environment::new();
    env.add_helper("with");
    let t = template(spec!({
        main: {
            statements: [["block", ["with"], null, null, 0]],
            locals: ["x"],
        },
        blocks: [{ statements: [["append", ["get", ["x"]]]], locals: ["x"] }],
    }));
    let compiled = env.compile(&t).unwrap();
    assert_eq!(
        compiled.block(BlockId(0)).unwrap().opcodes,
        [Opcode::Append {
            expr: local(2, &[]),
            trusting: false,
        }]
    );
}

#[test]
fn compile_yield_and_named_args() {
    let t = template(spec!({
        main: {
            statements: [["yield", "default", [["arg", ["title", "text"]]]]],
            named: ["title"],
            yields: ["default"],
        },
    }));
    let compiled = Environment::new().compile(&t).unwrap();
    assert_eq!(
        compiled.main.opcodes,
        [Opcode::Yield {
            block: Symbol(2),
            args: positional(vec![local(1, &["text"])]),
        }]
    );
}

#[test]
fn compile_unknown_resolution() {
    let mut env = Environment::new();
    let now = env.add_helper("now");

    let opcodes = compile(
        &env,
        &["user"],
        spec!([
            ["append", ["unknown", ["now"]]],
            ["append", ["unknown", ["user", "name"]]],
            ["append", ["unknown", ["title"]]],
        ]),
    )
    .unwrap();
    let exprs: Vec<_> = opcodes.iter().flat_map(Opcode::exprs).cloned().collect();
    assert_eq!(
        exprs,
        [
            CompiledExpr::Helper {
                helper: now,
                args: CompiledArgs::default(),
            },
            local(1, &["name"]),
            CompiledExpr::SelfGet(vec!["title".into()]),
        ]
    );
}

#[test]
fn compile_unknown_strict() {
    let mut env = Environment::new();
    env.set_strict(true);
    let err = compile(&env, &[], spec!([["append", ["unknown", ["title"]]]])).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnresolvedSymbol("title".into()));
    assert_eq!(err.syntax(), Some(SyntaxKind::Unknown));
    assert!(err.is_resolution_failure());
}

#[test]
fn compile_helper_with_hash() {
    let mut env = Environment::new();
    let date = env.add_helper("format.date");
    let opcodes = compile(
        &env,
        &["d"],
        spec!([[
            "append",
            ["helper", ["format", "date"], [["get", ["d"]]], { style: "short", tz: null }],
        ]]),
    )
    .unwrap();
    assert_eq!(
        opcodes,
        [Opcode::Append {
            expr: CompiledExpr::Helper {
                helper: date,
                args: CompiledArgs {
                    positional: vec![local(1, &[])],
                    named: vec![
                        ("style".into(), CompiledExpr::Value(Literal::from("short"))),
                        ("tz".into(), CompiledExpr::Value(Literal::Null)),
                    ],
                },
            },
            trusting: false,
        }]
    );
}

#[test]
fn compile_err_unknown_helper() {
    let err = compile(
        &Environment::new(),
        &[],
        spec!([["append", ["helper", ["missing"]]]]),
    )
    .unwrap_err();
    assert_err(
        &err,
        "unknown helper `missing` in `helper` syntax",
        "
unknown helper `missing`
  --> syntax: helper
  --> block: main
",
    );
}

#[test]
fn compile_err_in_nested_block() {
    let mut env = Environment::new();
    env.add_helper("if");
    let t = template(spec!({
        main: { statements: [["block", ["if"], [true], null, 0, 1]] },
        blocks: [
            { statements: [["text", "yes"]] },
            { statements: [["append", ["get", ["missing"]]]] },
        ],
    }));
    let err = env.compile(&t).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnresolvedSymbol("missing".into()));
    assert_eq!(err.syntax(), Some(SyntaxKind::Get));
    assert_eq!(err.block(), Some(1));
}

#[test]
fn compile_err_block_cycle() {
    let mut env = Environment::new();
    env.add_helper("if");
    let t = template(spec!({
        main: { statements: [["block", ["if"], null, null, 0]] },
        blocks: [{ statements: [["block", ["if"], null, null, 0]] }],
    }));
    let err = env.compile(&t).unwrap_err();
    assert_eq!(
        err.kind(),
        &ErrorKind::MalformedSpec("block 0 is referenced more than once".into())
    );
    assert_eq!(err.block(), Some(0));
}

#[test]
fn compile_err_block_referenced_twice() {
    let mut env = Environment::new();
    env.add_helper("if");
    let t = template(spec!({
        main: {
            statements: [
                ["block", ["if"], null, null, 0],
                ["block", ["if"], null, null, null, 0],
            ],
        },
        blocks: [{ statements: [] }],
    }));
    let err = env.compile(&t).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::MalformedSpec(_)));
}

#[test]
fn compile_err_max_depth() {
    let mut env = Environment::new();
    env.add_helper("if");
    env.set_max_depth(2);
    let t = template(spec!({
        main: { statements: [["block", ["if"], null, null, 0]] },
        blocks: [
            { statements: [["block", ["if"], null, null, 1]] },
            { statements: [["block", ["if"], null, null, 2]] },
            { statements: [["text", "deep"]] },
        ],
    }));
    let err = env.compile(&t).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::MaxDepth(2));
    assert_eq!(err.block(), Some(2));

    env.set_max_depth(3);
    let compiled = env.compile(&t).unwrap();
    assert_eq!(
        compiled.block(BlockId(2)).unwrap().opcodes,
        [Opcode::Text("deep".into())]
    );
}

#[test]
fn compile_err_unimplemented_statement() {
    let t = template(spec!({ main: { statements: [["text", "a"], ["partial", "nav"]] } }));
    let err = Environment::new().compile(&t).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Unimplemented("partial".into()));
    assert_eq!(err.fragment(), Some(r#"["partial","nav"]"#));
}

#[test]
fn compile_err_template_index_out_of_range() {
    let mut env = Environment::new();
    env.add_helper("if");
    let t = template(spec!({ main: { statements: [["block", ["if"], null, null, 0]] } }));
    let err = env.compile(&t).unwrap_err();
    assert_err(
        &err,
        "malformed specification: template index 0 for `default` is out of range, there are 0 templates in `block` syntax",
        r#"
malformed specification: template index 0 for `default` is out of range, there are 0 templates
  --> syntax: block
  --> block: main
   |
   | ["block",["if"],null,null,0]
   |
"#,
    );
}

#[test]
fn compile_err_serialized_template_shape() {
    let err = SerializedTemplate::from_value(&spec!({ blocks: [] })).unwrap_err();
    assert_eq!(
        err.kind(),
        &ErrorKind::MalformedSpec("template is missing `main`".into())
    );
    assert!(SerializedTemplate::from_value(&spec!([])).is_err());
    assert!(SerializedTemplate::from_value(&spec!({ main: { statements: "x" } })).is_err());
    assert!(
        SerializedTemplate::from_value(&spec!({ main: { statements: [], locals: [1] } })).is_err()
    );
}
