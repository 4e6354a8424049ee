#![allow(dead_code)]

use weft::syntax::{Statement, StatementSyntax, Syntax};
use weft::{Environment, Error, Opcode, OpcodeBuilder, Program, RawTemplate, SymbolTable, Value};

/// Reconstruct a single statement with no nested templates.
#[track_caller]
pub fn statement(spec: Value) -> Statement {
    Statement::from_spec(&spec, &[]).unwrap()
}

/// Reconstruct a program from statement specs and compile it against a
/// scope with the given locals.
pub fn compile(
    env: &Environment,
    locals: &[&str],
    statements: Value,
) -> Result<Vec<Opcode>, Error> {
    let program = Program::from_spec(&statements, &[])?;
    let raw = RawTemplate {
        locals: locals.iter().map(|s| s.to_string()).collect(),
        ..RawTemplate::default()
    };
    let mut target = OpcodeBuilder::new(SymbolTable::new().child(&raw));
    program.compile(&mut target, env)?;
    Ok(target.into_opcodes())
}

/// Returns the pretty-printed form of a statement.
pub fn pretty(stmt: &Statement) -> String {
    stmt.pretty_print().to_string()
}

#[track_caller]
pub fn assert_err(err: &Error, display: &str, pretty: &str) {
    let display_pretty = format!("{err:#}");
    assert_eq!(err.to_string(), display);
    assert_eq!(display_pretty, pretty.trim_start_matches('\n'));
}
