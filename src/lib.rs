//! An intermediate representation for templates that compiles to a linear
//! opcode stream.
//!
//! # Features
//!
//! - Statement nodes: text, comments, dynamic output, block helpers, elements,
//!   attributes and yields.
//! - Expression nodes: literals, symbol lookups, named arguments, helper
//!   calls and string concatenation.
//! - An ordered, mutable [`Program`] container with stable [`NodeId`]
//!   handles.
//! - Reconstruction of every node from a compact serialized form.
//! - Structural pretty-printing for debugging.
//!
//! # Getting started
//!
//! Your entry point is the [`Environment`] struct. The environment stores
//! the registered helpers and compile options. Generally, you only need to
//! construct one environment during the lifetime of a program.
//!
//! ```
//! let mut env = weft::Environment::new();
//! env.add_helper("if");
//! ```
//!
//! Templates arrive in their serialized form, a main body plus a table of
//! nested blocks. [`.compile`][Environment::compile] reconstructs and
//! compiles the whole template.
//!
//! ```
//! use weft::{spec, Environment, Opcode, SerializedTemplate};
//!
//! let template = SerializedTemplate::from_value(&spec!({
//!     main: {
//!         statements: [
//!             ["open-element", "p"],
//!             ["static-attr", "class", "greeting"],
//!             ["text", "Hello "],
//!             ["append", ["get", ["name"]]],
//!             ["close-element"],
//!         ],
//!         locals: ["name"],
//!     },
//! }))?;
//!
//! let compiled = Environment::new().compile(&template)?;
//! assert_eq!(compiled.main.opcodes.len(), 5);
//! assert_eq!(compiled.main.opcodes[2], Opcode::Text("Hello ".into()));
//! # Ok::<(), weft::Error>(())
//! ```
//!
//! # Working with programs directly
//!
//! A [`Program`] can also be assembled or edited by hand and compiled into
//! any [`CompileInto`] target.
//!
//! ```
//! use weft::syntax::{AttributeSyntax, DynamicAttr, Literal, Text};
//! use weft::{Environment, OpcodeBuilder, Program};
//!
//! let mut program = Program::new();
//! program.push_back(Text::new("Hello"));
//! let attr = DynamicAttr::new("class", Literal::from("greeting"));
//! assert_eq!(attr.lookup_name(), "@class");
//! program.push_back(attr);
//!
//! let mut target = OpcodeBuilder::default();
//! program.compile(&mut target, &Environment::new())?;
//! assert_eq!(target.opcodes().len(), 2);
//!
//! assert_eq!(
//!     program.pretty_print().to_string(),
//!     r#"[(text "Hello") (dynamic-attr class "greeting")]"#
//! );
//! # Ok::<(), weft::Error>(())
//! ```

mod compile;
mod env;
mod error;
mod macros;
mod pretty;
mod program;
mod spec;
pub mod syntax;
mod types;
mod value;

pub use crate::compile::{
    BlockId, CompileInto, CompiledArgs, CompiledBlock, CompiledExpr, CompiledTemplate, HelperId,
    Opcode, OpcodeBuilder, Symbol, SymbolTable,
};
pub use crate::env::Environment;
pub use crate::error::{Error, ErrorKind};
pub use crate::pretty::{PrettyPrint, PrettyPrintValue};
pub use crate::program::{Ids, Iter, NodeId, Program};
pub use crate::spec::{RawTemplate, SerializedTemplate};
pub use crate::value::{List, Map, Value};

/// A type alias for results in this crate.
pub type Result<T> = std::result::Result<T, Error>;
