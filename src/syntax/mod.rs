//! The syntax node taxonomy and the contract every node satisfies.
//!
//! A template body is a [`Program`][crate::Program] of
//! [**statements**](#statements). Statements own
//! [**expressions**](#expressions). Every node is identified by a
//! [`SyntaxKind`] and can be reconstructed from its serialized specification,
//! a [`Value`] list whose first element is the kind's string form.
//!
//! # Statements
//!
//! Statements compile by appending [`Opcode`][crate::Opcode]s to a
//! [`CompileInto`] target.
//!
//! | Kind            | Specification                                             |
//! | --------------- | --------------------------------------------------------- |
//! | `text`          | `["text", content]`                                       |
//! | `comment`       | `["comment", value]`                                      |
//! | `append`        | `["append", expr, trusting?]`                             |
//! | `block`         | `["block", path, params?, hash?, default?, inverse?]`     |
//! | `open-element`  | `["open-element", tag, block_params?]`                    |
//! | `close-element` | `["close-element"]`                                       |
//! | `yield`         | `["yield", to, params?]`                                  |
//! | `static-attr`   | `["static-attr", name, value, namespace?]`                |
//! | `dynamic-attr`  | `["dynamic-attr", name, expr, namespace?]`                |
//! | `dynamic-prop`  | `["dynamic-prop", name, expr]`                            |
//!
//! The last three form the attribute family, see [`Attribute`].
//!
//! # Expressions
//!
//! Expressions compile into a single [`CompiledExpr`][crate::CompiledExpr].
//!
//! | Kind      | Specification                         |
//! | --------- | ------------------------------------- |
//! | `value`   | `null`, a boolean, number or string   |
//! | `get`     | `["get", path]`                       |
//! | `arg`     | `["arg", path]`                       |
//! | `unknown` | `["unknown", path]`                   |
//! | `helper`  | `["helper", path, params?, hash?]`    |
//! | `concat`  | `["concat", parts]`                   |
//!
//! A `path` is a non-empty list of strings, `params` a list of expressions
//! and `hash` a map of expressions.
//!
//! # Optional fields
//!
//! A trailing field marked `?` may be omitted or `null`, both of which mean
//! the field is absent. An explicit empty list or map is *present but empty*
//! and is kept distinct, for example in the pretty-printed form.
//!
//! # Implementing a node type
//!
//! Reconstruction is a required method, so a node type that forgets it does
//! not compile.
//!
//! ```compile_fail
//! use weft::syntax::{Syntax, SyntaxKind};
//!
//! struct Partial;
//!
//! impl Syntax for Partial {
//!     fn kind(&self) -> SyntaxKind {
//!         SyntaxKind::Text
//!     }
//! }
//! ```

mod args;
mod expression;
mod kind;
mod statement;

pub use crate::syntax::args::Args;
pub use crate::syntax::expression::{
    Arg, Concat, Expression, Get, Helper, Literal, Path, Unknown,
};
pub use crate::syntax::kind::{SyntaxFamily, SyntaxKind};
pub use crate::syntax::statement::{
    Append, Attribute, AttributeSyntax, Block, CloseElement, Comment, DynamicAttr, DynamicProp,
    Lookup, OpenElement, Statement, StaticAttr, Text, Yield,
};

use crate::compile::{CompileInto, CompiledExpr};
use crate::pretty::{PrettyPrint, PrettyPrintValue};
use crate::spec::RawTemplate;
use crate::{Environment, Result, Value};

/// The protocol shared by every syntax node.
///
/// Pretty-printing is not part of this trait, each family supplies its own
/// default in [`StatementSyntax`] and [`ExpressionSyntax`].
pub trait Syntax: Sized {
    /// The discriminant used for dispatch, pretty-printing and lookup keys.
    fn kind(&self) -> SyntaxKind;

    /// Reconstruct the node from its serialized specification.
    ///
    /// `templates` is the table of nested raw templates that block indices
    /// in the specification refer to. Reconstruction is deterministic and
    /// never yields a partially constructed node.
    fn from_spec(spec: &Value, templates: &[RawTemplate]) -> Result<Self>;
}

/// A renderable unit of a template.
///
/// Statements are cloned with [`Clone`]. A clone is a shallow copy of the
/// node's own fields and is never linked into a program.
pub trait StatementSyntax: Syntax + Clone {
    /// Append the opcodes for this statement to the target.
    fn compile(&self, target: &mut dyn CompileInto, env: &Environment) -> Result<()>;

    /// Returns a structural debug representation of the statement.
    ///
    /// Defaults to a node whose type and operation are both the kind, with no
    /// params, hash or templates.
    fn pretty_print(&self) -> PrettyPrintValue {
        let kind = self.kind().as_str();
        PrettyPrint::new(kind, kind).into()
    }
}

/// A value producing term of a template.
pub trait ExpressionSyntax: Syntax {
    /// Compile the expression into a handle the VM understands.
    fn compile(&self, target: &mut dyn CompileInto, env: &Environment) -> Result<CompiledExpr>;

    /// Returns a structural debug representation of the expression.
    ///
    /// Defaults to the bare kind.
    fn pretty_print(&self) -> PrettyPrintValue {
        PrettyPrintValue::String(self.kind().as_str().to_owned())
    }
}
