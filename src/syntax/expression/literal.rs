use std::fmt;

use crate::compile::{CompileInto, CompiledExpr};
use crate::pretty::PrettyPrintValue;
use crate::spec::RawTemplate;
use crate::syntax::{ExpressionSyntax, Syntax, SyntaxKind};
use crate::{Environment, Error, Result, Value};

/// A literal value, serialized as a bare scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl Syntax for Literal {
    fn kind(&self) -> SyntaxKind {
        SyntaxKind::Value
    }

    fn from_spec(spec: &Value, _: &[RawTemplate]) -> Result<Self> {
        match spec {
            Value::None => Ok(Self::Null),
            Value::Bool(b) => Ok(Self::Bool(*b)),
            Value::Integer(i) => Ok(Self::Integer(*i)),
            Value::Float(f) => Ok(Self::Float(*f)),
            Value::String(s) => Ok(Self::String(s.clone())),
            v => Err(Error::malformed(
                format!("expected literal, found {}", v.human()),
                spec,
            )
            .with_syntax(SyntaxKind::Value)),
        }
    }
}

impl ExpressionSyntax for Literal {
    fn compile(&self, _: &mut dyn CompileInto, _: &Environment) -> Result<CompiledExpr> {
        Ok(CompiledExpr::Value(self.clone()))
    }

    fn pretty_print(&self) -> PrettyPrintValue {
        PrettyPrintValue::String(self.to_string())
    }
}

impl From<&str> for Literal {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl From<String> for Literal {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(n) => write!(f, "{n:?}"),
            Self::String(s) => write!(f, "{s:?}"),
        }
    }
}
