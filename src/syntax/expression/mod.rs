mod concat;
mod helper;
mod literal;
mod path;

pub use crate::syntax::expression::concat::Concat;
pub use crate::syntax::expression::helper::Helper;
pub use crate::syntax::expression::literal::Literal;
pub use crate::syntax::expression::path::{Arg, Get, Path, Unknown};

use crate::compile::{CompileInto, CompiledExpr};
use crate::pretty::PrettyPrintValue;
use crate::spec::{self, RawTemplate};
use crate::syntax::{ExpressionSyntax, Syntax, SyntaxKind};
use crate::{Environment, Error, Result, Value};

/// Any expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Value(Literal),
    Get(Get),
    Arg(Arg),
    Unknown(Unknown),
    Helper(Helper),
    Concat(Concat),
}

impl Syntax for Expression {
    fn kind(&self) -> SyntaxKind {
        match self {
            Self::Value(e) => e.kind(),
            Self::Get(e) => e.kind(),
            Self::Arg(e) => e.kind(),
            Self::Unknown(e) => e.kind(),
            Self::Helper(e) => e.kind(),
            Self::Concat(e) => e.kind(),
        }
    }

    /// Reconstruct whichever expression the specification describes.
    ///
    /// Scalars are literals, lists are dispatched on their discriminant.
    fn from_spec(spec: &Value, templates: &[RawTemplate]) -> Result<Self> {
        if spec.is_scalar() {
            return Literal::from_spec(spec, templates).map(Self::Value);
        }
        let name = match spec::discriminant(spec) {
            Some(name) => name,
            None => {
                return Err(Error::malformed(
                    format!("expected expression, found {}", spec.human()),
                    spec,
                ))
            }
        };
        match name.parse::<SyntaxKind>() {
            Ok(SyntaxKind::Get) => Get::from_spec(spec, templates).map(Self::Get),
            Ok(SyntaxKind::Arg) => Arg::from_spec(spec, templates).map(Self::Arg),
            Ok(SyntaxKind::Unknown) => Unknown::from_spec(spec, templates).map(Self::Unknown),
            Ok(SyntaxKind::Helper) => Helper::from_spec(spec, templates).map(Self::Helper),
            Ok(SyntaxKind::Concat) => Concat::from_spec(spec, templates).map(Self::Concat),
            Ok(kind) => Err(Error::malformed(
                format!("expected expression, found `{kind}` syntax"),
                spec,
            )),
            Err(()) => Err(Error::unimplemented(name, spec)),
        }
    }
}

impl ExpressionSyntax for Expression {
    fn compile(&self, target: &mut dyn CompileInto, env: &Environment) -> Result<CompiledExpr> {
        let result = match self {
            Self::Value(e) => e.compile(target, env),
            Self::Get(e) => e.compile(target, env),
            Self::Arg(e) => e.compile(target, env),
            Self::Unknown(e) => e.compile(target, env),
            Self::Helper(e) => e.compile(target, env),
            Self::Concat(e) => e.compile(target, env),
        };
        result.map_err(|err| err.with_syntax(self.kind()))
    }

    fn pretty_print(&self) -> PrettyPrintValue {
        match self {
            Self::Value(e) => e.pretty_print(),
            Self::Get(e) => e.pretty_print(),
            Self::Arg(e) => e.pretty_print(),
            Self::Unknown(e) => e.pretty_print(),
            Self::Helper(e) => e.pretty_print(),
            Self::Concat(e) => e.pretty_print(),
        }
    }
}

impl From<Literal> for Expression {
    fn from(lit: Literal) -> Self {
        Self::Value(lit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{spec, ErrorKind};

    #[test]
    fn expression_from_spec_literal() {
        let e = Expression::from_spec(&spec!("greeting"), &[]).unwrap();
        assert_eq!(e, Expression::Value(Literal::String("greeting".into())));
        assert_eq!(e.kind(), SyntaxKind::Value);
    }

    #[test]
    fn expression_from_spec_unknown_discriminant() {
        let err = Expression::from_spec(&spec!(["partial", "x"]), &[]).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::Unimplemented("partial".into()));
        assert_eq!(err.fragment(), Some(r#"["partial","x"]"#));
    }

    #[test]
    fn expression_from_spec_statement_in_expression_position() {
        let err = Expression::from_spec(&spec!(["text", "x"]), &[]).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::MalformedSpec(_)));
    }

    #[test]
    fn expression_from_spec_map() {
        let err = Expression::from_spec(&spec!({ a: 1 }), &[]).unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::MalformedSpec("expected expression, found map".into())
        );
    }
}
