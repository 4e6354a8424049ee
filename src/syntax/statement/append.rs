use crate::compile::{CompileInto, Opcode};
use crate::pretty::{PrettyPrint, PrettyPrintValue};
use crate::spec::{RawTemplate, SpecReader};
use crate::syntax::{Expression, ExpressionSyntax, StatementSyntax, Syntax, SyntaxKind};
use crate::{Environment, Result, Value};

/// Dynamic output, `["append", expr, trusting?]`.
///
/// A trusting append emits its value without escaping, `{{{ html }}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Append {
    pub value: Expression,
    pub trusting: bool,
}

impl Append {
    pub fn new(value: impl Into<Expression>) -> Self {
        Self {
            value: value.into(),
            trusting: false,
        }
    }
}

impl Syntax for Append {
    fn kind(&self) -> SyntaxKind {
        SyntaxKind::Append
    }

    fn from_spec(spec: &Value, templates: &[RawTemplate]) -> Result<Self> {
        let mut r = SpecReader::new(SyntaxKind::Append, spec)?;
        let value = Expression::from_spec(r.next("value")?, templates)?;
        let trusting = r.bool_opt("trusting")?.unwrap_or(false);
        r.finish()?;
        Ok(Self { value, trusting })
    }
}

impl StatementSyntax for Append {
    fn compile(&self, target: &mut dyn CompileInto, env: &Environment) -> Result<()> {
        let expr = self.value.compile(target, env)?;
        target.append(Opcode::Append {
            expr,
            trusting: self.trusting,
        });
        Ok(())
    }

    fn pretty_print(&self) -> PrettyPrintValue {
        let operation = if self.trusting { "trusting-append" } else { "append" };
        PrettyPrint::new(self.kind().as_str(), operation)
            .params(Some(vec![self.value.pretty_print()]))
            .into()
    }
}
