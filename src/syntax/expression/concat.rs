use crate::compile::{CompileInto, CompiledExpr};
use crate::pretty::{PrettyPrint, PrettyPrintValue};
use crate::spec::{RawTemplate, SpecReader};
use crate::syntax::{Expression, ExpressionSyntax, Syntax, SyntaxKind};
use crate::{Environment, Result, Value};

/// String concatenation, `["concat", parts]`, as produced for attribute
/// values like `class="a {{b}}"`.
#[derive(Debug, Clone, PartialEq)]
pub struct Concat {
    pub parts: Vec<Expression>,
}

impl Syntax for Concat {
    fn kind(&self) -> SyntaxKind {
        SyntaxKind::Concat
    }

    fn from_spec(spec: &Value, templates: &[RawTemplate]) -> Result<Self> {
        let mut r = SpecReader::new(SyntaxKind::Concat, spec)?;
        let parts = r
            .list("parts")?
            .iter()
            .map(|part| Expression::from_spec(part, templates))
            .collect::<Result<_>>()?;
        r.finish()?;
        Ok(Self { parts })
    }
}

impl ExpressionSyntax for Concat {
    fn compile(&self, target: &mut dyn CompileInto, env: &Environment) -> Result<CompiledExpr> {
        self.parts
            .iter()
            .map(|part| part.compile(target, env))
            .collect::<Result<_>>()
            .map(CompiledExpr::Concat)
    }

    fn pretty_print(&self) -> PrettyPrintValue {
        let parts = self.parts.iter().map(ExpressionSyntax::pretty_print).collect();
        PrettyPrint::new(self.kind().as_str(), self.kind().as_str())
            .params(Some(parts))
            .into()
    }
}
