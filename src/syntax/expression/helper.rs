use crate::compile::{CompileInto, CompiledExpr};
use crate::pretty::{PrettyPrint, PrettyPrintValue};
use crate::spec::{RawTemplate, SpecReader};
use crate::syntax::{Args, ExpressionSyntax, Path, Syntax, SyntaxKind};
use crate::{Environment, Error, Result, Value};

/// A helper call, `["helper", path, params?, hash?]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Helper {
    pub path: Path,
    pub args: Args,
}

impl Syntax for Helper {
    fn kind(&self) -> SyntaxKind {
        SyntaxKind::Helper
    }

    fn from_spec(spec: &Value, templates: &[RawTemplate]) -> Result<Self> {
        let mut r = SpecReader::new(SyntaxKind::Helper, spec)?;
        let path = Path::read(&mut r)?;
        let args = Args::read(&mut r, templates)?;
        r.finish()?;
        Ok(Self { path, args })
    }
}

impl ExpressionSyntax for Helper {
    fn compile(&self, target: &mut dyn CompileInto, env: &Environment) -> Result<CompiledExpr> {
        let name = self.path.to_string();
        let helper = env
            .lookup_helper(&name)
            .ok_or_else(|| Error::unknown_helper(name))?;
        let args = self.args.compile(target, env)?;
        Ok(CompiledExpr::Helper { helper, args })
    }

    fn pretty_print(&self) -> PrettyPrintValue {
        PrettyPrint::new(self.kind().as_str(), self.path.to_string())
            .params(self.args.pretty_params())
            .hash(self.args.pretty_hash())
            .into()
    }
}
