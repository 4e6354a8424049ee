use std::collections::BTreeMap;

use crate::compile::{BlockId, CompileInto, Opcode};
use crate::pretty::{PrettyPrint, PrettyPrintValue};
use crate::spec::{RawTemplate, SpecReader};
use crate::syntax::{Args, Path, StatementSyntax, Syntax, SyntaxKind};
use crate::{Environment, Error, Result, Value};

/// A block helper invocation,
/// `["block", path, params?, hash?, default?, inverse?]`.
///
/// `default` and `inverse` are indices into the nested template table. They
/// are shared with clones, the nested templates themselves are never copied.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub path: Path,
    pub args: Args,
    pub default: Option<usize>,
    pub inverse: Option<usize>,
}

/// Renders a block passed to the template, `["yield", to, params?]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Yield {
    pub to: String,
    pub args: Args,
}

impl Syntax for Block {
    fn kind(&self) -> SyntaxKind {
        SyntaxKind::Block
    }

    fn from_spec(spec: &Value, templates: &[RawTemplate]) -> Result<Self> {
        let mut r = SpecReader::new(SyntaxKind::Block, spec)?;
        let path = Path::read(&mut r)?;
        let args = Args::read(&mut r, templates)?;
        let default = r.template_opt("default", templates)?;
        let inverse = r.template_opt("inverse", templates)?;
        r.finish()?;
        Ok(Self {
            path,
            args,
            default,
            inverse,
        })
    }
}

impl StatementSyntax for Block {
    fn compile(&self, target: &mut dyn CompileInto, env: &Environment) -> Result<()> {
        let name = self.path.to_string();
        let helper = env
            .lookup_helper(&name)
            .ok_or_else(|| Error::unknown_helper(name))?;
        let args = self.args.compile(target, env)?;
        target.append(Opcode::Block {
            helper,
            args,
            default: self.default.map(BlockId),
            inverse: self.inverse.map(BlockId),
        });
        Ok(())
    }

    fn pretty_print(&self) -> PrettyPrintValue {
        let templates: BTreeMap<String, usize> = [("default", self.default), ("inverse", self.inverse)]
            .into_iter()
            .filter_map(|(slot, i)| Some((slot.to_owned(), i?)))
            .collect();
        PrettyPrint::new(self.kind().as_str(), self.path.to_string())
            .params(self.args.pretty_params())
            .hash(self.args.pretty_hash())
            .templates((!templates.is_empty()).then_some(templates))
            .into()
    }
}

impl Syntax for Yield {
    fn kind(&self) -> SyntaxKind {
        SyntaxKind::Yield
    }

    fn from_spec(spec: &Value, templates: &[RawTemplate]) -> Result<Self> {
        let mut r = SpecReader::new(SyntaxKind::Yield, spec)?;
        let to = r.string("to")?;
        let args = Args::read_params_only(&mut r, templates)?;
        r.finish()?;
        Ok(Self { to, args })
    }
}

impl StatementSyntax for Yield {
    fn compile(&self, target: &mut dyn CompileInto, env: &Environment) -> Result<()> {
        let name = format!("&{}", self.to);
        let block = target
            .get_symbol(&name)
            .ok_or_else(|| Error::unresolved_symbol(name))?;
        let args = self.args.compile(target, env)?;
        target.append(Opcode::Yield { block, args });
        Ok(())
    }

    fn pretty_print(&self) -> PrettyPrintValue {
        let hash = [("to".to_owned(), PrettyPrintValue::from(self.to.as_str()))]
            .into_iter()
            .collect();
        PrettyPrint::new(self.kind().as_str(), self.kind().as_str())
            .params(self.args.pretty_params())
            .hash(Some(hash))
            .into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compile::{CompiledArgs, HelperId, OpcodeBuilder, Symbol, SymbolTable};
    use crate::{spec, ErrorKind};

    fn table(n: usize) -> Vec<RawTemplate> {
        (0..n).map(|_| RawTemplate::default()).collect()
    }

    #[test]
    fn block_from_spec() {
        let block = Block::from_spec(
            &spec!(["block", ["each"], [["get", ["this", "items"]]], null, 0, 1]),
            &table(2),
        )
        .unwrap();
        assert_eq!(block.path.to_string(), "each");
        assert_eq!(block.default, Some(0));
        assert_eq!(block.inverse, Some(1));
        assert_eq!(block.args.hash, None);
        assert_eq!(
            block.pretty_print().to_string(),
            "(block:each (get this.items) &default=0 &inverse=1)"
        );
    }

    #[test]
    fn block_template_index_out_of_range() {
        let err = Block::from_spec(&spec!(["block", ["if"], null, null, 2]), &table(2)).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::MalformedSpec(_)));
        assert_eq!(err.syntax(), Some(SyntaxKind::Block));
    }

    #[test]
    fn block_template_index_negative() {
        let err = Block::from_spec(&spec!(["block", ["if"], null, null, -1]), &table(2)).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::MalformedSpec(_)));
    }

    #[test]
    fn block_compile() {
        let mut env = Environment::new();
        let id = env.add_helper("if");
        let block = Block::from_spec(&spec!(["block", ["if"], [true], null, 0]), &table(1)).unwrap();
        let mut target = OpcodeBuilder::default();
        block.compile(&mut target, &env).unwrap();
        assert_eq!(
            target.into_opcodes(),
            [Opcode::Block {
                helper: id,
                args: CompiledArgs {
                    positional: vec![crate::compile::CompiledExpr::Value(
                        crate::syntax::Literal::Bool(true)
                    )],
                    named: vec![],
                },
                default: Some(BlockId(0)),
                inverse: None,
            }]
        );
        assert_eq!(id, HelperId(0));
    }

    #[test]
    fn block_unknown_helper_emits_nothing() {
        let block = Block::from_spec(&spec!(["block", ["each"]]), &[]).unwrap();
        let mut target = OpcodeBuilder::default();
        let err = block.compile(&mut target, &Environment::new()).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnknownHelper("each".into()));
        assert!(target.opcodes().is_empty());
    }

    #[test]
    fn yield_resolves_block_symbol() {
        let y = Yield::from_spec(&spec!(["yield", "default", [1]]), &[]).unwrap();
        let raw = RawTemplate {
            yields: vec!["default".into()],
            ..RawTemplate::default()
        };
        let mut target = OpcodeBuilder::new(SymbolTable::new().child(&raw));
        y.compile(&mut target, &Environment::new()).unwrap();
        assert!(matches!(
            target.opcodes(),
            [Opcode::Yield { block: Symbol(1), .. }]
        ));
        assert_eq!(y.pretty_print().to_string(), "(yield 1 to=default)");
    }

    #[test]
    fn yield_unresolved() {
        let y = Yield::from_spec(&spec!(["yield", "inverse"]), &[]).unwrap();
        let err = y
            .compile(&mut OpcodeBuilder::default(), &Environment::new())
            .unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnresolvedSymbol("&inverse".into()));
    }
}
