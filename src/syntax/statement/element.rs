use crate::compile::{CompileInto, Opcode};
use crate::pretty::{PrettyPrint, PrettyPrintValue};
use crate::spec::{RawTemplate, SpecReader};
use crate::syntax::{StatementSyntax, Syntax, SyntaxKind};
use crate::{Environment, Result, Value};

/// Opens an element, `["open-element", tag, block_params?]`.
///
/// Attribute statements that follow apply to this element until the next
/// [`CloseElement`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenElement {
    pub tag: String,
    /// Block parameters declared on the element, for component invocations.
    pub block_params: Option<Vec<String>>,
}

/// Closes the most recently opened element, `["close-element"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CloseElement;

impl OpenElement {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            block_params: None,
        }
    }
}

impl Syntax for OpenElement {
    fn kind(&self) -> SyntaxKind {
        SyntaxKind::OpenElement
    }

    fn from_spec(spec: &Value, _: &[RawTemplate]) -> Result<Self> {
        let mut r = SpecReader::new(SyntaxKind::OpenElement, spec)?;
        let tag = r.string("tag")?;
        if tag.is_empty() {
            return Err(r.error("element tag must not be empty"));
        }
        let block_params = match r.list_opt("block_params")? {
            None => None,
            Some(list) => Some(
                list.iter()
                    .map(|v| match v {
                        Value::String(s) => Ok(s.clone()),
                        v => Err(r.error(format!(
                            "expected string in `block_params`, found {}",
                            v.human()
                        ))),
                    })
                    .collect::<Result<_>>()?,
            ),
        };
        r.finish()?;
        Ok(Self { tag, block_params })
    }
}

impl StatementSyntax for OpenElement {
    fn compile(&self, target: &mut dyn CompileInto, _: &Environment) -> Result<()> {
        target.append(Opcode::OpenElement {
            tag: self.tag.clone(),
        });
        Ok(())
    }

    fn pretty_print(&self) -> PrettyPrintValue {
        let mut pp = PrettyPrint::new(self.kind().as_str(), self.kind().as_str())
            .params(Some(vec![self.tag.as_str().into()]));
        if let Some(block_params) = &self.block_params {
            let list = block_params.iter().map(|p| p.as_str().into()).collect();
            pp = pp.hash(Some(
                [("as".to_owned(), PrettyPrintValue::List(list))].into_iter().collect(),
            ));
        }
        pp.into()
    }
}

impl Syntax for CloseElement {
    fn kind(&self) -> SyntaxKind {
        SyntaxKind::CloseElement
    }

    fn from_spec(spec: &Value, _: &[RawTemplate]) -> Result<Self> {
        SpecReader::new(SyntaxKind::CloseElement, spec)?.finish()?;
        Ok(Self)
    }
}

impl StatementSyntax for CloseElement {
    fn compile(&self, target: &mut dyn CompileInto, _: &Environment) -> Result<()> {
        target.append(Opcode::CloseElement);
        Ok(())
    }
}
