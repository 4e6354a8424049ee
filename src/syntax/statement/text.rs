use crate::compile::{CompileInto, Opcode};
use crate::pretty::{PrettyPrint, PrettyPrintValue};
use crate::spec::{RawTemplate, SpecReader};
use crate::syntax::{StatementSyntax, Syntax, SyntaxKind};
use crate::{Environment, Result, Value};

/// Static text content, `["text", content]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub content: String,
}

/// A comment node, `["comment", value]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub value: String,
}

impl Text {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

impl Comment {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

impl Syntax for Text {
    fn kind(&self) -> SyntaxKind {
        SyntaxKind::Text
    }

    fn from_spec(spec: &Value, _: &[RawTemplate]) -> Result<Self> {
        let mut r = SpecReader::new(SyntaxKind::Text, spec)?;
        let content = r.string("content")?;
        r.finish()?;
        Ok(Self { content })
    }
}

impl StatementSyntax for Text {
    fn compile(&self, target: &mut dyn CompileInto, _: &Environment) -> Result<()> {
        target.append(Opcode::Text(self.content.clone()));
        Ok(())
    }

    fn pretty_print(&self) -> PrettyPrintValue {
        PrettyPrint::new(self.kind().as_str(), self.kind().as_str())
            .params(Some(vec![format!("{:?}", self.content).into()]))
            .into()
    }
}

impl Syntax for Comment {
    fn kind(&self) -> SyntaxKind {
        SyntaxKind::Comment
    }

    fn from_spec(spec: &Value, _: &[RawTemplate]) -> Result<Self> {
        let mut r = SpecReader::new(SyntaxKind::Comment, spec)?;
        let value = r.string("value")?;
        r.finish()?;
        Ok(Self { value })
    }
}

impl StatementSyntax for Comment {
    fn compile(&self, target: &mut dyn CompileInto, _: &Environment) -> Result<()> {
        target.append(Opcode::Comment(self.value.clone()));
        Ok(())
    }

    fn pretty_print(&self) -> PrettyPrintValue {
        PrettyPrint::new(self.kind().as_str(), self.kind().as_str())
            .params(Some(vec![format!("{:?}", self.value).into()]))
            .into()
    }
}
