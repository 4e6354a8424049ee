mod append;
mod attribute;
mod block;
mod element;
mod text;

pub use crate::syntax::statement::append::Append;
pub use crate::syntax::statement::attribute::{
    Attribute, AttributeSyntax, DynamicAttr, DynamicProp, Lookup, StaticAttr,
};
pub use crate::syntax::statement::block::{Block, Yield};
pub use crate::syntax::statement::element::{CloseElement, OpenElement};
pub use crate::syntax::statement::text::{Comment, Text};

use crate::compile::CompileInto;
use crate::pretty::PrettyPrintValue;
use crate::spec::{self, RawTemplate};
use crate::syntax::{StatementSyntax, Syntax, SyntaxFamily, SyntaxKind};
use crate::{Environment, Error, Result, Value};

/// Any statement node.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Text(Text),
    Comment(Comment),
    Append(Append),
    Block(Block),
    OpenElement(OpenElement),
    CloseElement(CloseElement),
    Yield(Yield),
    Attribute(Attribute),
}

impl Statement {
    /// Whether this statement belongs to the attribute family.
    pub fn is_attribute(&self) -> bool {
        self.kind().family() == SyntaxFamily::Attribute
    }

    pub fn as_attribute(&self) -> Option<&Attribute> {
        match self {
            Self::Attribute(attr) => Some(attr),
            _ => None,
        }
    }

    /// Indices of the nested templates this statement references.
    pub fn nested_blocks(&self) -> Vec<usize> {
        match self {
            Self::Block(block) => block.default.into_iter().chain(block.inverse).collect(),
            _ => Vec::new(),
        }
    }
}

impl Syntax for Statement {
    fn kind(&self) -> SyntaxKind {
        match self {
            Self::Text(s) => s.kind(),
            Self::Comment(s) => s.kind(),
            Self::Append(s) => s.kind(),
            Self::Block(s) => s.kind(),
            Self::OpenElement(s) => s.kind(),
            Self::CloseElement(s) => s.kind(),
            Self::Yield(s) => s.kind(),
            Self::Attribute(s) => s.kind(),
        }
    }

    /// Reconstruct whichever statement the specification describes.
    fn from_spec(spec: &Value, templates: &[RawTemplate]) -> Result<Self> {
        let name = match spec::discriminant(spec) {
            Some(name) => name,
            None => {
                return Err(Error::malformed(
                    format!("expected statement, found {}", spec.human()),
                    spec,
                ))
            }
        };
        let kind = match name.parse::<SyntaxKind>() {
            Ok(kind) => kind,
            Err(()) => return Err(Error::unimplemented(name, spec)),
        };
        match kind {
            SyntaxKind::Text => Text::from_spec(spec, templates).map(Self::Text),
            SyntaxKind::Comment => Comment::from_spec(spec, templates).map(Self::Comment),
            SyntaxKind::Append => Append::from_spec(spec, templates).map(Self::Append),
            SyntaxKind::Block => Block::from_spec(spec, templates).map(Self::Block),
            SyntaxKind::OpenElement => {
                OpenElement::from_spec(spec, templates).map(Self::OpenElement)
            }
            SyntaxKind::CloseElement => {
                CloseElement::from_spec(spec, templates).map(Self::CloseElement)
            }
            SyntaxKind::Yield => Yield::from_spec(spec, templates).map(Self::Yield),
            kind if kind.is_attribute() => {
                Attribute::from_spec(spec, templates).map(Self::Attribute)
            }
            kind => Err(Error::malformed(
                format!("expected statement, found `{kind}` syntax"),
                spec,
            )),
        }
    }
}

impl StatementSyntax for Statement {
    fn compile(&self, target: &mut dyn CompileInto, env: &Environment) -> Result<()> {
        let result = match self {
            Self::Text(s) => s.compile(target, env),
            Self::Comment(s) => s.compile(target, env),
            Self::Append(s) => s.compile(target, env),
            Self::Block(s) => s.compile(target, env),
            Self::OpenElement(s) => s.compile(target, env),
            Self::CloseElement(s) => s.compile(target, env),
            Self::Yield(s) => s.compile(target, env),
            Self::Attribute(s) => s.compile(target, env),
        };
        result.map_err(|err| err.with_syntax(self.kind()))
    }

    fn pretty_print(&self) -> PrettyPrintValue {
        match self {
            Self::Text(s) => s.pretty_print(),
            Self::Comment(s) => s.pretty_print(),
            Self::Append(s) => s.pretty_print(),
            Self::Block(s) => s.pretty_print(),
            Self::OpenElement(s) => s.pretty_print(),
            Self::CloseElement(s) => s.pretty_print(),
            Self::Yield(s) => s.pretty_print(),
            Self::Attribute(s) => s.pretty_print(),
        }
    }
}

macro_rules! impl_from_statement {
    ($($ty:ident)+) => {
        $(
            impl From<$ty> for Statement {
                fn from(s: $ty) -> Self {
                    Self::$ty(s)
                }
            }
        )+
    };
}

impl_from_statement! { Text Comment Append Block OpenElement CloseElement Yield Attribute }

impl From<StaticAttr> for Statement {
    fn from(attr: StaticAttr) -> Self {
        Self::Attribute(Attribute::Static(attr))
    }
}

impl From<DynamicAttr> for Statement {
    fn from(attr: DynamicAttr) -> Self {
        Self::Attribute(Attribute::Dynamic(attr))
    }
}

impl From<DynamicProp> for Statement {
    fn from(attr: DynamicProp) -> Self {
        Self::Attribute(Attribute::Property(attr))
    }
}
