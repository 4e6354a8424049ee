use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::compile::{CompileInto, Opcode};
use crate::pretty::{PrettyPrint, PrettyPrintValue};
use crate::spec::{self, RawTemplate, SpecReader};
use crate::syntax::{Expression, ExpressionSyntax, Literal, StatementSyntax, Syntax, SyntaxKind};
use crate::{Environment, Error, Result, Value};

/// The attribute family of statements.
///
/// Attributes are set on the element opened by the closest preceding
/// [`OpenElement`][crate::syntax::OpenElement].
pub trait AttributeSyntax: StatementSyntax {
    fn name(&self) -> &str;

    fn namespace(&self) -> Option<&str>;

    /// The key under which a later attribute for the same slot overrides
    /// this one.
    fn lookup_name(&self) -> String {
        format!("@{}", self.name())
    }

    /// Returns the node paired with its lookup symbol, for merging
    /// attributes on the same element by symbol rather than by identity.
    fn to_lookup(&self) -> Lookup<'_, Self> {
        Lookup {
            syntax: self,
            symbol: self.lookup_name(),
        }
    }

    /// The expression computing the attribute's value. Static values are
    /// wrapped in a literal.
    fn value_syntax(&self) -> Cow<'_, Expression>;

    /// Whether this binds as an attribute (`true`) or as a property (`false`).
    fn is_attribute(&self) -> bool;
}

/// An attribute paired with its lookup symbol.
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup<'a, T = Attribute> {
    pub syntax: &'a T,
    pub symbol: String,
}

/// Any attribute statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    Static(StaticAttr),
    Dynamic(DynamicAttr),
    Property(DynamicProp),
}

/// A static attribute, `["static-attr", name, value, namespace?]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticAttr {
    pub name: String,
    pub value: String,
    pub namespace: Option<String>,
}

/// A dynamic attribute, `["dynamic-attr", name, expr, namespace?]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicAttr {
    pub name: String,
    pub value: Expression,
    pub namespace: Option<String>,
}

/// A dynamic property binding, `["dynamic-prop", name, expr]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DynamicProp {
    pub name: String,
    pub value: Expression,
}

impl StaticAttr {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            namespace: None,
        }
    }
}

impl DynamicAttr {
    pub fn new(name: impl Into<String>, value: impl Into<Expression>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            namespace: None,
        }
    }
}

fn read_name(r: &mut SpecReader<'_>) -> Result<String> {
    let name = r.string("name")?;
    if name.is_empty() {
        return Err(r.error("attribute name must not be empty"));
    }
    Ok(name)
}

fn pretty(
    kind: SyntaxKind,
    name: &str,
    value: PrettyPrintValue,
    namespace: Option<&str>,
) -> PrettyPrintValue {
    let hash = namespace.map(|ns| {
        let mut hash = BTreeMap::new();
        hash.insert("namespace".to_owned(), PrettyPrintValue::from(ns));
        hash
    });
    PrettyPrint::new(kind.as_str(), kind.as_str())
        .params(Some(vec![name.into(), value]))
        .hash(hash)
        .into()
}

////////////////////////////////////////////////////////////////////////////////
// StaticAttr
////////////////////////////////////////////////////////////////////////////////

impl Syntax for StaticAttr {
    fn kind(&self) -> SyntaxKind {
        SyntaxKind::StaticAttr
    }

    fn from_spec(spec: &Value, _: &[RawTemplate]) -> Result<Self> {
        let mut r = SpecReader::new(SyntaxKind::StaticAttr, spec)?;
        let name = read_name(&mut r)?;
        let value = r.string("value")?;
        let namespace = r.string_opt("namespace")?;
        r.finish()?;
        Ok(Self {
            name,
            value,
            namespace,
        })
    }
}

impl StatementSyntax for StaticAttr {
    fn compile(&self, target: &mut dyn CompileInto, _: &Environment) -> Result<()> {
        target.append(Opcode::StaticAttr {
            name: self.name.clone(),
            value: self.value.clone(),
            namespace: self.namespace.clone(),
        });
        Ok(())
    }

    fn pretty_print(&self) -> PrettyPrintValue {
        let value = Literal::from(self.value.as_str()).pretty_print();
        pretty(self.kind(), &self.name, value, self.namespace.as_deref())
    }
}

impl AttributeSyntax for StaticAttr {
    fn name(&self) -> &str {
        &self.name
    }

    fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    fn value_syntax(&self) -> Cow<'_, Expression> {
        Cow::Owned(Expression::Value(Literal::from(self.value.as_str())))
    }

    fn is_attribute(&self) -> bool {
        true
    }
}

////////////////////////////////////////////////////////////////////////////////
// DynamicAttr
////////////////////////////////////////////////////////////////////////////////

impl Syntax for DynamicAttr {
    fn kind(&self) -> SyntaxKind {
        SyntaxKind::DynamicAttr
    }

    fn from_spec(spec: &Value, templates: &[RawTemplate]) -> Result<Self> {
        let mut r = SpecReader::new(SyntaxKind::DynamicAttr, spec)?;
        let name = read_name(&mut r)?;
        let value = Expression::from_spec(r.next("value")?, templates)?;
        let namespace = r.string_opt("namespace")?;
        r.finish()?;
        Ok(Self {
            name,
            value,
            namespace,
        })
    }
}

impl StatementSyntax for DynamicAttr {
    fn compile(&self, target: &mut dyn CompileInto, env: &Environment) -> Result<()> {
        let value = self.value.compile(target, env)?;
        target.append(Opcode::DynamicAttr {
            name: self.name.clone(),
            value,
            namespace: self.namespace.clone(),
        });
        Ok(())
    }

    fn pretty_print(&self) -> PrettyPrintValue {
        pretty(
            self.kind(),
            &self.name,
            self.value.pretty_print(),
            self.namespace.as_deref(),
        )
    }
}

impl AttributeSyntax for DynamicAttr {
    fn name(&self) -> &str {
        &self.name
    }

    fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    fn value_syntax(&self) -> Cow<'_, Expression> {
        Cow::Borrowed(&self.value)
    }

    fn is_attribute(&self) -> bool {
        true
    }
}

////////////////////////////////////////////////////////////////////////////////
// DynamicProp
////////////////////////////////////////////////////////////////////////////////

impl Syntax for DynamicProp {
    fn kind(&self) -> SyntaxKind {
        SyntaxKind::DynamicProp
    }

    fn from_spec(spec: &Value, templates: &[RawTemplate]) -> Result<Self> {
        let mut r = SpecReader::new(SyntaxKind::DynamicProp, spec)?;
        let name = read_name(&mut r)?;
        let value = Expression::from_spec(r.next("value")?, templates)?;
        r.finish()?;
        Ok(Self { name, value })
    }
}

impl StatementSyntax for DynamicProp {
    fn compile(&self, target: &mut dyn CompileInto, env: &Environment) -> Result<()> {
        let value = self.value.compile(target, env)?;
        target.append(Opcode::DynamicProp {
            name: self.name.clone(),
            value,
        });
        Ok(())
    }

    fn pretty_print(&self) -> PrettyPrintValue {
        pretty(self.kind(), &self.name, self.value.pretty_print(), None)
    }
}

impl AttributeSyntax for DynamicProp {
    fn name(&self) -> &str {
        &self.name
    }

    fn namespace(&self) -> Option<&str> {
        None
    }

    fn value_syntax(&self) -> Cow<'_, Expression> {
        Cow::Borrowed(&self.value)
    }

    fn is_attribute(&self) -> bool {
        false
    }
}

////////////////////////////////////////////////////////////////////////////////
// Attribute
////////////////////////////////////////////////////////////////////////////////

impl Syntax for Attribute {
    fn kind(&self) -> SyntaxKind {
        match self {
            Self::Static(a) => a.kind(),
            Self::Dynamic(a) => a.kind(),
            Self::Property(a) => a.kind(),
        }
    }

    fn from_spec(spec: &Value, templates: &[RawTemplate]) -> Result<Self> {
        let kind = spec::discriminant(spec).and_then(|name| name.parse::<SyntaxKind>().ok());
        match kind {
            Some(SyntaxKind::StaticAttr) => StaticAttr::from_spec(spec, templates).map(Self::Static),
            Some(SyntaxKind::DynamicAttr) => {
                DynamicAttr::from_spec(spec, templates).map(Self::Dynamic)
            }
            Some(SyntaxKind::DynamicProp) => {
                DynamicProp::from_spec(spec, templates).map(Self::Property)
            }
            _ => Err(Error::malformed("expected attribute syntax", spec)),
        }
    }
}

impl StatementSyntax for Attribute {
    fn compile(&self, target: &mut dyn CompileInto, env: &Environment) -> Result<()> {
        match self {
            Self::Static(a) => a.compile(target, env),
            Self::Dynamic(a) => a.compile(target, env),
            Self::Property(a) => a.compile(target, env),
        }
    }

    fn pretty_print(&self) -> PrettyPrintValue {
        match self {
            Self::Static(a) => a.pretty_print(),
            Self::Dynamic(a) => a.pretty_print(),
            Self::Property(a) => a.pretty_print(),
        }
    }
}

impl AttributeSyntax for Attribute {
    fn name(&self) -> &str {
        match self {
            Self::Static(a) => a.name(),
            Self::Dynamic(a) => a.name(),
            Self::Property(a) => a.name(),
        }
    }

    fn namespace(&self) -> Option<&str> {
        match self {
            Self::Static(a) => a.namespace(),
            Self::Dynamic(a) => a.namespace(),
            Self::Property(a) => a.namespace(),
        }
    }

    fn value_syntax(&self) -> Cow<'_, Expression> {
        match self {
            Self::Static(a) => a.value_syntax(),
            Self::Dynamic(a) => a.value_syntax(),
            Self::Property(a) => a.value_syntax(),
        }
    }

    fn is_attribute(&self) -> bool {
        match self {
            Self::Static(a) => a.is_attribute(),
            Self::Dynamic(a) => a.is_attribute(),
            Self::Property(a) => a.is_attribute(),
        }
    }
}
