use std::fmt;
use std::str::FromStr;

/// The discriminant carried by every syntax node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SyntaxKind {
    // Statements
    Text,
    Comment,
    Append,
    Block,
    OpenElement,
    CloseElement,
    Yield,

    // Attributes
    StaticAttr,
    DynamicAttr,
    DynamicProp,

    // Expressions
    Value,
    Get,
    Arg,
    Unknown,
    Helper,
    Concat,
}

/// The family a [`SyntaxKind`] belongs to.
///
/// This is how code outside of the node modules tests whether a node is an
/// attribute without matching on concrete types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxFamily {
    Statement,
    Attribute,
    Expression,
}

impl SyntaxKind {
    pub const ALL: [SyntaxKind; 16] = [
        Self::Text,
        Self::Comment,
        Self::Append,
        Self::Block,
        Self::OpenElement,
        Self::CloseElement,
        Self::Yield,
        Self::StaticAttr,
        Self::DynamicAttr,
        Self::DynamicProp,
        Self::Value,
        Self::Get,
        Self::Arg,
        Self::Unknown,
        Self::Helper,
        Self::Concat,
    ];

    /// The string form used in specifications and pretty-printing.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Comment => "comment",
            Self::Append => "append",
            Self::Block => "block",
            Self::OpenElement => "open-element",
            Self::CloseElement => "close-element",
            Self::Yield => "yield",
            Self::StaticAttr => "static-attr",
            Self::DynamicAttr => "dynamic-attr",
            Self::DynamicProp => "dynamic-prop",
            Self::Value => "value",
            Self::Get => "get",
            Self::Arg => "arg",
            Self::Unknown => "unknown",
            Self::Helper => "helper",
            Self::Concat => "concat",
        }
    }

    pub const fn family(self) -> SyntaxFamily {
        match self {
            Self::StaticAttr | Self::DynamicAttr | Self::DynamicProp => SyntaxFamily::Attribute,
            Self::Value | Self::Get | Self::Arg | Self::Unknown | Self::Helper | Self::Concat => {
                SyntaxFamily::Expression
            }
            _ => SyntaxFamily::Statement,
        }
    }

    /// Whether nodes of this kind are statements. Attributes are statements.
    pub const fn is_statement(self) -> bool {
        !self.is_expression()
    }

    pub const fn is_attribute(self) -> bool {
        matches!(self.family(), SyntaxFamily::Attribute)
    }

    pub const fn is_expression(self) -> bool {
        matches!(self.family(), SyntaxFamily::Expression)
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SyntaxKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == s)
            .ok_or(())
    }
}
