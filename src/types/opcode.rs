//! Defines the [`Opcode`] stream produced by compilation and consumed by the
//! rendering VM.

use crate::syntax::Literal;

/// A resolved name within the current scope. Symbol `0` is always `this`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(pub usize);

/// A helper registered in an [`Environment`][crate::Environment].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HelperId(pub usize);

/// An index into the nested block table of a serialized template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(pub usize);

/// A compiled expression handle.
#[derive(Debug, Clone, PartialEq)]
pub enum CompiledExpr {
    /// A literal value.
    Value(Literal),

    /// Lookup a path on a local symbol.
    Local { symbol: Symbol, path: Vec<String> },

    /// Lookup a path on the template's `this` without a declared symbol.
    SelfGet(Vec<String>),

    /// Call a helper.
    Helper { helper: HelperId, args: CompiledArgs },

    /// Concatenate the stringified parts.
    Concat(Vec<CompiledExpr>),
}

/// Compiled positional and named arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledArgs {
    pub positional: Vec<CompiledExpr>,
    pub named: Vec<(String, CompiledExpr)>,
}

/// An instruction in a compiled block.
#[derive(Debug, Clone, PartialEq)]
pub enum Opcode {
    /// Emit static text
    Text(String),

    /// Emit a comment node
    Comment(String),

    /// Evaluate the expression and emit it, without escaping if trusting
    Append { expr: CompiledExpr, trusting: bool },

    /// Invoke a block helper with optional default and inverse blocks
    Block {
        helper: HelperId,
        args: CompiledArgs,
        default: Option<BlockId>,
        inverse: Option<BlockId>,
    },

    /// Open an element
    OpenElement { tag: String },

    /// Close the most recently opened element
    CloseElement,

    /// Render the block bound to the symbol
    Yield { block: Symbol, args: CompiledArgs },

    /// Set a static attribute on the open element
    StaticAttr {
        name: String,
        value: String,
        namespace: Option<String>,
    },

    /// Set a dynamic attribute on the open element
    DynamicAttr {
        name: String,
        value: CompiledExpr,
        namespace: Option<String>,
    },

    /// Set a property on the open element
    DynamicProp { name: String, value: CompiledExpr },
}

impl Opcode {
    /// Returns the compiled expressions this opcode references.
    pub fn exprs(&self) -> Vec<&CompiledExpr> {
        match self {
            Self::Append { expr, .. } => vec![expr],
            Self::DynamicAttr { value, .. } | Self::DynamicProp { value, .. } => vec![value],
            Self::Block { args, .. } | Self::Yield { args, .. } => args.exprs().collect(),
            Self::Text(_)
            | Self::Comment(_)
            | Self::OpenElement { .. }
            | Self::CloseElement
            | Self::StaticAttr { .. } => Vec::new(),
        }
    }
}

impl CompiledArgs {
    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.named.is_empty()
    }

    pub fn exprs(&self) -> impl Iterator<Item = &CompiledExpr> {
        self.positional
            .iter()
            .chain(self.named.iter().map(|(_, expr)| expr))
    }
}
