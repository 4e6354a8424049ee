//! A structural debug representation of syntax nodes.
//!
//! Pretty-print values mirror the IR, they never alias it, and are only meant
//! for debugging and introspection tooling. The [`Display`][fmt::Display]
//! implementation renders them as s-expressions.
//!
//! ```
//! use weft::syntax::{Statement, StatementSyntax, Syntax};
//! use weft::spec;
//!
//! let stmt = Statement::from_spec(&spec!(["append", ["get", ["this", "name"]]]), &[])?;
//! assert_eq!(stmt.pretty_print().to_string(), "(append (get this.name))");
//! # Ok::<(), weft::Error>(())
//! ```

use std::collections::BTreeMap;
use std::fmt;

/// A recursive pretty-print value.
#[derive(Debug, Clone, PartialEq)]
pub enum PrettyPrintValue {
    String(String),
    List(Vec<PrettyPrintValue>),
    Map(BTreeMap<String, PrettyPrintValue>),
    Node(PrettyPrint),
}

/// A structured pretty-print node.
///
/// Fields that are `None` are absent, which consumers can tell apart from
/// present but empty.
#[derive(Debug, Clone, PartialEq)]
pub struct PrettyPrint {
    /// The type of the node, e.g. `block`.
    pub kind: String,
    /// The operation, e.g. the helper path of a block.
    pub operation: String,
    /// Ordered positional parameters.
    pub params: Option<Vec<PrettyPrintValue>>,
    /// Named parameters. Key order carries no meaning.
    pub hash: Option<BTreeMap<String, PrettyPrintValue>>,
    /// Named slots mapped to indices in the nested template table.
    pub templates: Option<BTreeMap<String, usize>>,
}

impl PrettyPrint {
    pub fn new(kind: impl Into<String>, operation: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            operation: operation.into(),
            params: None,
            hash: None,
            templates: None,
        }
    }

    pub fn params(mut self, params: Option<Vec<PrettyPrintValue>>) -> Self {
        self.params = params;
        self
    }

    pub fn hash(mut self, hash: Option<BTreeMap<String, PrettyPrintValue>>) -> Self {
        self.hash = hash;
        self
    }

    pub fn templates(mut self, templates: Option<BTreeMap<String, usize>>) -> Self {
        self.templates = templates;
        self
    }
}

impl From<PrettyPrint> for PrettyPrintValue {
    fn from(pp: PrettyPrint) -> Self {
        Self::Node(pp)
    }
}

impl From<String> for PrettyPrintValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for PrettyPrintValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}

impl fmt::Display for PrettyPrintValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::List(list) => {
                f.write_str("[")?;
                fmt_spaced(f, list)?;
                f.write_str("]")
            }
            Self::Map(map) => {
                f.write_str("{")?;
                fmt_pairs(f, map)?;
                f.write_str("}")
            }
            Self::Node(pp) => write!(f, "{pp}"),
        }
    }
}

/// Renders as `(operation params... key=value... &slot=index...)`. The kind
/// is only shown when it differs from the operation, as `kind:operation`.
impl fmt::Display for PrettyPrint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(")?;
        if self.kind != self.operation {
            write!(f, "{}:", self.kind)?;
        }
        f.write_str(&self.operation)?;
        if let Some(params) = &self.params {
            if !params.is_empty() {
                f.write_str(" ")?;
                fmt_spaced(f, params)?;
            }
        }
        if let Some(hash) = &self.hash {
            if !hash.is_empty() {
                f.write_str(" ")?;
                fmt_pairs(f, hash)?;
            }
        }
        if let Some(templates) = &self.templates {
            for (slot, index) in templates {
                write!(f, " &{slot}={index}")?;
            }
        }
        f.write_str(")")
    }
}

fn fmt_spaced(f: &mut fmt::Formatter<'_>, values: &[PrettyPrintValue]) -> fmt::Result {
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{v}")?;
    }
    Ok(())
}

fn fmt_pairs(f: &mut fmt::Formatter<'_>, map: &BTreeMap<String, PrettyPrintValue>) -> fmt::Result {
    for (i, (k, v)) in map.iter().enumerate() {
        if i > 0 {
            f.write_str(" ")?;
        }
        write!(f, "{k}={v}")?;
    }
    Ok(())
}
