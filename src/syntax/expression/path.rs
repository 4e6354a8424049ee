use std::fmt;

use crate::compile::{CompileInto, CompiledExpr};
use crate::pretty::{PrettyPrint, PrettyPrintValue};
use crate::spec::{self, RawTemplate, SpecReader};
use crate::syntax::{ExpressionSyntax, Syntax, SyntaxKind};
use crate::{Environment, Error, Result, Value};

/// A non-empty dotted path, e.g. `this.user.name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path {
    segments: Vec<String>,
}

/// A lookup on a symbol in scope, `["get", path]`.
///
/// The head of the path must resolve to a symbol, `this` always does.
#[derive(Debug, Clone, PartialEq)]
pub struct Get {
    pub path: Path,
}

/// A lookup on a named argument, `["arg", path]`.
///
/// The head is resolved as the symbol `@head`.
#[derive(Debug, Clone, PartialEq)]
pub struct Arg {
    pub path: Path,
}

/// A path the parser could not classify, `["unknown", path]`.
///
/// It compiles to a helper call if the path names a helper, to a symbol
/// lookup if the head is in scope and to a lookup on `this` otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct Unknown {
    pub path: Path,
}

impl Path {
    /// Construct a path from its segments, `None` if there are none.
    pub fn new<I, S>(segments: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return None;
        }
        Some(Self { segments })
    }

    pub(crate) fn read(reader: &mut SpecReader<'_>) -> Result<Self> {
        let list = reader.list("path")?;
        let segments = spec::path(reader, list)?;
        Ok(Self { segments })
    }

    pub fn head(&self) -> &str {
        &self.segments[0]
    }

    pub fn tail(&self) -> &[String] {
        &self.segments[1..]
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn is_single(&self) -> bool {
        self.segments.len() == 1
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("."))
    }
}

fn read_path(kind: SyntaxKind, spec: &Value) -> Result<Path> {
    let mut r = SpecReader::new(kind, spec)?;
    let path = Path::read(&mut r)?;
    r.finish()?;
    Ok(path)
}

fn pretty(kind: SyntaxKind, path: String) -> PrettyPrintValue {
    PrettyPrint::new(kind.as_str(), kind.as_str())
        .params(Some(vec![PrettyPrintValue::String(path)]))
        .into()
}

impl Syntax for Get {
    fn kind(&self) -> SyntaxKind {
        SyntaxKind::Get
    }

    fn from_spec(spec: &Value, _: &[RawTemplate]) -> Result<Self> {
        read_path(SyntaxKind::Get, spec).map(|path| Self { path })
    }
}

impl ExpressionSyntax for Get {
    fn compile(&self, target: &mut dyn CompileInto, _: &Environment) -> Result<CompiledExpr> {
        let head = self.path.head();
        let symbol = target
            .get_symbol(head)
            .ok_or_else(|| Error::unresolved_symbol(head))?;
        Ok(CompiledExpr::Local {
            symbol,
            path: self.path.tail().to_vec(),
        })
    }

    fn pretty_print(&self) -> PrettyPrintValue {
        pretty(self.kind(), self.path.to_string())
    }
}

impl Syntax for Arg {
    fn kind(&self) -> SyntaxKind {
        SyntaxKind::Arg
    }

    fn from_spec(spec: &Value, _: &[RawTemplate]) -> Result<Self> {
        read_path(SyntaxKind::Arg, spec).map(|path| Self { path })
    }
}

impl ExpressionSyntax for Arg {
    fn compile(&self, target: &mut dyn CompileInto, _: &Environment) -> Result<CompiledExpr> {
        let name = format!("@{}", self.path.head());
        let symbol = target
            .get_symbol(&name)
            .ok_or_else(|| Error::unresolved_symbol(name))?;
        Ok(CompiledExpr::Local {
            symbol,
            path: self.path.tail().to_vec(),
        })
    }

    fn pretty_print(&self) -> PrettyPrintValue {
        pretty(self.kind(), format!("@{}", self.path))
    }
}

impl Syntax for Unknown {
    fn kind(&self) -> SyntaxKind {
        SyntaxKind::Unknown
    }

    fn from_spec(spec: &Value, _: &[RawTemplate]) -> Result<Self> {
        read_path(SyntaxKind::Unknown, spec).map(|path| Self { path })
    }
}

impl ExpressionSyntax for Unknown {
    fn compile(&self, target: &mut dyn CompileInto, env: &Environment) -> Result<CompiledExpr> {
        let head = self.path.head();
        if self.path.is_single() {
            if let Some(helper) = env.lookup_helper(head) {
                return Ok(CompiledExpr::Helper {
                    helper,
                    args: Default::default(),
                });
            }
        }
        if let Some(symbol) = target.get_symbol(head) {
            return Ok(CompiledExpr::Local {
                symbol,
                path: self.path.tail().to_vec(),
            });
        }
        if env.is_strict() {
            return Err(Error::unresolved_symbol(head));
        }
        Ok(CompiledExpr::SelfGet(self.path.segments().to_vec()))
    }

    fn pretty_print(&self) -> PrettyPrintValue {
        pretty(self.kind(), self.path.to_string())
    }
}
