use std::fmt;

use crate::syntax::SyntaxKind;
use crate::Value;

/// An error that can occur during reconstruction or compilation.
///
/// The [`Display`][fmt::Display] implementation prints a single line. Use the
/// alternate flag (`{:#}`) to also print the offending specification fragment
/// and the block it was found in.
#[derive(Clone)]
pub struct Error {
    kind: ErrorKind,
    syntax: Option<SyntaxKind>,
    fragment: Option<String>,
    block: Option<usize>,
}

/// The category of an [`Error`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// No concrete syntax type reconstructs the given discriminant.
    #[error("no reconstruction is implemented for syntax type `{0}`")]
    Unimplemented(String),

    /// A name could not be resolved to a symbol by the compilation target.
    #[error("unresolved symbol `{0}`")]
    UnresolvedSymbol(String),

    /// A helper name is not registered in the environment.
    #[error("unknown helper `{0}`")]
    UnknownHelper(String),

    /// A specification did not have the shape a syntax type expects.
    #[error("malformed specification: {0}")]
    MalformedSpec(String),

    /// Nested blocks exceeded the configured depth.
    #[error("reached the maximum block nesting depth ({0})")]
    MaxDepth(usize),
}

impl Error {
    fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            syntax: None,
            fragment: None,
            block: None,
        }
    }

    pub(crate) fn unimplemented(name: impl Into<String>, spec: &Value) -> Self {
        Self::new(ErrorKind::Unimplemented(name.into())).with_fragment(spec)
    }

    pub(crate) fn unresolved_symbol(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnresolvedSymbol(name.into()))
    }

    pub(crate) fn unknown_helper(name: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownHelper(name.into()))
    }

    pub(crate) fn malformed(msg: impl Into<String>, spec: &Value) -> Self {
        Self::new(ErrorKind::MalformedSpec(msg.into())).with_fragment(spec)
    }

    pub(crate) fn max_depth(depth: usize) -> Self {
        Self::new(ErrorKind::MaxDepth(depth))
    }

    /// Attach the syntax type being processed, keeping the innermost one.
    pub(crate) fn with_syntax(mut self, kind: SyntaxKind) -> Self {
        self.syntax.get_or_insert(kind);
        self
    }

    /// Attach the index of the block being processed, keeping the innermost
    /// one. The main template has no index.
    pub(crate) fn with_block(mut self, block: usize) -> Self {
        self.block.get_or_insert(block);
        self
    }

    fn with_fragment(mut self, spec: &Value) -> Self {
        self.fragment = Some(spec.to_string());
        self
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the innermost syntax type that was being processed.
    pub fn syntax(&self) -> Option<SyntaxKind> {
        self.syntax
    }

    /// Returns the offending specification fragment, if any.
    pub fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    /// Returns the index of the nested block the error occurred in.
    pub fn block(&self) -> Option<usize> {
        self.block
    }

    /// Whether the error is a failure to resolve a name, either a symbol or
    /// a helper.
    pub fn is_resolution_failure(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::UnresolvedSymbol(_) | ErrorKind::UnknownHelper(_)
        )
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_pretty(self, f)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            return fmt_pretty(self, f);
        }
        write!(f, "{}", self.kind)?;
        if let Some(syntax) = self.syntax {
            write!(f, " in `{}` syntax", syntax)?;
        }
        Ok(())
    }
}

fn fmt_pretty(err: &Error, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "{}", err.kind)?;
    if let Some(syntax) = err.syntax {
        writeln!(f, "  --> syntax: {}", syntax)?;
    }
    match err.block {
        Some(i) => writeln!(f, "  --> block: {}", i)?,
        None => writeln!(f, "  --> block: main")?,
    }
    if let Some(fragment) = &err.fragment {
        writeln!(f, "   |")?;
        writeln!(f, "   | {}", fragment)?;
        writeln!(f, "   |")?;
    }
    Ok(())
}
