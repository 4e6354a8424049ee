//! Raw templates and helpers for reading serialized specifications.

use crate::syntax::SyntaxKind;
use crate::value::Map;
use crate::{Error, Result, Value};

/// A nested template definition, prior to reconstruction.
///
/// Parsed from a map of the following shape, where every field except
/// `statements` may be omitted.
///
/// ```text
/// { "statements": [...], "locals": [...], "named": [...], "yields": [...] }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTemplate {
    /// Statement specifications in render order.
    pub statements: Vec<Value>,
    /// Block parameters introduced by this template.
    pub locals: Vec<String>,
    /// Named arguments the template reads, without the `@` prefix.
    pub named: Vec<String>,
    /// Block names the template may yield to, without the `&` prefix.
    pub yields: Vec<String>,
}

/// A complete serialized template: the main body and its table of nested
/// blocks.
///
/// ```text
/// { "main": { ... }, "blocks": [{ ... }, ...] }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SerializedTemplate {
    pub main: RawTemplate,
    pub blocks: Vec<RawTemplate>,
}

impl RawTemplate {
    /// Construct a raw template from statement specifications.
    pub fn new(statements: Vec<Value>) -> Self {
        Self {
            statements,
            ..Self::default()
        }
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        let map = value
            .as_map()
            .ok_or_else(|| Error::malformed(expected("map", value), value))?;
        let statements = match map.get("statements") {
            Some(Value::List(list)) => list.clone(),
            Some(v) => return Err(Error::malformed(expected("list of statements", v), value)),
            None => {
                return Err(Error::malformed(
                    "raw template is missing `statements`",
                    value,
                ))
            }
        };
        Ok(Self {
            statements,
            locals: names(map, "locals", value)?,
            named: names(map, "named", value)?,
            yields: names(map, "yields", value)?,
        })
    }
}

impl SerializedTemplate {
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = value
            .as_map()
            .ok_or_else(|| Error::malformed(expected("map", value), value))?;
        let main = match map.get("main") {
            Some(main) => RawTemplate::from_value(main)?,
            None => return Err(Error::malformed("template is missing `main`", value)),
        };
        let blocks = match map.get("blocks") {
            None | Some(Value::None) => Vec::new(),
            Some(Value::List(list)) => list
                .iter()
                .map(RawTemplate::from_value)
                .collect::<Result<_>>()?,
            Some(v) => return Err(Error::malformed(expected("list of blocks", v), value)),
        };
        Ok(Self { main, blocks })
    }
}

fn names(map: &Map<String, Value>, field: &str, value: &Value) -> Result<Vec<String>> {
    match map.get(field) {
        None | Some(Value::None) => Ok(Vec::new()),
        Some(Value::List(list)) => list
            .iter()
            .map(|v| match v {
                Value::String(s) => Ok(s.clone()),
                v => Err(Error::malformed(
                    format!("expected string in `{field}`, found {}", v.human()),
                    value,
                )),
            })
            .collect(),
        Some(v) => Err(Error::malformed(
            format!("expected list for `{field}`, found {}", v.human()),
            value,
        )),
    }
}

fn expected(what: &str, found: &Value) -> String {
    format!("expected {what}, found {}", found.human())
}

/// A cursor over the elements of a node specification.
///
/// Every error produced through the reader carries the node kind and the
/// whole specification being read.
pub(crate) struct SpecReader<'a> {
    kind: SyntaxKind,
    spec: &'a Value,
    items: &'a [Value],
    pos: usize,
}

impl<'a> SpecReader<'a> {
    /// Start reading a specification, checking its discriminant is `kind`.
    pub fn new(kind: SyntaxKind, spec: &'a Value) -> Result<Self> {
        let items = match spec {
            Value::List(items) => items.as_slice(),
            v => return Err(Self::fail(kind, spec, expected("list", v))),
        };
        match items.first() {
            Some(Value::String(s)) if s == kind.as_str() => {}
            Some(Value::String(s)) => {
                return Err(Self::fail(
                    kind,
                    spec,
                    format!("expected `{kind}` syntax, found `{s}`"),
                ))
            }
            Some(v) => return Err(Self::fail(kind, spec, expected("syntax type", v))),
            None => return Err(Self::fail(kind, spec, "empty specification")),
        }
        Ok(Self {
            kind,
            spec,
            items,
            pos: 1,
        })
    }

    fn fail(kind: SyntaxKind, spec: &Value, msg: impl Into<String>) -> Error {
        Error::malformed(msg, spec).with_syntax(kind)
    }

    pub fn error(&self, msg: impl Into<String>) -> Error {
        Self::fail(self.kind, self.spec, msg)
    }

    /// The next required element.
    pub fn next(&mut self, field: &str) -> Result<&'a Value> {
        match self.items.get(self.pos) {
            Some(v) => {
                self.pos += 1;
                Ok(v)
            }
            None => Err(self.error(format!("missing `{field}`"))),
        }
    }

    /// The next optional element; `None` if it is omitted or `null`.
    pub fn next_opt(&mut self) -> Option<&'a Value> {
        let v = self.items.get(self.pos)?;
        self.pos += 1;
        match v {
            Value::None => None,
            v => Some(v),
        }
    }

    pub fn string(&mut self, field: &str) -> Result<String> {
        match self.next(field)? {
            Value::String(s) => Ok(s.clone()),
            v => Err(self.error(format!("expected string for `{field}`, found {}", v.human()))),
        }
    }

    pub fn string_opt(&mut self, field: &str) -> Result<Option<String>> {
        match self.next_opt() {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(v) => Err(self.error(format!("expected string for `{field}`, found {}", v.human()))),
        }
    }

    pub fn bool_opt(&mut self, field: &str) -> Result<Option<bool>> {
        match self.next_opt() {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(v) => Err(self.error(format!("expected bool for `{field}`, found {}", v.human()))),
        }
    }

    pub fn list(&mut self, field: &str) -> Result<&'a [Value]> {
        match self.next(field)? {
            Value::List(list) => Ok(list),
            v => Err(self.error(format!("expected list for `{field}`, found {}", v.human()))),
        }
    }

    pub fn list_opt(&mut self, field: &str) -> Result<Option<&'a [Value]>> {
        match self.next_opt() {
            None => Ok(None),
            Some(Value::List(list)) => Ok(Some(list)),
            Some(v) => Err(self.error(format!("expected list for `{field}`, found {}", v.human()))),
        }
    }

    pub fn map_opt(&mut self, field: &str) -> Result<Option<&'a Map<String, Value>>> {
        match self.next_opt() {
            None => Ok(None),
            Some(Value::Map(map)) => Ok(Some(map)),
            Some(v) => Err(self.error(format!("expected map for `{field}`, found {}", v.human()))),
        }
    }

    /// The next optional element as an index into `templates`.
    pub fn template_opt(&mut self, field: &str, templates: &[RawTemplate]) -> Result<Option<usize>> {
        match self.next_opt() {
            None => Ok(None),
            Some(Value::Integer(i)) => match usize::try_from(*i) {
                Ok(i) if i < templates.len() => Ok(Some(i)),
                _ => Err(self.error(format!(
                    "template index {i} for `{field}` is out of range, there are {} templates",
                    templates.len()
                ))),
            },
            Some(v) => Err(self.error(format!(
                "expected template index for `{field}`, found {}",
                v.human()
            ))),
        }
    }

    /// Finish reading, failing if there are unconsumed elements.
    pub fn finish(self) -> Result<()> {
        let n = self.items.len();
        if self.pos < n {
            return Err(self.error(format!(
                "expected at most {} elements, found {n}",
                self.pos
            )));
        }
        Ok(())
    }
}

/// Returns the discriminant string of a node specification, if it has one.
pub(crate) fn discriminant(spec: &Value) -> Option<&str> {
    spec.as_list()?.first()?.as_str()
}

/// Validates a path, a non-empty list of identifier segments.
pub(crate) fn path(reader: &SpecReader<'_>, list: &[Value]) -> Result<Vec<String>> {
    if list.is_empty() {
        return Err(reader.error("path must not be empty"));
    }
    list.iter()
        .map(|seg| match seg {
            Value::String(s) if is_segment(s) => Ok(s.clone()),
            Value::String(s) => Err(reader.error(format!("invalid path segment `{s}`"))),
            v => Err(reader.error(format!("expected path segment, found {}", v.human()))),
        })
        .collect()
}

fn is_segment(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if is_segment_start(c) => chars.all(is_segment_continue),
        _ => false,
    }
}

#[cfg(feature = "unicode")]
fn is_segment_start(c: char) -> bool {
    c == '_' || unicode_ident::is_xid_start(c)
}

#[cfg(feature = "unicode")]
fn is_segment_continue(c: char) -> bool {
    c == '-' || unicode_ident::is_xid_continue(c)
}

#[cfg(not(feature = "unicode"))]
fn is_segment_start(c: char) -> bool {
    matches!(c, 'A'..='Z' | 'a'..='z' | '_')
}

#[cfg(not(feature = "unicode"))]
fn is_segment_continue(c: char) -> bool {
    matches!(c, '0'..='9' | 'A'..='Z' | 'a'..='z' | '_' | '-')
}
