//! The ordered container of statements that makes up a template body.

use std::fmt;
use std::iter::FusedIterator;

use crate::compile::{CompileInto, Opcode, Symbol};
use crate::pretty::PrettyPrintValue;
use crate::spec::RawTemplate;
use crate::syntax::{Statement, StatementSyntax, Syntax};
use crate::{Environment, Error, Result, Value};

/// A handle to a statement linked into a [`Program`].
///
/// Handles are only valid for the program that issued them. Once the
/// statement is removed the handle goes stale, even if its slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

/// An ordered sequence of statements, in render order.
///
/// The program is a doubly-linked list backed by an arena. Statements never
/// know their neighbours, the `previous` and `next` links live in the
/// program's slots and are only ever updated by the program itself. A
/// statement obtained by [`remove`][Program::remove] or by cloning is
/// therefore always detached.
#[derive(Clone, Default)]
pub struct Program {
    slots: Vec<Slot>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

#[derive(Clone)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

#[derive(Clone)]
struct Node {
    stmt: Statement,
    prev: Option<usize>,
    next: Option<usize>,
}

impl Program {
    /// Construct a new empty program.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconstruct a program from a list of statement specifications.
    ///
    /// Fails on the first statement that cannot be reconstructed, no
    /// partial program is returned.
    pub fn from_spec(spec: &Value, templates: &[RawTemplate]) -> Result<Self> {
        match spec {
            Value::List(list) => Self::from_statements(list, templates),
            spec => Err(Error::malformed(
                format!("expected list of statements, found {}", spec.human()),
                spec,
            )),
        }
    }

    /// Reconstruct the body of a raw template.
    pub fn from_raw(raw: &RawTemplate, templates: &[RawTemplate]) -> Result<Self> {
        let program = Self::from_statements(&raw.statements, templates)?;
        tracing::debug!(statements = program.len(), "reconstructed program");
        Ok(program)
    }

    fn from_statements(specs: &[Value], templates: &[RawTemplate]) -> Result<Self> {
        specs
            .iter()
            .map(|spec| Statement::from_spec(spec, templates))
            .collect()
    }

    /// Returns the number of statements in the program.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the first statement's handle.
    #[inline]
    pub fn first(&self) -> Option<NodeId> {
        self.head.map(|i| self.id(i))
    }

    /// Returns the last statement's handle.
    #[inline]
    pub fn last(&self) -> Option<NodeId> {
        self.tail.map(|i| self.id(i))
    }

    pub fn get(&self, id: NodeId) -> Option<&Statement> {
        self.node(id).map(|node| &node.stmt)
    }

    /// Returns a mutable reference to a statement.
    ///
    /// Only the statement's own fields can be changed this way, its position
    /// is owned by the program.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Statement> {
        self.node_mut(id).map(|node| &mut node.stmt)
    }

    /// Returns the handle of the statement after `id`.
    pub fn next(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.next.map(|i| self.id(i))
    }

    /// Returns the handle of the statement before `id`.
    pub fn previous(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.prev.map(|i| self.id(i))
    }

    /// Append a statement to the end of the program.
    pub fn push_back(&mut self, stmt: impl Into<Statement>) -> NodeId {
        let tail = self.tail;
        self.link(stmt.into(), tail, None)
    }

    /// Prepend a statement to the start of the program.
    pub fn push_front(&mut self, stmt: impl Into<Statement>) -> NodeId {
        let head = self.head;
        self.link(stmt.into(), None, head)
    }

    /// Insert a statement directly before `id`.
    ///
    /// If `id` is stale the statement is handed back.
    pub fn insert_before(
        &mut self,
        id: NodeId,
        stmt: impl Into<Statement>,
    ) -> std::result::Result<NodeId, Statement> {
        let stmt = stmt.into();
        match self.node(id) {
            Some(node) => {
                let prev = node.prev;
                Ok(self.link(stmt, prev, Some(id.index)))
            }
            None => Err(stmt),
        }
    }

    /// Insert a statement directly after `id`.
    ///
    /// If `id` is stale the statement is handed back.
    pub fn insert_after(
        &mut self,
        id: NodeId,
        stmt: impl Into<Statement>,
    ) -> std::result::Result<NodeId, Statement> {
        let stmt = stmt.into();
        match self.node(id) {
            Some(node) => {
                let next = node.next;
                Ok(self.link(stmt, Some(id.index), next))
            }
            None => Err(stmt),
        }
    }

    /// Unlink a statement from the program and return it.
    ///
    /// The handle and any copies of it go stale.
    pub fn remove(&mut self, id: NodeId) -> Option<Statement> {
        self.node(id)?;
        let slot = &mut self.slots[id.index];
        let node = slot.node.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(id.index);
        self.len -= 1;

        self.set_next(node.prev, node.next);
        self.set_prev(node.next, node.prev);
        Some(node.stmt)
    }

    /// Returns an iterator over the statements in render order.
    #[inline]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            cursor: Cursor::new(self, self.head, self.tail),
        }
    }

    /// Returns an iterator over the statement handles in render order.
    #[inline]
    pub fn ids(&self) -> Ids<'_> {
        Ids {
            cursor: Cursor::new(self, self.head, self.tail),
        }
    }

    /// Returns an iterator over the statements from `first` up to and
    /// including `last`.
    ///
    /// Returns `None` if either handle is stale or if `last` comes before
    /// `first`.
    pub fn slice(&self, first: NodeId, last: NodeId) -> Option<Iter<'_>> {
        self.node(last)?;
        let mut index = first.index;
        let mut node = self.node(first)?;
        while index != last.index {
            index = node.next?;
            node = self.slots[index].node.as_ref()?;
        }
        Some(Iter {
            cursor: Cursor::new(self, Some(first.index), Some(last.index)),
        })
    }

    /// Compile every statement in render order.
    ///
    /// Each statement is compiled exactly once and its opcodes are appended
    /// to the target in program order. If any statement fails nothing is
    /// appended to the target.
    pub fn compile(&self, target: &mut dyn CompileInto, env: &Environment) -> Result<()> {
        let mut staged = Staged {
            target: &*target,
            opcodes: Vec::new(),
        };
        for stmt in self {
            stmt.compile(&mut staged, env)?;
        }
        let opcodes = staged.opcodes;
        tracing::trace!(opcodes = opcodes.len(), "compiled program");
        for op in opcodes {
            target.append(op);
        }
        Ok(())
    }

    /// Returns a list of each statement's pretty-print value.
    pub fn pretty_print(&self) -> PrettyPrintValue {
        PrettyPrintValue::List(self.iter().map(StatementSyntax::pretty_print).collect())
    }

    fn id(&self, index: usize) -> NodeId {
        NodeId {
            index,
            generation: self.slots[index].generation,
        }
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)?
            .node
            .as_ref()
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)?
            .node
            .as_mut()
    }

    /// Point `index`'s next link at `next`, or the head if `index` is `None`.
    fn set_next(&mut self, index: Option<usize>, next: Option<usize>) {
        match index {
            Some(i) => {
                if let Some(node) = &mut self.slots[i].node {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
    }

    /// Point `index`'s previous link at `prev`, or the tail if `index` is
    /// `None`.
    fn set_prev(&mut self, index: Option<usize>, prev: Option<usize>) {
        match index {
            Some(i) => {
                if let Some(node) = &mut self.slots[i].node {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    fn link(&mut self, stmt: Statement, prev: Option<usize>, next: Option<usize>) -> NodeId {
        let node = Node { stmt, prev, next };
        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index].node = Some(node);
                index
            }
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(node),
                });
                self.slots.len() - 1
            }
        };
        self.set_next(prev, Some(index));
        self.set_prev(next, Some(index));
        self.len += 1;
        self.id(index)
    }
}

/// Buffers opcodes so that a failed compile leaves the real target untouched.
struct Staged<'a> {
    target: &'a dyn CompileInto,
    opcodes: Vec<Opcode>,
}

impl CompileInto for Staged<'_> {
    fn append(&mut self, op: Opcode) {
        self.opcodes.push(op);
    }

    fn get_symbol(&self, name: &str) -> Option<Symbol> {
        self.target.get_symbol(name)
    }
}

impl PartialEq for Program {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl fmt::Debug for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl FromIterator<Statement> for Program {
    fn from_iter<I: IntoIterator<Item = Statement>>(iter: I) -> Self {
        let mut program = Self::new();
        program.extend(iter);
        program
    }
}

impl Extend<Statement> for Program {
    fn extend<I: IntoIterator<Item = Statement>>(&mut self, iter: I) {
        for stmt in iter {
            self.push_back(stmt);
        }
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Statement;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

////////////////////////////////////////////////////////////////////////////////
// Iterators
////////////////////////////////////////////////////////////////////////////////

struct Cursor<'a> {
    program: &'a Program,
    front: Option<usize>,
    last: Option<usize>,
}

impl<'a> Cursor<'a> {
    fn new(program: &'a Program, front: Option<usize>, last: Option<usize>) -> Self {
        Self {
            program,
            front,
            last,
        }
    }

    fn advance(&mut self) -> Option<(usize, &'a Node)> {
        let index = self.front?;
        let node = self.program.slots[index].node.as_ref()?;
        self.front = if Some(index) == self.last {
            None
        } else {
            node.next
        };
        Some((index, node))
    }
}

/// An iterator over the statements of a [`Program`].
pub struct Iter<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a Statement;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor.advance().map(|(_, node)| &node.stmt)
    }
}

impl FusedIterator for Iter<'_> {}

/// An iterator over the statement handles of a [`Program`].
pub struct Ids<'a> {
    cursor: Cursor<'a>,
}

impl Iterator for Ids<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        self.cursor
            .advance()
            .map(|(index, _)| self.cursor.program.id(index))
    }
}

impl FusedIterator for Ids<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::compile::OpcodeBuilder;
    use crate::syntax::{Append, CloseElement, Expression, Literal, OpenElement, StaticAttr, Text};
    use crate::{spec, ErrorKind};

    fn texts(program: &Program) -> Vec<String> {
        program
            .iter()
            .map(|stmt| match stmt {
                Statement::Text(t) => t.content.clone(),
                stmt => stmt.kind().to_string(),
            })
            .collect()
    }

    #[test]
    fn program_push_and_insert() {
        let mut p = Program::new();
        let b = p.push_back(Text::new("b"));
        p.push_front(Text::new("a"));
        let d = p.push_back(Text::new("d"));
        p.insert_before(d, Text::new("c")).unwrap();
        p.insert_after(d, Text::new("e")).unwrap();
        assert_eq!(texts(&p), ["a", "b", "c", "d", "e"]);
        assert_eq!(p.len(), 5);
        assert_eq!(p.next(b).and_then(|id| p.get(id)), Some(&Statement::from(Text::new("c"))));
        assert_eq!(p.previous(p.first().unwrap()), None);
        assert_eq!(p.next(p.last().unwrap()), None);
    }

    #[test]
    fn program_remove_detaches() {
        let mut p: Program = ["a", "b", "c"]
            .into_iter()
            .map(|s| Statement::from(Text::new(s)))
            .collect();
        let ids: Vec<_> = p.ids().collect();

        let removed = p.remove(ids[1]).unwrap();
        assert_eq!(removed, Statement::from(Text::new("b")));
        assert_eq!(texts(&p), ["a", "c"]);
        assert_eq!(p.next(ids[0]), Some(ids[2]));
        assert_eq!(p.previous(ids[2]), Some(ids[0]));

        assert_eq!(p.get(ids[1]), None);
        assert_eq!(p.remove(ids[1]), None);
        assert!(p.insert_after(ids[1], Text::new("x")).is_err());
    }

    #[test]
    fn program_stale_id_after_slot_reuse() {
        let mut p = Program::new();
        let a = p.push_back(Text::new("a"));
        p.remove(a);
        let b = p.push_back(Text::new("b"));
        assert_ne!(a, b);
        assert_eq!(p.get(a), None);
        assert_eq!(texts(&p), ["b"]);
    }

    #[test]
    fn program_remove_head_and_tail() {
        let mut p = Program::new();
        let a = p.push_back(Text::new("a"));
        let b = p.push_back(Text::new("b"));
        p.remove(a);
        assert_eq!(p.first(), Some(b));
        p.remove(b);
        assert!(p.is_empty());
        assert_eq!(p.first(), None);
        assert_eq!(p.last(), None);
        assert_eq!(p.iter().count(), 0);
    }

    #[test]
    fn program_slice() {
        let mut p = Program::new();
        p.push_back(OpenElement::new("div"));
        let first = p.push_back(Text::new("a"));
        let last = p.push_back(Text::new("b"));
        p.push_back(CloseElement);

        let slice: Vec<_> = p.slice(first, last).unwrap().collect();
        assert_eq!(slice, [&Statement::from(Text::new("a")), &Statement::from(Text::new("b"))]);

        let single: Vec<_> = p.slice(last, last).unwrap().collect();
        assert_eq!(single.len(), 1);
    }

    #[test]
    fn program_slice_out_of_order() {
        let mut p = Program::new();
        let a = p.push_back(Text::new("a"));
        let b = p.push_back(Text::new("b"));
        p.push_back(Text::new("c"));
        assert!(p.slice(b, a).is_none());

        p.remove(a);
        assert!(p.slice(a, b).is_none());
        assert!(p.slice(b, a).is_none());
    }

    #[test]
    fn program_get_mut() {
        let mut p = Program::new();
        let id = p.push_back(Append::new(Literal::from("x")));
        if let Some(Statement::Append(append)) = p.get_mut(id) {
            append.trusting = true;
        }
        assert!(matches!(p.get(id), Some(Statement::Append(Append { trusting: true, .. }))));
    }

    #[test]
    fn program_from_spec() {
        let p = Program::from_spec(
            &spec!([["text", "Hello"], ["static-attr", "class", "greeting"]]),
            &[],
        )
        .unwrap();
        assert_eq!(p.len(), 2);
        assert_eq!(
            p.pretty_print().to_string(),
            r#"[(text "Hello") (static-attr class "greeting")]"#
        );
    }

    #[test]
    fn program_from_spec_aborts_on_malformed() {
        let err = Program::from_spec(&spec!([["text", "a"], ["text"]]), &[]).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::MalformedSpec(_)));
        assert!(Program::from_spec(&spec!("text"), &[]).is_err());
    }

    #[test]
    fn program_compile_failure_appends_nothing() {
        let mut p = Program::new();
        p.push_back(Text::new("a"));
        p.push_back(StaticAttr::new("id", "x"));
        p.push_back(Append::new(Expression::from_spec(
            &spec!(["get", ["missing"]]),
            &[],
        )
        .unwrap()));

        let mut target = OpcodeBuilder::default();
        let err = p.compile(&mut target, &Environment::new()).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::UnresolvedSymbol("missing".into()));
        assert_eq!(err.syntax(), Some(crate::syntax::SyntaxKind::Get));
        assert!(target.opcodes().is_empty());
    }

    #[test]
    fn program_compile_in_order() {
        let mut p = Program::new();
        let b = p.push_back(Text::new("b"));
        p.push_front(Text::new("a"));
        p.insert_after(b, Text::new("c")).unwrap();

        let mut target = OpcodeBuilder::default();
        p.compile(&mut target, &Environment::new()).unwrap();
        assert_eq!(
            target.into_opcodes(),
            [
                Opcode::Text("a".into()),
                Opcode::Text("b".into()),
                Opcode::Text("c".into()),
            ]
        );
    }
}
