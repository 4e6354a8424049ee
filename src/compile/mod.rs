//! The compilation target and the whole-template compilation driver.

mod symbols;

pub use crate::compile::symbols::SymbolTable;
pub use crate::types::opcode::{BlockId, CompiledArgs, CompiledExpr, HelperId, Opcode, Symbol};

use crate::program::Program;
use crate::spec::{RawTemplate, SerializedTemplate};
use crate::{Environment, Error, Result, Value};

/// A destination for emitted opcodes that can also resolve names.
///
/// Syntax nodes never construct opcodes except to hand them to a target.
pub trait CompileInto {
    /// Append an opcode to the instruction stream.
    fn append(&mut self, op: Opcode);

    /// Resolve a name in the current scope.
    fn get_symbol(&self, name: &str) -> Option<Symbol>;
}

/// A [`CompileInto`] that collects opcodes into a `Vec`.
#[derive(Debug, Clone, Default)]
pub struct OpcodeBuilder {
    opcodes: Vec<Opcode>,
    symbols: SymbolTable,
}

/// A compiled block: its instruction stream and the scope it was compiled
/// against.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledBlock {
    pub opcodes: Vec<Opcode>,
    pub symbols: SymbolTable,
}

/// The result of compiling a [`SerializedTemplate`].
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledTemplate {
    pub main: CompiledBlock,
    /// Compiled nested blocks, indexed by [`BlockId`]. Blocks that are not
    /// reachable from the main body are `None`.
    pub blocks: Vec<Option<CompiledBlock>>,
}

impl OpcodeBuilder {
    pub fn new(symbols: SymbolTable) -> Self {
        Self {
            opcodes: Vec::new(),
            symbols,
        }
    }

    pub fn opcodes(&self) -> &[Opcode] {
        &self.opcodes
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn into_opcodes(self) -> Vec<Opcode> {
        self.opcodes
    }

    fn finish(self) -> CompiledBlock {
        CompiledBlock {
            opcodes: self.opcodes,
            symbols: self.symbols,
        }
    }
}

impl CompileInto for OpcodeBuilder {
    fn append(&mut self, op: Opcode) {
        tracing::trace!(?op, "append");
        self.opcodes.push(op);
    }

    fn get_symbol(&self, name: &str) -> Option<Symbol> {
        self.symbols.get(name)
    }
}

impl CompiledTemplate {
    pub fn block(&self, id: BlockId) -> Option<&CompiledBlock> {
        self.blocks.get(id.0).and_then(Option::as_ref)
    }
}

/// Compile the main body of the template and every block reachable from it.
///
/// Each block is compiled once against a scope that inherits the symbols of
/// the block that references it.
pub(crate) fn template(env: &Environment, template: &SerializedTemplate) -> Result<CompiledTemplate> {
    let table = &template.blocks;
    let (main, nested) = block(env, &template.main, table, &SymbolTable::new())?;

    let mut blocks: Vec<Option<CompiledBlock>> = table.iter().map(|_| None).collect();
    let mut seen = vec![false; table.len()];
    let mut pending: Vec<(usize, SymbolTable, usize)> = nested
        .into_iter()
        .rev()
        .map(|i| (i, main.symbols.clone(), 1))
        .collect();

    while let Some((i, parent, depth)) = pending.pop() {
        if depth > env.max_depth() {
            return Err(Error::max_depth(env.max_depth()).with_block(i));
        }
        if seen[i] {
            return Err(Error::malformed(
                format!("block {i} is referenced more than once"),
                &Value::from(i as i64),
            )
            .with_block(i));
        }
        seen[i] = true;

        let (compiled, nested) =
            block(env, &table[i], table, &parent).map_err(|err| err.with_block(i))?;
        for j in nested.into_iter().rev() {
            pending.push((j, compiled.symbols.clone(), depth + 1));
        }
        blocks[i] = Some(compiled);
    }

    tracing::debug!(
        blocks = blocks.iter().filter(|b| b.is_some()).count(),
        "compiled template"
    );
    Ok(CompiledTemplate { main, blocks })
}

/// Reconstruct and compile a single raw template, returning the indices of
/// the nested blocks it references in render order.
fn block(
    env: &Environment,
    raw: &RawTemplate,
    table: &[RawTemplate],
    parent: &SymbolTable,
) -> Result<(CompiledBlock, Vec<usize>)> {
    let program = Program::from_raw(raw, table)?;
    let mut builder = OpcodeBuilder::new(parent.child(raw));
    program.compile(&mut builder, env)?;
    let nested = program.iter().flat_map(|stmt| stmt.nested_blocks()).collect();
    Ok((builder.finish(), nested))
}
