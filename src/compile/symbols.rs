use crate::spec::RawTemplate;
use crate::types::opcode::Symbol;

/// Maps names in scope to symbols.
///
/// Symbol `0` is reserved for `this`. Block parameters are declared under
/// their own name, named arguments as `@name` and yieldable blocks as
/// `&name`. Later declarations shadow earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    names: Vec<String>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a table for a template nested in this scope.
    pub fn child(&self, raw: &RawTemplate) -> Self {
        let mut table = self.clone();
        for local in &raw.locals {
            table.declare(local.clone());
        }
        for named in &raw.named {
            table.declare(format!("@{named}"));
        }
        for name in &raw.yields {
            table.declare(format!("&{name}"));
        }
        table
    }

    pub fn declare(&mut self, name: impl Into<String>) -> Symbol {
        self.names.push(name.into());
        Symbol(self.names.len())
    }

    pub fn get(&self, name: &str) -> Option<Symbol> {
        if name == "this" {
            return Some(Symbol(0));
        }
        self.names
            .iter()
            .rposition(|n| n == name)
            .map(|i| Symbol(i + 1))
    }

    /// The number of declared symbols, not counting `this`.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
