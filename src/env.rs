use std::collections::BTreeMap;
use std::fmt;

use crate::compile::{self, CompiledTemplate, HelperId};
use crate::spec::SerializedTemplate;
use crate::Result;

const DEFAULT_MAX_DEPTH: usize = 64;

/// The context every compile call is made against.
///
/// The environment stores the registered helpers and compile options.
/// Generally, you only need to construct one environment for many templates.
#[derive(Clone)]
pub struct Environment {
    helpers: BTreeMap<String, HelperId>,
    strict: bool,
    max_depth: usize,
}

impl Default for Environment {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    /// Construct a new environment with no helpers.
    #[inline]
    pub fn new() -> Self {
        Self {
            helpers: BTreeMap::new(),
            strict: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Register a helper, returning its id.
    ///
    /// Registering the same name twice returns the existing id.
    pub fn add_helper(&mut self, name: impl Into<String>) -> HelperId {
        let next = HelperId(self.helpers.len());
        *self.helpers.entry(name.into()).or_insert(next)
    }

    /// Lookup a helper by its dotted path, e.g. `if` or `format.date`.
    #[inline]
    pub fn lookup_helper(&self, name: &str) -> Option<HelperId> {
        self.helpers.get(name).copied()
    }

    /// Set whether unknown paths that are neither helpers nor symbols are an
    /// error.
    ///
    /// Defaults to `false`, in which case they compile to a lookup on `this`.
    #[inline]
    pub fn set_strict(&mut self, strict: bool) {
        self.strict = strict;
    }

    #[inline]
    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Set the maximum nesting depth of blocks.
    ///
    /// Defaults to 64.
    #[inline]
    pub fn set_max_depth(&mut self, depth: usize) {
        self.max_depth = depth;
    }

    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Compile a serialized template and all blocks reachable from it.
    ///
    /// Compilation fails as a whole, no partial output is returned.
    #[inline]
    pub fn compile(&self, template: &SerializedTemplate) -> Result<CompiledTemplate> {
        compile::template(self, template)
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("helpers", &self.helpers.keys())
            .field("strict", &self.strict)
            .field("max_depth", &self.max_depth)
            .finish()
    }
}
