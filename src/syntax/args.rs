use std::collections::BTreeMap;

use crate::compile::{CompileInto, CompiledArgs};
use crate::pretty::PrettyPrintValue;
use crate::spec::{RawTemplate, SpecReader};
use crate::syntax::{Expression, ExpressionSyntax, Syntax};
use crate::{Environment, Result};

/// Positional and named arguments to a helper, block or yield.
///
/// Either part may be absent, which is different from present but empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Args {
    pub params: Option<Vec<Expression>>,
    pub hash: Option<BTreeMap<String, Expression>>,
}

impl Args {
    pub fn new(params: Vec<Expression>) -> Self {
        Self {
            params: Some(params),
            hash: None,
        }
    }

    pub fn with_hash(mut self, hash: BTreeMap<String, Expression>) -> Self {
        self.hash = Some(hash);
        self
    }

    /// Read optional params followed by an optional hash.
    pub(crate) fn read(reader: &mut SpecReader<'_>, templates: &[RawTemplate]) -> Result<Self> {
        let params = Self::read_params(reader, templates)?;
        let hash = match reader.map_opt("hash")? {
            None => None,
            Some(map) => Some(
                map.iter()
                    .map(|(k, v)| Ok((k.clone(), Expression::from_spec(v, templates)?)))
                    .collect::<Result<_>>()?,
            ),
        };
        Ok(Self { params, hash })
    }

    /// Read optional params with no hash.
    pub(crate) fn read_params_only(
        reader: &mut SpecReader<'_>,
        templates: &[RawTemplate],
    ) -> Result<Self> {
        let params = Self::read_params(reader, templates)?;
        Ok(Self { params, hash: None })
    }

    fn read_params(
        reader: &mut SpecReader<'_>,
        templates: &[RawTemplate],
    ) -> Result<Option<Vec<Expression>>> {
        match reader.list_opt("params")? {
            None => Ok(None),
            Some(list) => list
                .iter()
                .map(|v| Expression::from_spec(v, templates))
                .collect::<Result<_>>()
                .map(Some),
        }
    }

    /// Compile every argument, params first, then the hash in key order.
    pub fn compile(&self, target: &mut dyn CompileInto, env: &Environment) -> Result<CompiledArgs> {
        let mut args = CompiledArgs::default();
        for param in self.params.iter().flatten() {
            args.positional.push(param.compile(target, env)?);
        }
        for (name, value) in self.hash.iter().flatten() {
            args.named.push((name.clone(), value.compile(target, env)?));
        }
        Ok(args)
    }

    pub(crate) fn pretty_params(&self) -> Option<Vec<PrettyPrintValue>> {
        self.params
            .as_ref()
            .map(|params| params.iter().map(ExpressionSyntax::pretty_print).collect())
    }

    pub(crate) fn pretty_hash(&self) -> Option<BTreeMap<String, PrettyPrintValue>> {
        self.hash.as_ref().map(|hash| {
            hash.iter()
                .map(|(k, v)| (k.clone(), v.pretty_print()))
                .collect()
        })
    }
}
