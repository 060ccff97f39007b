use serde::Deserialize;

use crate::{CompileError, CompiledQuery, Dialect, Query, Result, SchemaBuilder};

/// A serialized compile request: either one query or one schema batch.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompileDocument {
    pub query: Option<Query>,
    pub schema: Option<SchemaBuilder>,
}

impl CompileDocument {
    pub fn compile(&self, dialect: &dyn Dialect) -> Result<Vec<CompiledQuery>> {
        match (&self.query, &self.schema) {
            (Some(query), None) => Ok(vec![dialect.compile(query)?]),
            (None, Some(schema)) => dialect.compile_schema(schema),
            _ => Err(CompileError::InvalidDocument.into()),
        }
    }
}
