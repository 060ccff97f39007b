use std::{fmt, sync::Arc};

use sqlfrost_core::{
    ColumnDef, CompiledQuery, Dialect, IdentifierCase, Logger, Notice, Query, QueryContext,
    Result, TableBuilder, TracingLogger, WrapIdentifierFn, base,
};

use crate::{DIALECT_NAME, catalog, column, identifier, query, table};

/// SQL generation for Snowflake.
///
/// Unquoted identifiers are upper-cased, indexes and row locks compile to
/// nothing, and primary keys are only emitted over non-nullable columns.
/// Every dropped feature is reported through the configured [`Logger`].
#[derive(Clone)]
pub struct SnowflakeDialect {
    pub(crate) wrap_identifier: Option<WrapIdentifierFn>,
    pub(crate) identifier_case: IdentifierCase,
    pub(crate) strict_primary_keys: bool,
    pub(crate) logger: Arc<dyn Logger>,
}

impl SnowflakeDialect {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    #[must_use]
    pub fn with_identifier_case(mut self, identifier_case: IdentifierCase) -> Self {
        self.identifier_case = identifier_case;
        self
    }

    #[must_use]
    pub fn with_wrap_identifier(mut self, wrap_identifier: WrapIdentifierFn) -> Self {
        self.wrap_identifier = Some(wrap_identifier);
        self
    }

    #[must_use]
    pub fn with_strict_primary_keys(mut self, strict: bool) -> Self {
        self.strict_primary_keys = strict;
        self
    }

    #[must_use]
    pub fn identifier_case(&self) -> IdentifierCase {
        self.identifier_case
    }

    #[must_use]
    pub fn strict_primary_keys(&self) -> bool {
        self.strict_primary_keys
    }

    pub(crate) fn warn(&self, operation: &'static str, message: impl Into<String>) {
        self.logger
            .warn(Notice::new(DIALECT_NAME, operation, message));
    }
}

impl Default for SnowflakeDialect {
    fn default() -> Self {
        Self {
            wrap_identifier: None,
            identifier_case: IdentifierCase::Upper,
            strict_primary_keys: false,
            logger: Arc::new(TracingLogger),
        }
    }
}

impl fmt::Debug for SnowflakeDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowflakeDialect")
            .field("wrap_identifier", &self.wrap_identifier.is_some())
            .field("identifier_case", &self.identifier_case)
            .field("strict_primary_keys", &self.strict_primary_keys)
            .finish_non_exhaustive()
    }
}

impl Dialect for SnowflakeDialect {
    fn name(&self) -> &'static str {
        DIALECT_NAME
    }

    fn wrap_identifier(&self, value: &str, context: Option<&QueryContext>) -> String {
        identifier::wrap_identifier(self, value, context)
    }

    fn column_type(&self, column: &ColumnDef) -> String {
        column::column_type(self, column)
    }

    fn column_definition(&self, column: &ColumnDef) -> String {
        column::column_definition(self, column)
    }

    fn compile_insert(&self, query: &Query) -> Result<CompiledQuery> {
        query::compile_insert(self, query)
    }

    fn compile_update(&self, query: &Query) -> Result<CompiledQuery> {
        query::compile_update(self, query)
    }

    fn compile_delete(&self, query: &Query) -> Result<CompiledQuery> {
        query::compile_delete(self, query)
    }

    fn compile_truncate(&self, query: &Query) -> Result<CompiledQuery> {
        query::compile_truncate(self, query)
    }

    fn for_update(&self) -> String {
        query::lock_clause(self, "for_update")
    }

    fn for_share(&self) -> String {
        query::lock_clause(self, "for_share")
    }

    fn inherits_clause(&self, parent: &str) -> String {
        format!(" like ({})", base::wrap(self, parent, None))
    }

    fn primary_key(
        &self,
        table: &TableBuilder,
        columns: &[String],
        constraint_name: Option<&str>,
    ) -> Result<Vec<CompiledQuery>> {
        table::primary_key(self, table, columns, constraint_name)
    }

    fn drop_primary_key(
        &self,
        table: &TableBuilder,
        _constraint_name: Option<&str>,
    ) -> Result<Vec<CompiledQuery>> {
        Ok(vec![table::drop_primary_key(self, table)])
    }

    fn index(
        &self,
        table: &TableBuilder,
        columns: &[String],
        _index_name: Option<&str>,
    ) -> Result<Vec<CompiledQuery>> {
        Ok(table::unsupported_index(self, "index", table, columns))
    }

    fn drop_index(
        &self,
        table: &TableBuilder,
        columns: &[String],
        _index_name: Option<&str>,
    ) -> Result<Vec<CompiledQuery>> {
        Ok(table::unsupported_index(self, "drop_index", table, columns))
    }

    fn has_table(&self, table_name: &str) -> CompiledQuery {
        catalog::has_table(self, table_name)
    }

    fn has_column(&self, table_name: &str, column: &str) -> CompiledQuery {
        catalog::has_column(self, table_name, column)
    }

    fn column_info(&self, table_name: &str, column: Option<&str>) -> CompiledQuery {
        catalog::column_info(self, table_name, column)
    }
}
