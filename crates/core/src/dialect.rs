use crate::{
    ColumnDef, CompiledQuery, Query, QueryContext, Result, SchemaBuilder, TableBuilder, base,
};

/// SQL generation rules for one database product.
///
/// Every method has a default that produces the base dialect's SQL; a concrete
/// dialect overrides only the hooks where the product diverges and calls the
/// matching `base::*` function when it needs the default output.
pub trait Dialect: Send + Sync {
    fn name(&self) -> &'static str;

    /// Quotes a single identifier atom. Splitting of dotted names and aliases
    /// happens in [`base::wrap`] before this is called.
    fn wrap_identifier(&self, value: &str, _context: Option<&QueryContext>) -> String {
        base::quote_identifier(value)
    }

    fn column_type(&self, column: &ColumnDef) -> String {
        base::column_type(column)
    }

    fn column_definition(&self, column: &ColumnDef) -> String {
        base::column_definition(self, column)
    }

    fn compile(&self, query: &Query) -> Result<CompiledQuery> {
        base::compile(self, query)
    }

    fn compile_select(&self, query: &Query) -> Result<CompiledQuery> {
        base::compile_select(self, query)
    }

    fn compile_insert(&self, query: &Query) -> Result<CompiledQuery> {
        base::compile_insert(self, query)
    }

    fn compile_update(&self, query: &Query) -> Result<CompiledQuery> {
        base::compile_update(self, query)
    }

    fn compile_delete(&self, query: &Query) -> Result<CompiledQuery> {
        base::compile_delete(self, query)
    }

    fn compile_truncate(&self, query: &Query) -> Result<CompiledQuery> {
        base::compile_truncate(self, query)
    }

    fn for_update(&self) -> String {
        "for update".to_string()
    }

    fn for_share(&self) -> String {
        "for share".to_string()
    }

    fn compile_schema(&self, builder: &SchemaBuilder) -> Result<Vec<CompiledQuery>> {
        base::compile_schema(self, builder)
    }

    fn compile_table(&self, table: &TableBuilder) -> Result<Vec<CompiledQuery>> {
        base::compile_table(self, table)
    }

    /// Appended to `create table` when the table inherits from `parent`.
    fn inherits_clause(&self, parent: &str) -> String {
        format!(" inherits ({})", base::wrap(self, parent, None))
    }

    fn primary_key(
        &self,
        table: &TableBuilder,
        columns: &[String],
        constraint_name: Option<&str>,
    ) -> Result<Vec<CompiledQuery>> {
        Ok(vec![base::primary_key(
            self,
            table,
            columns,
            constraint_name,
        )])
    }

    fn drop_primary_key(
        &self,
        table: &TableBuilder,
        constraint_name: Option<&str>,
    ) -> Result<Vec<CompiledQuery>> {
        Ok(vec![base::drop_primary_key(self, table, constraint_name)])
    }

    fn index(
        &self,
        table: &TableBuilder,
        columns: &[String],
        index_name: Option<&str>,
    ) -> Result<Vec<CompiledQuery>> {
        Ok(vec![base::index(self, table, columns, index_name)])
    }

    fn drop_index(
        &self,
        table: &TableBuilder,
        columns: &[String],
        index_name: Option<&str>,
    ) -> Result<Vec<CompiledQuery>> {
        Ok(vec![base::drop_index(self, table, columns, index_name)])
    }

    fn has_table(&self, table_name: &str) -> CompiledQuery {
        let (schema, table) = crate::ident::split_qualified(table_name);
        base::has_table(&table, schema.as_deref())
    }

    fn has_column(&self, table_name: &str, column: &str) -> CompiledQuery {
        let (schema, table) = crate::ident::split_qualified(table_name);
        base::has_column(&table, column, schema.as_deref())
    }

    fn column_info(&self, table_name: &str, column: Option<&str>) -> CompiledQuery {
        let (schema, table) = crate::ident::split_qualified(table_name);
        base::column_info(
            &table,
            schema.as_deref(),
            column.map(|name| crate::ColumnLookup::new(name, crate::IdentifierCase::Preserve)),
        )
    }
}
