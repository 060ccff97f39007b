use crate::{
    ColumnLookup, CompiledQuery, Dialect, Method, OutputProcessor, Result, SchemaBuilder,
    SchemaCommand, Value,
};

use super::wrap;

const TABLES_QUERY: &str = "select * from information_schema.tables where table_name = ?";
const COLUMNS_QUERY: &str = "select * from information_schema.columns where table_name = ?";
const SCHEMA_FILTER: &str = " and table_schema = ?";
const CURRENT_SCHEMA_FILTER: &str = " and table_schema = current_schema()";
const COLUMN_FILTER: &str = " and column_name = ?";

pub fn compile_schema<D: Dialect + ?Sized>(
    dialect: &D,
    builder: &SchemaBuilder,
) -> Result<Vec<CompiledQuery>> {
    let mut statements = Vec::new();

    for command in &builder.commands {
        match command {
            SchemaCommand::Table(table) => statements.extend(dialect.compile_table(table)?),
            SchemaCommand::DropTable { name, if_exists } => {
                let if_exists = if *if_exists { "if exists " } else { "" };
                statements.push(CompiledQuery::ddl(format!(
                    "drop table {if_exists}{}",
                    wrap(dialect, &builder.qualify(name), None)
                )));
            }
            SchemaCommand::RenameTable { from, to } => {
                statements.push(CompiledQuery::ddl(format!(
                    "alter table {} rename to {}",
                    wrap(dialect, &builder.qualify(from), None),
                    wrap(dialect, &builder.qualify(to), None)
                )));
            }
            SchemaCommand::HasTable { name } => {
                statements.push(dialect.has_table(&builder.qualify(name)));
            }
            SchemaCommand::HasColumn { table, column } => {
                statements.push(dialect.has_column(&builder.qualify(table), column));
            }
            SchemaCommand::ColumnInfo { table, column } => {
                statements.push(dialect.column_info(&builder.qualify(table), column.as_deref()));
            }
            SchemaCommand::CreateSchema {
                name,
                if_not_exists,
            } => {
                let if_not_exists = if *if_not_exists { "if not exists " } else { "" };
                statements.push(CompiledQuery::ddl(format!(
                    "create schema {if_not_exists}{}",
                    wrap(dialect, name, None)
                )));
            }
            SchemaCommand::DropSchema { name, if_exists } => {
                let if_exists = if *if_exists { "if exists " } else { "" };
                statements.push(CompiledQuery::ddl(format!(
                    "drop schema {if_exists}{}",
                    wrap(dialect, name, None)
                )));
            }
            SchemaCommand::Raw(raw) => statements.push(CompiledQuery::new(
                raw.sql.clone(),
                raw.bindings.clone(),
                Method::Raw,
            )),
        }
    }

    Ok(statements)
}

/// Catalog lookup for one table. `table` and `schema` are bound verbatim, so
/// callers fold them to the catalog's spelling first.
#[must_use]
pub fn has_table(table: &str, schema: Option<&str>) -> CompiledQuery {
    let (sql, bindings) = catalog_query(TABLES_QUERY, table, schema, None);
    CompiledQuery::new(sql, bindings, Method::Select).with_output(OutputProcessor::Exists)
}

#[must_use]
pub fn has_column(table: &str, column: &str, schema: Option<&str>) -> CompiledQuery {
    let (sql, bindings) = catalog_query(COLUMNS_QUERY, table, schema, Some(column));
    CompiledQuery::new(sql, bindings, Method::Select).with_output(OutputProcessor::Exists)
}

#[must_use]
pub fn column_info(table: &str, schema: Option<&str>, column: Option<ColumnLookup>) -> CompiledQuery {
    let (sql, bindings) = catalog_query(COLUMNS_QUERY, table, schema, None);
    CompiledQuery::new(sql, bindings, Method::Select)
        .with_output(OutputProcessor::ColumnInfo { column })
}

fn catalog_query(
    base: &str,
    table: &str,
    schema: Option<&str>,
    column: Option<&str>,
) -> (String, Vec<Value>) {
    let mut sql = base.to_string();
    let mut bindings = vec![Value::from(table)];

    match schema {
        Some(schema) => {
            sql.push_str(SCHEMA_FILTER);
            bindings.push(Value::from(schema));
        }
        None => sql.push_str(CURRENT_SCHEMA_FILTER),
    }

    if let Some(column) = column {
        sql.push_str(COLUMN_FILTER);
        bindings.push(Value::from(column));
    }

    (sql, bindings)
}
