use sqlfrost_core::{CompileError, CompiledQuery, Dialect, Result, TableBuilder, base};

use crate::SnowflakeDialect;

/// Emits the primary key only when every column defined in this batch is
/// declared non-nullable. Columns the batch does not define are assumed to
/// exist already. A batch identity column that renders its own `primary key`
/// already owns the table's key, so no second constraint is added.
pub(crate) fn primary_key(
    dialect: &SnowflakeDialect,
    table: &TableBuilder,
    columns: &[String],
    constraint_name: Option<&str>,
) -> Result<Vec<CompiledQuery>> {
    if let Some(identity) = inline_primary_column(table, columns) {
        dialect.warn(
            "primary",
            format!(
                "primary key on `{}` skipped: identity column `{identity}` already declares the primary key",
                table.qualified_name()
            ),
        );
        return Ok(Vec::new());
    }

    let nullable = nullable_batch_columns(table, columns);
    if nullable.is_empty() {
        return Ok(vec![base::primary_key(dialect, table, columns, constraint_name)]);
    }

    if dialect.strict_primary_keys {
        return Err(CompileError::NullablePrimaryKey {
            dialect: dialect.name(),
            table: table.qualified_name(),
            columns: nullable,
        }
        .into());
    }

    dialect.warn(
        "primary",
        format!(
            "primary key on `{}` skipped: columns [{}] must be declared not_nullable()",
            table.qualified_name(),
            nullable.join(", ")
        ),
    );
    Ok(Vec::new())
}

fn inline_primary_column<'a>(table: &'a TableBuilder, columns: &[String]) -> Option<&'a str> {
    columns
        .iter()
        .filter_map(|name| table.column_def(name))
        .find(|column| column.column_type.has_inline_primary_key())
        .map(|column| column.name.as_str())
}

fn nullable_batch_columns(table: &TableBuilder, columns: &[String]) -> Vec<String> {
    columns
        .iter()
        .filter(|name| {
            table
                .column_def(name)
                .is_some_and(|column| !column.is_not_null())
        })
        .cloned()
        .collect()
}

pub(crate) fn drop_primary_key(dialect: &SnowflakeDialect, table: &TableBuilder) -> CompiledQuery {
    CompiledQuery::ddl(format!(
        "alter table {} drop primary key",
        base::wrap(dialect, &table.qualified_name(), None)
    ))
}

pub(crate) fn unsupported_index(
    dialect: &SnowflakeDialect,
    operation: &'static str,
    table: &TableBuilder,
    columns: &[String],
) -> Vec<CompiledQuery> {
    dialect.warn(
        operation,
        format!(
            "indexes are not supported; {operation} on `{}` ({}) was ignored",
            table.qualified_name(),
            columns.join(", ")
        ),
    );
    Vec::new()
}
