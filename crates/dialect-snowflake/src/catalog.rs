use sqlfrost_core::{ColumnLookup, CompiledQuery, base, ident::split_qualified};

use crate::{SnowflakeDialect, identifier::fold_catalog_name};

/// Splits `schema.table` and folds both parts to their catalog spelling.
fn catalog_target(dialect: &SnowflakeDialect, table_name: &str) -> (String, Option<String>) {
    let (schema, table) = split_qualified(table_name);
    (
        fold_catalog_name(dialect, &table),
        schema.map(|schema| fold_catalog_name(dialect, &schema)),
    )
}

pub(crate) fn has_table(dialect: &SnowflakeDialect, table_name: &str) -> CompiledQuery {
    let (table, schema) = catalog_target(dialect, table_name);
    base::has_table(&table, schema.as_deref())
}

pub(crate) fn has_column(dialect: &SnowflakeDialect, table_name: &str, column: &str) -> CompiledQuery {
    let (table, schema) = catalog_target(dialect, table_name);
    base::has_column(&table, &fold_catalog_name(dialect, column), schema.as_deref())
}

pub(crate) fn column_info(
    dialect: &SnowflakeDialect,
    table_name: &str,
    column: Option<&str>,
) -> CompiledQuery {
    let (table, schema) = catalog_target(dialect, table_name);
    let lookup = column.map(|name| ColumnLookup {
        name: name.to_string(),
        folded: fold_catalog_name(dialect, name),
    });
    base::column_info(&table, schema.as_deref(), lookup)
}
