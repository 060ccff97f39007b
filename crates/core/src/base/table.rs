use crate::{
    ColumnDef, CompiledQuery, Dialect, Result, TableBuilder, TableCommand, TableMode,
    value::quote_string_literal,
};

use super::{wrap, wrap_list};

/// Compiles one table batch: the create/alter statement(s), then comments,
/// then table-level commands in declaration order.
pub fn compile_table<D: Dialect + ?Sized>(
    dialect: &D,
    table: &TableBuilder,
) -> Result<Vec<CompiledQuery>> {
    let mut statements = Vec::new();
    let table_name = wrap(dialect, &table.qualified_name(), None);

    match table.mode {
        TableMode::Create | TableMode::CreateIfNotExists => {
            statements.push(create_table_query(dialect, table));
        }
        TableMode::Alter => {
            for column in &table.columns {
                statements.push(CompiledQuery::ddl(format!(
                    "alter table {table_name} add column {}",
                    dialect.column_definition(column)
                )));
            }
        }
    }

    if let Some(comment) = &table.comment {
        statements.push(CompiledQuery::ddl(format!(
            "comment on table {table_name} is {}",
            quote_string_literal(comment)
        )));
    }
    statements.extend(column_comments(dialect, table, &table_name));

    for column in &table.columns {
        statements.extend(column_constraints(dialect, table, column)?);
    }

    for command in &table.commands {
        statements.extend(compile_command(dialect, table, &table_name, command)?);
    }

    Ok(statements)
}

/// `create table [if not exists] <name> (<defs>)[<inherits clause>]`.
pub fn create_table_query<D: Dialect + ?Sized>(dialect: &D, table: &TableBuilder) -> CompiledQuery {
    let if_not_exists = if table.mode == TableMode::CreateIfNotExists {
        "if not exists "
    } else {
        ""
    };
    let definitions = table
        .columns
        .iter()
        .map(|column| dialect.column_definition(column))
        .collect::<Vec<_>>()
        .join(", ");

    let mut sql = format!(
        "create table {if_not_exists}{} ({definitions})",
        wrap(dialect, &table.qualified_name(), None)
    );
    if let Some(parent) = &table.inherits {
        sql.push_str(&dialect.inherits_clause(parent));
    }
    CompiledQuery::ddl(sql)
}

fn column_comments<D: Dialect + ?Sized>(
    dialect: &D,
    table: &TableBuilder,
    table_name: &str,
) -> Vec<CompiledQuery> {
    table
        .columns
        .iter()
        .filter_map(|column| {
            let comment = column.comment.as_ref()?;
            Some(CompiledQuery::ddl(format!(
                "comment on column {table_name}.{} is {}",
                wrap(dialect, &column.name, None),
                quote_string_literal(comment)
            )))
        })
        .collect()
}

/// Column-level `primary`, `unique` and `index` flags, expanded into the
/// equivalent table commands.
fn column_constraints<D: Dialect + ?Sized>(
    dialect: &D,
    table: &TableBuilder,
    column: &ColumnDef,
) -> Result<Vec<CompiledQuery>> {
    let columns = std::slice::from_ref(&column.name);
    let mut statements = Vec::new();
    if column.primary {
        statements.extend(dialect.primary_key(table, columns, None)?);
    }
    if column.unique {
        statements.push(unique(dialect, table, columns, None));
    }
    if column.index {
        statements.extend(dialect.index(table, columns, None)?);
    }
    Ok(statements)
}

fn compile_command<D: Dialect + ?Sized>(
    dialect: &D,
    table: &TableBuilder,
    table_name: &str,
    command: &TableCommand,
) -> Result<Vec<CompiledQuery>> {
    let statements = match command {
        TableCommand::Primary { columns, name } => {
            dialect.primary_key(table, columns, name.as_deref())?
        }
        TableCommand::DropPrimary { name } => dialect.drop_primary_key(table, name.as_deref())?,
        TableCommand::Unique { columns, name } => {
            vec![unique(dialect, table, columns, name.as_deref())]
        }
        TableCommand::DropUnique { columns, name } => {
            let name = constraint_or_default(table, columns, name.as_deref(), "unique");
            vec![drop_constraint(dialect, table_name, &name)]
        }
        TableCommand::Index { columns, name } => dialect.index(table, columns, name.as_deref())?,
        TableCommand::DropIndex { columns, name } => {
            dialect.drop_index(table, columns, name.as_deref())?
        }
        TableCommand::Foreign {
            columns,
            references_table,
            references_columns,
            name,
            on_delete,
            on_update,
        } => {
            let name = constraint_or_default(table, columns, name.as_deref(), "foreign");
            let mut sql = format!(
                "alter table {table_name} add constraint {} foreign key ({}) references {} ({})",
                wrap(dialect, &name, None),
                wrap_list(dialect, columns, None),
                wrap(dialect, references_table, None),
                wrap_list(dialect, references_columns, None)
            );
            if let Some(action) = on_delete {
                sql.push_str(" on delete ");
                sql.push_str(action);
            }
            if let Some(action) = on_update {
                sql.push_str(" on update ");
                sql.push_str(action);
            }
            vec![CompiledQuery::ddl(sql)]
        }
        TableCommand::DropForeign { columns, name } => {
            let name = constraint_or_default(table, columns, name.as_deref(), "foreign");
            vec![drop_constraint(dialect, table_name, &name)]
        }
        TableCommand::DropColumns { columns } => columns
            .iter()
            .map(|column| {
                CompiledQuery::ddl(format!(
                    "alter table {table_name} drop column {}",
                    wrap(dialect, column, None)
                ))
            })
            .collect(),
        TableCommand::RenameColumn { from, to } => vec![CompiledQuery::ddl(format!(
            "alter table {table_name} rename column {} to {}",
            wrap(dialect, from, None),
            wrap(dialect, to, None)
        ))],
    };
    Ok(statements)
}

/// `<table>_<col>_<col>_<suffix>`, the conventional constraint name.
#[must_use]
pub fn default_constraint_name(table: &TableBuilder, columns: &[String], suffix: &str) -> String {
    let mut parts = vec![table.name.clone()];
    parts.extend(columns.iter().cloned());
    parts.push(suffix.to_string());
    parts.join("_").replace(['-', '.'], "_").to_lowercase()
}

fn constraint_or_default(
    table: &TableBuilder,
    columns: &[String],
    name: Option<&str>,
    suffix: &str,
) -> String {
    name.map_or_else(
        || default_constraint_name(table, columns, suffix),
        ToString::to_string,
    )
}

pub fn primary_key<D: Dialect + ?Sized>(
    dialect: &D,
    table: &TableBuilder,
    columns: &[String],
    constraint_name: Option<&str>,
) -> CompiledQuery {
    let name = constraint_name.map_or_else(|| format!("{}_pkey", table.name), ToString::to_string);
    CompiledQuery::ddl(format!(
        "alter table {} add constraint {} primary key ({})",
        wrap(dialect, &table.qualified_name(), None),
        wrap(dialect, &name, None),
        wrap_list(dialect, columns, None)
    ))
}

pub fn drop_primary_key<D: Dialect + ?Sized>(
    dialect: &D,
    table: &TableBuilder,
    constraint_name: Option<&str>,
) -> CompiledQuery {
    let name = constraint_name.map_or_else(|| format!("{}_pkey", table.name), ToString::to_string);
    drop_constraint(dialect, &wrap(dialect, &table.qualified_name(), None), &name)
}

fn unique<D: Dialect + ?Sized>(
    dialect: &D,
    table: &TableBuilder,
    columns: &[String],
    constraint_name: Option<&str>,
) -> CompiledQuery {
    let name = constraint_or_default(table, columns, constraint_name, "unique");
    CompiledQuery::ddl(format!(
        "alter table {} add constraint {} unique ({})",
        wrap(dialect, &table.qualified_name(), None),
        wrap(dialect, &name, None),
        wrap_list(dialect, columns, None)
    ))
}

fn drop_constraint<D: Dialect + ?Sized>(dialect: &D, table_name: &str, name: &str) -> CompiledQuery {
    CompiledQuery::ddl(format!(
        "alter table {table_name} drop constraint {}",
        wrap(dialect, name, None)
    ))
}

pub fn index<D: Dialect + ?Sized>(
    dialect: &D,
    table: &TableBuilder,
    columns: &[String],
    index_name: Option<&str>,
) -> CompiledQuery {
    let name = constraint_or_default(table, columns, index_name, "index");
    CompiledQuery::ddl(format!(
        "create index {} on {} ({})",
        wrap(dialect, &name, None),
        wrap(dialect, &table.qualified_name(), None),
        wrap_list(dialect, columns, None)
    ))
}

pub fn drop_index<D: Dialect + ?Sized>(
    dialect: &D,
    table: &TableBuilder,
    columns: &[String],
    index_name: Option<&str>,
) -> CompiledQuery {
    let name = constraint_or_default(table, columns, index_name, "index");
    CompiledQuery::ddl(format!("drop index {}", wrap(dialect, &name, None)))
}
