//! Base ("inherited") compilers shared by every dialect.
//!
//! Each function takes the dialect it compiles for so identifier quoting and
//! type names dispatch through the dialect's overrides.

mod column;
mod query;
mod schema;
mod table;

pub use column::{column_definition, column_type, format_numeric};
pub use query::{
    compile, compile_delete, compile_insert, compile_select, compile_truncate, compile_update,
};
pub use schema::{column_info, compile_schema, has_column, has_table};
pub use table::{
    compile_table, create_table_query, default_constraint_name, drop_index, drop_primary_key,
    index, primary_key,
};

use crate::{
    Dialect, QueryContext,
    ident::{IDENTIFIER_QUOTE, split_alias, split_identifier, unquote},
};

/// Double-quotes one identifier atom, escaping embedded quotes. `*` is kept
/// bare.
#[must_use]
pub fn quote_identifier(value: &str) -> String {
    if value == "*" {
        return value.to_string();
    }
    format!(
        "{IDENTIFIER_QUOTE}{}{IDENTIFIER_QUOTE}",
        value.replace(IDENTIFIER_QUOTE, "\"\"")
    )
}

/// Wraps a possibly qualified and aliased identifier, deciding each atom
/// through [`Dialect::wrap_identifier`].
pub fn wrap<D: Dialect + ?Sized>(dialect: &D, value: &str, context: Option<&QueryContext>) -> String {
    if let Some((expr, alias)) = split_alias(value) {
        return format!(
            "{} as {}",
            wrap(dialect, expr, context),
            wrap_atom(dialect, alias, context)
        );
    }

    split_identifier(value)
        .into_iter()
        .map(|atom| wrap_atom(dialect, atom, context))
        .collect::<Vec<_>>()
        .join(".")
}

fn wrap_atom<D: Dialect + ?Sized>(dialect: &D, atom: &str, context: Option<&QueryContext>) -> String {
    if atom == "*" {
        return atom.to_string();
    }
    dialect.wrap_identifier(atom, context)
}

/// The key a selected column comes back under: its alias or its last atom,
/// cased the way the dialect wraps it.
pub fn result_column<D: Dialect + ?Sized>(
    dialect: &D,
    value: &str,
    context: Option<&QueryContext>,
) -> String {
    let name = split_alias(value).map_or(value, |(_, alias)| alias);
    let atom = split_identifier(name).last().copied().unwrap_or(name);
    unquote(&wrap_atom(dialect, atom, context))
}

pub(crate) fn wrap_list<D: Dialect + ?Sized>(
    dialect: &D,
    values: &[String],
    context: Option<&QueryContext>,
) -> String {
    values
        .iter()
        .map(|value| wrap(dialect, value, context))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Wraps a table name, honouring an explicit schema prefix.
pub fn wrap_table<D: Dialect + ?Sized>(
    dialect: &D,
    table: &str,
    schema: Option<&str>,
    context: Option<&QueryContext>,
) -> String {
    match schema {
        Some(schema) => format!(
            "{}.{}",
            wrap(dialect, schema, context),
            wrap(dialect, table, context)
        ),
        None => wrap(dialect, table, context),
    }
}
