use std::borrow::Cow;

use sqlfrost_core::{CompileError, CompiledQuery, Dialect, Method, Query, Result, base};

use crate::SnowflakeDialect;

/// Always a single statement. An insert with no rows compiles to empty SQL.
pub(crate) fn compile_insert(dialect: &SnowflakeDialect, query: &Query) -> Result<CompiledQuery> {
    base::compile_insert(dialect, &without_returning(dialect, query, "insert"))
}

pub(crate) fn compile_update(dialect: &SnowflakeDialect, query: &Query) -> Result<CompiledQuery> {
    base::compile_update(dialect, &without_returning(dialect, query, "update"))
}

pub(crate) fn compile_delete(dialect: &SnowflakeDialect, query: &Query) -> Result<CompiledQuery> {
    base::compile_delete(dialect, &without_returning(dialect, query, "del"))
}

pub(crate) fn compile_truncate(dialect: &SnowflakeDialect, query: &Query) -> Result<CompiledQuery> {
    let table = query.table.as_deref().ok_or(CompileError::MissingTable {
        dialect: dialect.name(),
        method: query.method.as_str(),
    })?;
    let table = base::wrap_table(
        dialect,
        table,
        query.schema.as_deref(),
        query.context.as_ref(),
    );
    Ok(CompiledQuery::new(
        format!("truncate {table}"),
        Vec::new(),
        Method::Truncate,
    ))
}

/// Row locks do not exist; the clause compiles to nothing.
pub(crate) fn lock_clause(dialect: &SnowflakeDialect, operation: &'static str) -> String {
    dialect.warn(
        operation,
        "row-level locking is not supported; the lock clause was dropped",
    );
    String::new()
}

fn without_returning<'a>(
    dialect: &SnowflakeDialect,
    query: &'a Query,
    operation: &'static str,
) -> Cow<'a, Query> {
    if query.returning.is_empty() {
        return Cow::Borrowed(query);
    }

    dialect.warn(
        operation,
        format!(
            "returning [{}] is not supported and was ignored",
            query.returning.join(", ")
        ),
    );
    let mut query = query.clone();
    query.returning.clear();
    Cow::Owned(query)
}
