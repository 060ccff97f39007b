use std::collections::BTreeSet;

use crate::{
    CompileError, CompiledQuery, Dialect, Direction, LockMode, Method, Query, QueryMethod, Result,
    Value, Where,
};

use super::{result_column, wrap, wrap_list, wrap_table};

const DEFAULT_MARKER: &str = "DEFAULT";

/// Dispatches a query description to the dialect's per-method compiler.
pub fn compile<D: Dialect + ?Sized>(dialect: &D, query: &Query) -> Result<CompiledQuery> {
    match query.method {
        QueryMethod::Select | QueryMethod::First | QueryMethod::Pluck => {
            dialect.compile_select(query)
        }
        QueryMethod::Insert => dialect.compile_insert(query),
        QueryMethod::Update => dialect.compile_update(query),
        QueryMethod::Del => dialect.compile_delete(query),
        QueryMethod::Truncate => dialect.compile_truncate(query),
        QueryMethod::Raw => {
            let raw = query.raw.clone().unwrap_or_default();
            Ok(CompiledQuery::new(raw.sql, raw.bindings, Method::Raw))
        }
    }
}

pub fn compile_select<D: Dialect + ?Sized>(dialect: &D, query: &Query) -> Result<CompiledQuery> {
    let table = table_name(dialect, query)?;
    let context = query.context.as_ref();
    let mut bindings = Vec::new();

    let columns = match (&query.method, &query.pluck) {
        (QueryMethod::Pluck, Some(column)) => wrap(dialect, column, context),
        _ if query.columns.is_empty() => "*".to_string(),
        _ => wrap_list(dialect, &query.columns, context),
    };

    let mut sql = format!("select {columns} from {table}");
    push_wheres(dialect, query, &mut sql, &mut bindings);

    if !query.orders.is_empty() {
        let orders = query
            .orders
            .iter()
            .map(|order| {
                let direction = match order.direction {
                    Direction::Asc => "asc",
                    Direction::Desc => "desc",
                };
                format!("{} {direction}", wrap(dialect, &order.column, context))
            })
            .collect::<Vec<_>>()
            .join(", ");
        sql.push_str(" order by ");
        sql.push_str(&orders);
    }

    let limit = match query.method {
        QueryMethod::First => Some(1),
        _ => query.limit,
    };
    if let Some(limit) = limit {
        sql.push_str(" limit ?");
        bindings.push(Value::Integer(clamp_to_i64(limit)));
    }
    if let Some(offset) = query.offset {
        sql.push_str(" offset ?");
        bindings.push(Value::Integer(clamp_to_i64(offset)));
    }

    let lock = match query.lock {
        Some(LockMode::ForUpdate) => dialect.for_update(),
        Some(LockMode::ForShare) => dialect.for_share(),
        None => String::new(),
    };
    if !lock.is_empty() {
        sql.push(' ');
        sql.push_str(&lock);
    }

    let method = match (&query.method, &query.pluck) {
        (QueryMethod::First, _) => Method::First,
        (QueryMethod::Pluck, Some(column)) => {
            Method::Pluck(result_column(dialect, column, context))
        }
        _ => Method::Select,
    };
    Ok(CompiledQuery::new(sql, bindings, method))
}

pub fn compile_insert<D: Dialect + ?Sized>(dialect: &D, query: &Query) -> Result<CompiledQuery> {
    let table = table_name(dialect, query)?;
    let context = query.context.as_ref();

    if query.rows.is_empty() {
        return Ok(CompiledQuery::empty(Method::Insert));
    }

    let columns = query
        .rows
        .iter()
        .flat_map(|row| row.keys().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect::<Vec<_>>();

    if columns.is_empty() && query.rows.len() > 1 {
        return Err(CompileError::EmptyRows {
            dialect: dialect.name(),
            table: query.table.clone().unwrap_or_default(),
            rows: query.rows.len(),
        }
        .into());
    }

    let mut sql = if columns.is_empty() {
        format!("insert into {table} default values")
    } else {
        let mut bindings_sql = Vec::with_capacity(query.rows.len());
        for row in &query.rows {
            let slots = columns
                .iter()
                .map(|column| {
                    if row.contains_key(column) {
                        "?"
                    } else {
                        DEFAULT_MARKER
                    }
                })
                .collect::<Vec<_>>()
                .join(", ");
            bindings_sql.push(format!("({slots})"));
        }
        format!(
            "insert into {table} ({}) values {}",
            wrap_list(dialect, &columns, context),
            bindings_sql.join(", ")
        )
    };

    let bindings = query
        .rows
        .iter()
        .flat_map(|row| columns.iter().filter_map(|column| row.get(column).cloned()))
        .collect();

    push_returning(dialect, query, &mut sql);
    Ok(CompiledQuery::new(sql, bindings, Method::Insert))
}

pub fn compile_update<D: Dialect + ?Sized>(dialect: &D, query: &Query) -> Result<CompiledQuery> {
    let table = table_name(dialect, query)?;
    let context = query.context.as_ref();

    if query.values.is_empty() {
        return Err(CompileError::EmptyUpdate {
            dialect: dialect.name(),
            table: query.table.clone().unwrap_or_default(),
        }
        .into());
    }

    let mut bindings = Vec::with_capacity(query.values.len());
    let assignments = query
        .values
        .iter()
        .map(|(column, value)| {
            bindings.push(value.clone());
            format!("{} = ?", wrap(dialect, column, context))
        })
        .collect::<Vec<_>>()
        .join(", ");

    let mut sql = format!("update {table} set {assignments}");
    push_wheres(dialect, query, &mut sql, &mut bindings);
    push_returning(dialect, query, &mut sql);
    Ok(CompiledQuery::new(sql, bindings, Method::Update))
}

pub fn compile_delete<D: Dialect + ?Sized>(dialect: &D, query: &Query) -> Result<CompiledQuery> {
    let table = table_name(dialect, query)?;
    let mut bindings = Vec::new();
    let mut sql = format!("delete from {table}");
    push_wheres(dialect, query, &mut sql, &mut bindings);
    push_returning(dialect, query, &mut sql);
    Ok(CompiledQuery::new(sql, bindings, Method::Del))
}

pub fn compile_truncate<D: Dialect + ?Sized>(
    dialect: &D,
    query: &Query,
) -> Result<CompiledQuery> {
    let table = table_name(dialect, query)?;
    Ok(CompiledQuery::new(
        format!("truncate table {table}"),
        Vec::new(),
        Method::Truncate,
    ))
}

fn table_name<D: Dialect + ?Sized>(dialect: &D, query: &Query) -> Result<String> {
    let table = query.table.as_deref().ok_or(CompileError::MissingTable {
        dialect: dialect.name(),
        method: query.method.as_str(),
    })?;
    Ok(wrap_table(
        dialect,
        table,
        query.schema.as_deref(),
        query.context.as_ref(),
    ))
}

fn push_wheres<D: Dialect + ?Sized>(
    dialect: &D,
    query: &Query,
    sql: &mut String,
    bindings: &mut Vec<Value>,
) {
    if query.wheres.is_empty() {
        return;
    }

    let context = query.context.as_ref();
    let clauses = query
        .wheres
        .iter()
        .map(|clause| match clause {
            Where::Compare {
                column,
                operator,
                value,
            } => {
                bindings.push(value.clone());
                format!("{} {operator} ?", wrap(dialect, column, context))
            }
            Where::In { values, .. } if values.is_empty() => "1 = 0".to_string(),
            Where::In { column, values } => {
                bindings.extend(values.iter().cloned());
                let slots = vec!["?"; values.len()].join(", ");
                format!("{} in ({slots})", wrap(dialect, column, context))
            }
            Where::Null { column, not } => {
                let test = if *not { "is not null" } else { "is null" };
                format!("{} {test}", wrap(dialect, column, context))
            }
            Where::Raw {
                sql,
                bindings: raw_bindings,
            } => {
                bindings.extend(raw_bindings.iter().cloned());
                sql.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" and ");

    sql.push_str(" where ");
    sql.push_str(&clauses);
}

fn push_returning<D: Dialect + ?Sized>(dialect: &D, query: &Query, sql: &mut String) {
    if query.returning.is_empty() {
        return;
    }
    sql.push_str(" returning ");
    sql.push_str(&wrap_list(dialect, &query.returning, query.context.as_ref()));
}

fn clamp_to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
