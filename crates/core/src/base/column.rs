use crate::{ColumnDef, ColumnType, Dialect};

use super::wrap;

const DEFAULT_STRING_LENGTH: u32 = 255;

/// `name`, `name(p)` or `name(p, s)` depending on which arguments are set.
#[must_use]
pub fn format_numeric(name: &str, precision: Option<u32>, scale: Option<u32>) -> String {
    match (precision, scale) {
        (Some(precision), Some(scale)) => format!("{name}({precision}, {scale})"),
        (Some(precision), None) => format!("{name}({precision})"),
        (None, _) => name.to_string(),
    }
}

fn with_precision(name: &str, precision: Option<u32>) -> String {
    match precision {
        Some(precision) => format!("{name}({precision})"),
        None => name.to_string(),
    }
}

#[must_use]
pub fn column_type(column: &ColumnDef) -> String {
    match &column.column_type {
        ColumnType::Increments { primary_key } => {
            if *primary_key {
                "serial primary key".to_string()
            } else {
                "serial".to_string()
            }
        }
        ColumnType::BigIncrements { primary_key } => {
            if *primary_key {
                "bigserial primary key".to_string()
            } else {
                "bigserial".to_string()
            }
        }
        ColumnType::Integer | ColumnType::MediumInteger => "integer".to_string(),
        ColumnType::BigInteger => "bigint".to_string(),
        ColumnType::SmallInteger | ColumnType::TinyInteger => "smallint".to_string(),
        ColumnType::Float { .. } => "real".to_string(),
        ColumnType::Double { .. } => "double precision".to_string(),
        ColumnType::Decimal { precision, scale } => format_numeric("decimal", *precision, *scale),
        ColumnType::String { length } => {
            format!("varchar({})", length.unwrap_or(DEFAULT_STRING_LENGTH))
        }
        ColumnType::Text | ColumnType::MediumText | ColumnType::LongText => "text".to_string(),
        ColumnType::Binary { .. } | ColumnType::Varbinary { .. } | ColumnType::LongBlob => {
            "bytea".to_string()
        }
        ColumnType::Boolean => "boolean".to_string(),
        ColumnType::Date => "date".to_string(),
        ColumnType::Time => "time".to_string(),
        ColumnType::DateTime { use_tz, precision } | ColumnType::Timestamp { use_tz, precision } => {
            with_precision(if *use_tz { "timestamptz" } else { "timestamp" }, *precision)
        }
        ColumnType::Json => "json".to_string(),
        ColumnType::Jsonb => "jsonb".to_string(),
        ColumnType::Uuid => "uuid".to_string(),
        ColumnType::Enum { .. } | ColumnType::Set { .. } => "text".to_string(),
        ColumnType::Geography => "geography".to_string(),
        ColumnType::Specific { name } => name.clone(),
    }
}

/// `<name> <type>[ null|not null][ default <literal>]`.
pub fn column_definition<D: Dialect + ?Sized>(dialect: &D, column: &ColumnDef) -> String {
    let mut sql = format!(
        "{} {}",
        wrap(dialect, &column.name, None),
        dialect.column_type(column)
    );

    if !column.column_type.is_increments() {
        match column.nullable {
            Some(false) => sql.push_str(" not null"),
            Some(true) => sql.push_str(" null"),
            None => {}
        }
    }

    if let Some(default) = &column.default {
        sql.push_str(" default ");
        sql.push_str(&default.to_sql());
    }

    sql
}
