use sqlfrost_core::{ColumnDef, ColumnType, base};

use crate::SnowflakeDialect;

const DEFAULT_STRING_LENGTH: u32 = 255;
const MAX_VARCHAR: &str = "varchar(max)";

pub(crate) fn column_type(dialect: &SnowflakeDialect, column: &ColumnDef) -> String {
    match &column.column_type {
        ColumnType::Increments { primary_key } => identity("integer", *primary_key),
        ColumnType::BigIncrements { primary_key } => identity("bigint", *primary_key),
        ColumnType::Integer | ColumnType::MediumInteger => "int".to_string(),
        ColumnType::BigInteger => "bigint".to_string(),
        ColumnType::SmallInteger => "smallint".to_string(),
        ColumnType::TinyInteger => "tinyint".to_string(),
        ColumnType::Float { .. } => "float".to_string(),
        ColumnType::Double { precision, scale } => match (precision, scale) {
            (Some(_), Some(_)) => base::format_numeric("double", *precision, *scale),
            _ => "double precision".to_string(),
        },
        ColumnType::Decimal { precision, scale } => {
            base::format_numeric("decimal", *precision, *scale)
        }
        ColumnType::String { length } => {
            format!("varchar({})", length.unwrap_or(DEFAULT_STRING_LENGTH))
        }
        ColumnType::Text
        | ColumnType::MediumText
        | ColumnType::LongText
        | ColumnType::Binary { .. }
        | ColumnType::Varbinary { .. }
        | ColumnType::LongBlob => MAX_VARCHAR.to_string(),
        ColumnType::Uuid => "char(36)".to_string(),
        ColumnType::DateTime { use_tz, precision } | ColumnType::Timestamp { use_tz, precision } => {
            let name = if *use_tz { "timestamp_tz" } else { "timestamp" };
            match precision {
                Some(precision) => format!("{name}({precision})"),
                None => name.to_string(),
            }
        }
        ColumnType::Date => "date".to_string(),
        ColumnType::Time => "time".to_string(),
        ColumnType::Boolean => "boolean".to_string(),
        ColumnType::Json | ColumnType::Jsonb => "variant".to_string(),
        ColumnType::Enum { values } | ColumnType::Set { values } => {
            dialect.warn(
                "enum",
                format!(
                    "column `{}` is stored as varchar({DEFAULT_STRING_LENGTH}); allowed values [{}] are not enforced",
                    column.name,
                    values.join(", ")
                ),
            );
            format!("varchar({DEFAULT_STRING_LENGTH})")
        }
        ColumnType::Geography => "geography".to_string(),
        ColumnType::Specific { name } => name.clone(),
    }
}

fn identity(name: &str, primary_key: bool) -> String {
    if primary_key {
        format!("{name} identity(1,1) primary key not null")
    } else {
        format!("{name} identity(1,1) not null")
    }
}

pub(crate) fn column_definition(dialect: &SnowflakeDialect, column: &ColumnDef) -> String {
    if column.unsigned {
        dialect.warn(
            "unsigned",
            format!("unsigned modifier on column `{}` is not supported and was dropped", column.name),
        );
    }
    base::column_definition(dialect, column)
}
