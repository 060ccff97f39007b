use std::collections::BTreeMap;

use crate::{IdentifierCase, QueryResponse, Row, Value};

/// How a response to a compiled statement is shaped for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Select,
    First,
    Pluck(String),
    Insert,
    Update,
    Del,
    Truncate,
    Raw,
    Schema,
}

/// One SQL statement with its ordered bindings.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    pub sql: String,
    pub bindings: Vec<Value>,
    pub method: Method,
    pub output: Option<OutputProcessor>,
}

impl CompiledQuery {
    pub fn new(sql: impl Into<String>, bindings: Vec<Value>, method: Method) -> Self {
        Self {
            sql: sql.into(),
            bindings,
            method,
            output: None,
        }
    }

    /// A schema statement without bindings.
    pub fn ddl(sql: impl Into<String>) -> Self {
        Self::new(sql, Vec::new(), Method::Schema)
    }

    #[must_use]
    pub fn empty(method: Method) -> Self {
        Self::new(String::new(), Vec::new(), method)
    }

    #[must_use]
    pub fn with_output(mut self, output: OutputProcessor) -> Self {
        self.output = Some(output);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sql.trim().is_empty()
    }
}

/// A column requested from `column_info`, with the case-folded spelling used
/// for catalog lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLookup {
    pub name: String,
    pub folded: String,
}

impl ColumnLookup {
    pub fn new(name: &str, case: IdentifierCase) -> Self {
        Self {
            name: name.to_string(),
            folded: case.apply(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnInfo {
    pub data_type: String,
    pub max_length: Option<i64>,
    pub nullable: bool,
    pub default_value: Option<Value>,
}

/// Post-processing attached at compile time and applied to the raw response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputProcessor {
    Exists,
    ColumnInfo { column: Option<ColumnLookup> },
}

impl OutputProcessor {
    #[must_use]
    pub fn apply(&self, response: &QueryResponse) -> QueryOutput {
        match self {
            Self::Exists => QueryOutput::Exists(!response.rows.is_empty()),
            Self::ColumnInfo { column } => {
                let columns = reduce_column_info(&response.rows);
                match column {
                    Some(lookup) => QueryOutput::Column(
                        columns
                            .get(&lookup.folded)
                            .or_else(|| columns.get(&lookup.name))
                            .cloned(),
                    ),
                    None => QueryOutput::Columns(columns),
                }
            }
        }
    }
}

/// The caller-facing result of one executed statement.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryOutput {
    Empty,
    Rows(Vec<Row>),
    Row(Option<Row>),
    Values(Vec<Value>),
    Affected(u64),
    Exists(bool),
    Columns(BTreeMap<String, ColumnInfo>),
    Column(Option<ColumnInfo>),
    Raw(QueryResponse),
}

fn reduce_column_info(rows: &[Row]) -> BTreeMap<String, ColumnInfo> {
    rows.iter()
        .filter_map(|row| {
            let name = catalog_field(row, "column_name")?.as_str()?.to_string();
            let info = ColumnInfo {
                data_type: catalog_field(row, "data_type")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                max_length: catalog_field(row, "character_maximum_length").and_then(Value::as_i64),
                nullable: catalog_field(row, "is_nullable")
                    .and_then(Value::as_str)
                    .is_some_and(|value| value.eq_ignore_ascii_case("YES")),
                default_value: catalog_field(row, "column_default")
                    .filter(|value| !value.is_null())
                    .cloned(),
            };
            Some((name, info))
        })
        .collect()
}

/// Reads a catalog column regardless of how the warehouse cased its name.
pub fn catalog_field<'a>(row: &'a Row, name: &str) -> Option<&'a Value> {
    row.get(name)
        .or_else(|| row.get(&name.to_ascii_uppercase()))
        .or_else(|| row.get(&name.to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::{ColumnLookup, OutputProcessor, QueryOutput};
    use crate::{IdentifierCase, QueryResponse, StatementInfo, Value, row};

    fn catalog_response() -> QueryResponse {
        QueryResponse {
            rows: vec![
                row([
                    ("COLUMN_NAME", Value::from("ID")),
                    ("DATA_TYPE", Value::from("NUMBER")),
                    ("CHARACTER_MAXIMUM_LENGTH", Value::Null),
                    ("IS_NULLABLE", Value::from("NO")),
                    ("COLUMN_DEFAULT", Value::Null),
                ]),
                row([
                    ("COLUMN_NAME", Value::from("NAME")),
                    ("DATA_TYPE", Value::from("TEXT")),
                    ("CHARACTER_MAXIMUM_LENGTH", Value::from(255)),
                    ("IS_NULLABLE", Value::from("YES")),
                    ("COLUMN_DEFAULT", Value::from("'anon'")),
                ]),
            ],
            statement: StatementInfo::default(),
        }
    }

    #[test]
    fn column_info_reduces_every_row() {
        let output = OutputProcessor::ColumnInfo { column: None }.apply(&catalog_response());
        let QueryOutput::Columns(columns) = output else {
            panic!("expected column map, got {output:?}");
        };
        assert_eq!(columns.len(), 2);
        assert_eq!(columns["NAME"].max_length, Some(255));
        assert!(columns["NAME"].nullable);
        assert!(!columns["ID"].nullable);
    }

    #[test]
    fn column_info_looks_up_folded_name() {
        let output = OutputProcessor::ColumnInfo {
            column: Some(ColumnLookup::new("name", IdentifierCase::Upper)),
        }
        .apply(&catalog_response());
        let QueryOutput::Column(Some(info)) = output else {
            panic!("expected single column, got {output:?}");
        };
        assert_eq!(info.data_type, "TEXT");
        assert_eq!(info.default_value, Some(Value::from("'anon'")));
    }

    #[test]
    fn exists_reflects_row_count() {
        assert_eq!(
            OutputProcessor::Exists.apply(&catalog_response()),
            QueryOutput::Exists(true)
        );
        assert_eq!(
            OutputProcessor::Exists.apply(&QueryResponse::default()),
            QueryOutput::Exists(false)
        );
    }
}
