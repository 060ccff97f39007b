use serde::Deserialize;

use crate::{QueryContext, Row, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMethod {
    #[default]
    Select,
    First,
    Pluck,
    Insert,
    Update,
    Del,
    Truncate,
    Raw,
}

impl QueryMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::First => "first",
            Self::Pluck => "pluck",
            Self::Insert => "insert",
            Self::Update => "update",
            Self::Del => "del",
            Self::Truncate => "truncate",
            Self::Raw => "raw",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockMode {
    ForUpdate,
    ForShare,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OrderBy {
    pub column: String,
    #[serde(default)]
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Where {
    Compare {
        column: String,
        #[serde(default = "default_operator")]
        operator: String,
        value: Value,
    },
    In {
        column: String,
        values: Vec<Value>,
    },
    Null {
        column: String,
        #[serde(default)]
        not: bool,
    },
    Raw {
        sql: String,
        #[serde(default)]
        bindings: Vec<Value>,
    },
}

fn default_operator() -> String {
    "=".to_string()
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct RawSql {
    pub sql: String,
    #[serde(default)]
    pub bindings: Vec<Value>,
}

impl RawSql {
    pub fn new(sql: impl Into<String>, bindings: Vec<Value>) -> Self {
        Self {
            sql: sql.into(),
            bindings,
        }
    }
}

/// Description of a single DML statement, as assembled by a fluent builder.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Query {
    pub table: Option<String>,
    pub schema: Option<String>,
    pub method: QueryMethod,
    pub columns: Vec<String>,
    pub wheres: Vec<Where>,
    pub orders: Vec<OrderBy>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub rows: Vec<Row>,
    pub values: Row,
    pub returning: Vec<String>,
    pub lock: Option<LockMode>,
    pub pluck: Option<String>,
    pub raw: Option<RawSql>,
    pub context: Option<QueryContext>,
}

impl Query {
    pub fn table(name: impl Into<String>) -> Self {
        Self {
            table: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn raw(sql: impl Into<String>, bindings: Vec<Value>) -> Self {
        Self {
            method: QueryMethod::Raw,
            raw: Some(RawSql::new(sql, bindings)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    #[must_use]
    pub fn select<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns.extend(columns.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn where_eq(self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.where_op(column, "=", value)
    }

    #[must_use]
    pub fn where_op(
        mut self,
        column: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.wheres.push(Where::Compare {
            column: column.into(),
            operator: operator.into(),
            value: value.into(),
        });
        self
    }

    #[must_use]
    pub fn where_in(mut self, column: impl Into<String>, values: Vec<Value>) -> Self {
        self.wheres.push(Where::In {
            column: column.into(),
            values,
        });
        self
    }

    #[must_use]
    pub fn where_null(mut self, column: impl Into<String>) -> Self {
        self.wheres.push(Where::Null {
            column: column.into(),
            not: false,
        });
        self
    }

    #[must_use]
    pub fn where_not_null(mut self, column: impl Into<String>) -> Self {
        self.wheres.push(Where::Null {
            column: column.into(),
            not: true,
        });
        self
    }

    #[must_use]
    pub fn order_by(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.orders.push(OrderBy {
            column: column.into(),
            direction,
        });
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }

    #[must_use]
    pub fn first(mut self) -> Self {
        self.method = QueryMethod::First;
        self
    }

    #[must_use]
    pub fn pluck(mut self, column: impl Into<String>) -> Self {
        self.method = QueryMethod::Pluck;
        self.pluck = Some(column.into());
        self
    }

    #[must_use]
    pub fn insert(mut self, rows: Vec<Row>) -> Self {
        self.method = QueryMethod::Insert;
        self.rows = rows;
        self
    }

    #[must_use]
    pub fn update(mut self, values: Row) -> Self {
        self.method = QueryMethod::Update;
        self.values = values;
        self
    }

    #[must_use]
    pub fn del(mut self) -> Self {
        self.method = QueryMethod::Del;
        self
    }

    #[must_use]
    pub fn truncate(mut self) -> Self {
        self.method = QueryMethod::Truncate;
        self
    }

    #[must_use]
    pub fn returning<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.returning.extend(columns.into_iter().map(Into::into));
        self
    }

    #[must_use]
    pub fn for_update(mut self) -> Self {
        self.lock = Some(LockMode::ForUpdate);
        self
    }

    #[must_use]
    pub fn for_share(mut self) -> Self {
        self.lock = Some(LockMode::ForShare);
        self
    }

    #[must_use]
    pub fn with_context(mut self, context: QueryContext) -> Self {
        self.context = Some(context);
        self
    }
}
