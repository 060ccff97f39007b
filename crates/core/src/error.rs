use thiserror::Error as ThisError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Driver(#[from] DriverError),
    #[error(transparent)]
    Execute(#[from] ExecutionError),
}

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ConfigError {
    #[error("invalid connection string `{dsn}`: {reason}")]
    InvalidDsn { dsn: String, reason: String },
    #[error("unsupported connection scheme `{scheme}`; expected `{expected}`")]
    UnsupportedScheme {
        scheme: String,
        expected: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum CompileError {
    #[error("{dialect} cannot compile `{method}` without a table")]
    MissingTable {
        dialect: &'static str,
        method: &'static str,
    },
    #[error("{dialect} update of `{table}` has no values to set")]
    EmptyUpdate {
        dialect: &'static str,
        table: String,
    },
    #[error(
        "{dialect} insert into `{table}` has {rows} rows without columns; only one `default values` row can be inserted"
    )]
    EmptyRows {
        dialect: &'static str,
        table: String,
        rows: usize,
    },
    #[error(
        "{dialect} primary key on `{table}` references nullable columns [{}]",
        .columns.join(", ")
    )]
    NullablePrimaryKey {
        dialect: &'static str,
        table: String,
        columns: Vec<String>,
    },
    #[error("compile document must contain exactly one of `query` or `schema`")]
    InvalidDocument,
}

/// Failure reported by a warehouse driver while connecting, executing or
/// closing a connection.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("{message}{}", .code.as_deref().map(|code| format!(" (code {code})")).unwrap_or_default())]
pub struct DriverError {
    pub message: String,
    pub code: Option<String>,
    pub sql_state: Option<String>,
    /// The statement being executed when the failure was reported, if any.
    pub sql: Option<String>,
}

impl DriverError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            sql_state: None,
            sql: None,
        }
    }

    #[must_use]
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    #[must_use]
    pub fn with_sql_state(mut self, sql_state: impl Into<String>) -> Self {
        self.sql_state = Some(sql_state.into());
        self
    }

    #[must_use]
    pub fn with_sql(mut self, sql: impl Into<String>) -> Self {
        self.sql = Some(sql.into());
        self
    }
}

#[derive(Debug, ThisError)]
pub enum ExecutionError {
    #[error(
        "statement[{statement_index}] failed after {executed_statements} executed statements: {source} (sql: {sql})"
    )]
    StatementFailed {
        statement_index: usize,
        sql: String,
        executed_statements: usize,
        #[source]
        source: DriverError,
    },
}
