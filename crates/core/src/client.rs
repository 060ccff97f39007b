use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::{
    CompiledQuery, Dialect, Method, OutputProcessor, QueryOutput, Result, Row, Value,
    statement::catalog_field,
};

/// Metadata the driver reports about an executed statement.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatementInfo {
    pub sql: String,
    pub query_id: Option<String>,
    pub updated_rows: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryResponse {
    pub rows: Vec<Row>,
    pub statement: StatementInfo,
}

/// A statement on its way to (and back from) the driver.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub sql: String,
    pub bindings: Vec<Value>,
    pub method: Method,
    pub output: Option<OutputProcessor>,
    pub options: BTreeMap<String, Value>,
    pub response: Option<QueryResponse>,
}

impl QueryRequest {
    #[must_use]
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }
}

impl From<CompiledQuery> for QueryRequest {
    fn from(compiled: CompiledQuery) -> Self {
        Self {
            sql: compiled.sql,
            bindings: compiled.bindings,
            method: compiled.method,
            output: compiled.output,
            options: BTreeMap::new(),
            response: None,
        }
    }
}

impl From<&str> for QueryRequest {
    fn from(sql: &str) -> Self {
        Self::from(sql.to_string())
    }
}

impl From<String> for QueryRequest {
    fn from(sql: String) -> Self {
        CompiledQuery::new(sql, Vec::new(), Method::Raw).into()
    }
}

/// The connection-level contract a dialect client fulfils for the runner.
#[async_trait]
pub trait Client: Send + Sync {
    type Connection: Send;

    fn dialect(&self) -> &dyn Dialect;

    fn driver_name(&self) -> &'static str;

    async fn acquire_raw_connection(&self) -> Result<Self::Connection>;

    /// Closes a connection. Never fails, so pool cleanup is not blocked.
    async fn destroy_raw_connection(&self, connection: Self::Connection);

    fn validate_connection(&self, connection: Option<&Self::Connection>) -> bool;

    async fn query(
        &self,
        connection: &mut Self::Connection,
        request: QueryRequest,
    ) -> Result<QueryRequest>;

    fn process_response(&self, request: &QueryRequest) -> QueryOutput {
        process_response(request)
    }

    /// Executes one request and shapes its response.
    async fn run(
        &self,
        connection: &mut Self::Connection,
        request: QueryRequest,
    ) -> Result<QueryOutput> {
        let request = self.query(connection, request).await?;
        Ok(self.process_response(&request))
    }
}

/// Shapes a completed request's response according to its output processor
/// or, failing that, the method that built it.
#[must_use]
pub fn process_response(request: &QueryRequest) -> QueryOutput {
    let Some(response) = &request.response else {
        return QueryOutput::Empty;
    };

    if let Some(output) = &request.output {
        return output.apply(response);
    }

    match &request.method {
        Method::Raw | Method::Schema => QueryOutput::Raw(response.clone()),
        Method::Select => QueryOutput::Rows(response.rows.clone()),
        Method::First => QueryOutput::Row(response.rows.first().cloned()),
        Method::Pluck(column) => QueryOutput::Values(
            response
                .rows
                .iter()
                .filter_map(|row| catalog_field(row, column).cloned())
                .collect(),
        ),
        Method::Insert | Method::Update | Method::Del | Method::Truncate => {
            QueryOutput::Affected(affected_rows(response))
        }
    }
}

fn affected_rows(response: &QueryResponse) -> u64 {
    response
        .statement
        .updated_rows
        .unwrap_or_else(|| u64::try_from(response.rows.len()).unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::{QueryRequest, QueryResponse, StatementInfo, process_response};
    use crate::{CompiledQuery, Method, QueryOutput, Value, row};

    fn completed(method: Method, response: QueryResponse) -> QueryRequest {
        let mut request = QueryRequest::from(CompiledQuery::new("select 1", Vec::new(), method));
        request.response = Some(response);
        request
    }

    fn rows_response() -> QueryResponse {
        QueryResponse {
            rows: vec![row([("ID", 1)]), row([("ID", 2)])],
            statement: StatementInfo::default(),
        }
    }

    #[test]
    fn missing_response_is_empty() {
        let request = QueryRequest::from("");
        assert_eq!(process_response(&request), QueryOutput::Empty);
    }

    #[test]
    fn select_first_and_pluck_shape_rows() {
        assert_eq!(
            process_response(&completed(Method::Select, rows_response())),
            QueryOutput::Rows(rows_response().rows)
        );
        assert_eq!(
            process_response(&completed(Method::First, rows_response())),
            QueryOutput::Row(Some(row([("ID", 1)])))
        );
        assert_eq!(
            process_response(&completed(Method::Pluck("id".to_string()), rows_response())),
            QueryOutput::Values(vec![Value::from(1), Value::from(2)])
        );
    }

    #[test]
    fn dml_reports_updated_rows() {
        let response = QueryResponse {
            rows: Vec::new(),
            statement: StatementInfo {
                updated_rows: Some(3),
                ..StatementInfo::default()
            },
        };
        assert_eq!(
            process_response(&completed(Method::Update, response)),
            QueryOutput::Affected(3)
        );
    }
}
