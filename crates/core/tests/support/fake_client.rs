#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use sqlfrost_core::{
    Client, Dialect, DriverError, QueryRequest, QueryResponse, Result, StatementInfo,
};

pub struct PlainDialect;

impl Dialect for PlainDialect {
    fn name(&self) -> &'static str {
        "plain"
    }
}

/// Records executed SQL and fails on one configured statement.
#[derive(Default)]
pub struct FakeClient {
    executed: Mutex<Vec<String>>,
    fail_on_sql: Option<String>,
}

impl FakeClient {
    pub fn failing_on(sql: &str) -> Self {
        Self {
            fail_on_sql: Some(sql.to_string()),
            ..Self::default()
        }
    }

    pub fn executed_sql(&self) -> Vec<String> {
        self.executed
            .lock()
            .unwrap_or_else(|error| panic!("fake client poisoned: {error}"))
            .clone()
    }
}

#[async_trait]
impl Client for FakeClient {
    type Connection = ();

    fn dialect(&self) -> &dyn Dialect {
        &PlainDialect
    }

    fn driver_name(&self) -> &'static str {
        "fake"
    }

    async fn acquire_raw_connection(&self) -> Result<()> {
        Ok(())
    }

    async fn destroy_raw_connection(&self, _connection: ()) {}

    fn validate_connection(&self, connection: Option<&()>) -> bool {
        connection.is_some()
    }

    async fn query(&self, _connection: &mut (), mut request: QueryRequest) -> Result<QueryRequest> {
        if self.fail_on_sql.as_deref() == Some(request.sql.as_str()) {
            return Err(DriverError::new("injected failure").into());
        }
        self.executed
            .lock()
            .unwrap_or_else(|error| panic!("fake client poisoned: {error}"))
            .push(request.sql.clone());
        request.response = Some(QueryResponse {
            rows: Vec::new(),
            statement: StatementInfo {
                sql: request.sql.clone(),
                query_id: None,
                updated_rows: Some(1),
            },
        });
        Ok(request)
    }
}
