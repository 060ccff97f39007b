use crate::{Client, CompiledQuery, Error, ExecutionError, QueryOutput, QueryRequest, Result};

/// Runs a compiled statement sequence, in order, on one connection.
pub struct Executor<'a, C: Client> {
    client: &'a C,
    connection: &'a mut C::Connection,
}

impl<'a, C: Client> Executor<'a, C> {
    #[must_use]
    pub fn new(client: &'a C, connection: &'a mut C::Connection) -> Self {
        Self { client, connection }
    }

    /// Executes every non-empty statement and returns one output per input.
    /// Stops at the first driver failure.
    pub async fn execute_all(&mut self, statements: &[CompiledQuery]) -> Result<Vec<QueryOutput>> {
        let mut outputs = Vec::with_capacity(statements.len());
        let mut executed = 0;

        for (index, statement) in statements.iter().enumerate() {
            if statement.is_empty() {
                outputs.push(QueryOutput::Empty);
                continue;
            }

            let request = QueryRequest::from(statement.clone());
            let output = self
                .client
                .run(&mut *self.connection, request)
                .await
                .map_err(|error| statement_failed(error, index, &statement.sql, executed))?;
            executed += 1;
            outputs.push(output);
        }

        Ok(outputs)
    }
}

fn statement_failed(error: Error, statement_index: usize, sql: &str, executed: usize) -> Error {
    match error {
        Error::Driver(source) => ExecutionError::StatementFailed {
            statement_index,
            sql: sql.to_string(),
            executed_statements: executed,
            source,
        }
        .into(),
        other => other,
    }
}
