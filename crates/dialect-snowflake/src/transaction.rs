use sqlfrost_core::{Client, QueryRequest, Result};

use crate::{DIALECT_NAME, SnowflakeClient, SnowflakeConnection};

const BEGIN_SQL: &str = "begin";
const COMMIT_SQL: &str = "commit";
const ROLLBACK_SQL: &str = "rollback";

/// Transaction control on one checked-out connection.
///
/// Savepoints do not exist in Snowflake: the savepoint operations log a
/// warning and succeed without touching the connection, so nested
/// transactions lose partial rollback but keep working.
pub struct Transaction<'a> {
    client: &'a SnowflakeClient,
    connection: &'a mut SnowflakeConnection,
}

impl<'a> Transaction<'a> {
    pub(crate) fn new(client: &'a SnowflakeClient, connection: &'a mut SnowflakeConnection) -> Self {
        Self { client, connection }
    }

    pub async fn begin(&mut self) -> Result<()> {
        self.execute(BEGIN_SQL).await
    }

    pub async fn commit(&mut self) -> Result<()> {
        self.execute(COMMIT_SQL).await
    }

    pub async fn rollback(&mut self) -> Result<()> {
        self.execute(ROLLBACK_SQL).await
    }

    pub async fn savepoint(&mut self, name: &str) -> Result<()> {
        self.unsupported("savepoint", name);
        Ok(())
    }

    pub async fn release(&mut self, name: &str) -> Result<()> {
        self.unsupported("release", name);
        Ok(())
    }

    pub async fn rollback_to(&mut self, name: &str) -> Result<()> {
        self.unsupported("rollback_to", name);
        Ok(())
    }

    async fn execute(&mut self, sql: &str) -> Result<()> {
        self.client
            .query(&mut *self.connection, QueryRequest::from(sql))
            .await
            .map(|_| ())
    }

    fn unsupported(&self, operation: &'static str, name: &str) {
        self.client.snowflake_dialect().warn(
            operation,
            format!("{DIALECT_NAME} does not support savepoints; `{name}` was ignored"),
        );
    }
}
