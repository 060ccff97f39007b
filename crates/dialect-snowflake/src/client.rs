use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sqlfrost_core::{Client, Dialect, DriverError, QueryRequest, Result};
use tracing::debug;

use crate::{
    ConnectionSettings, SnowflakeConfig, SnowflakeDialect, Transaction,
    driver::{Driver, ExecuteRequest, RawConnection},
};

/// A live driver connection plus the disposal flag its error listener sets.
pub struct SnowflakeConnection {
    raw: Box<dyn RawConnection>,
    disposed: Arc<Mutex<Option<String>>>,
}

impl SnowflakeConnection {
    /// True once the driver reported an error or `end` failed.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposal_reason().is_some()
    }

    #[must_use]
    pub fn disposal_reason(&self) -> Option<String> {
        self.disposed.lock().ok().and_then(|reason| reason.clone())
    }

    fn mark_disposed(&self, reason: String) {
        mark_disposed(&self.disposed, reason);
    }
}

fn mark_disposed(flag: &Mutex<Option<String>>, reason: String) {
    if let Ok(mut slot) = flag.lock() {
        slot.get_or_insert(reason);
    }
}

/// Runs compiled statements through a [`Driver`] using Snowflake semantics.
pub struct SnowflakeClient {
    settings: ConnectionSettings,
    dialect: SnowflakeDialect,
    driver: Arc<dyn Driver>,
}

impl SnowflakeClient {
    #[must_use]
    pub fn new(config: SnowflakeConfig, driver: Arc<dyn Driver>) -> Self {
        let dialect = config.dialect();
        Self {
            settings: config.connection.normalize(),
            dialect,
            driver,
        }
    }

    /// The normalized settings every connection is created with.
    #[must_use]
    pub fn settings(&self) -> &ConnectionSettings {
        &self.settings
    }

    #[must_use]
    pub fn snowflake_dialect(&self) -> &SnowflakeDialect {
        &self.dialect
    }

    pub fn transaction<'a>(&'a self, connection: &'a mut SnowflakeConnection) -> Transaction<'a> {
        Transaction::new(self, connection)
    }
}

#[async_trait]
impl Client for SnowflakeClient {
    type Connection = SnowflakeConnection;

    fn dialect(&self) -> &dyn Dialect {
        &self.dialect
    }

    fn driver_name(&self) -> &'static str {
        self.driver.name()
    }

    async fn acquire_raw_connection(&self) -> Result<SnowflakeConnection> {
        let mut raw = self.driver.create_connection(&self.settings)?;
        let disposed = Arc::new(Mutex::new(None));

        let flag = Arc::clone(&disposed);
        raw.on_error(Box::new(move |error: &DriverError| {
            debug!(%error, "snowflake connection reported an error");
            mark_disposed(&flag, error.to_string());
        }));

        if let Err(error) = raw.connect().await {
            raw.remove_all_listeners();
            debug!(%error, "snowflake connection failed");
            return Err(error.into());
        }

        debug!(
            account = self.settings.account.as_deref().unwrap_or_default(),
            "snowflake connection established"
        );
        Ok(SnowflakeConnection { raw, disposed })
    }

    async fn destroy_raw_connection(&self, mut connection: SnowflakeConnection) {
        if let Err(error) = connection.raw.end().await {
            debug!(%error, "ignoring failure while closing snowflake connection");
            connection.mark_disposed(error.to_string());
        }

        // Listeners may still be running from within `end`.
        tokio::task::yield_now().await;
        connection.raw.remove_all_listeners();
    }

    fn validate_connection(&self, connection: Option<&SnowflakeConnection>) -> bool {
        connection.is_some()
    }

    async fn query(
        &self,
        connection: &mut SnowflakeConnection,
        mut request: QueryRequest,
    ) -> Result<QueryRequest> {
        if request.sql.trim().is_empty() {
            return Ok(request);
        }

        let execute = ExecuteRequest {
            sql_text: request.sql.clone(),
            binds: request.bindings.clone(),
            options: request.options.clone(),
        };

        debug!(sql = %request.sql, bindings = request.bindings.len(), "executing statement");
        let response = connection
            .raw
            .execute(execute)
            .await
            .map_err(|error| error.with_sql(request.sql.clone()))?;

        request.response = Some(response);
        Ok(request)
    }
}
