//! The boundary to a Snowflake driver. The wire protocol lives behind these
//! traits; this crate only drives the connection lifecycle.

use std::collections::BTreeMap;

use async_trait::async_trait;
use sqlfrost_core::{DriverError, QueryResponse, Value};

use crate::ConnectionSettings;

pub type DriverResult<T> = std::result::Result<T, DriverError>;

/// Invoked when the driver reports an asynchronous connection error.
pub type ErrorListener = Box<dyn Fn(&DriverError) + Send + Sync>;

/// One statement as handed to the driver.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ExecuteRequest {
    pub sql_text: String,
    pub binds: Vec<Value>,
    /// Caller-supplied driver options, passed through untouched.
    pub options: BTreeMap<String, Value>,
}

#[async_trait]
pub trait RawConnection: Send {
    async fn connect(&mut self) -> DriverResult<()>;

    async fn execute(&mut self, request: ExecuteRequest) -> DriverResult<QueryResponse>;

    async fn end(&mut self) -> DriverResult<()>;

    fn on_error(&mut self, listener: ErrorListener);

    fn remove_all_listeners(&mut self);
}

pub trait Driver: Send + Sync {
    fn name(&self) -> &'static str;

    fn create_connection(&self, settings: &ConnectionSettings)
    -> DriverResult<Box<dyn RawConnection>>;
}
