//! Snowflake dialect for sqlfrost: identifier folding, type names, DDL and
//! DML deviations, catalog queries, and a client over an abstract driver.

mod catalog;
mod client;
mod column;
mod config;
mod dialect;
pub mod driver;
mod identifier;
mod query;
mod settings;
mod table;
mod transaction;

pub use client::{SnowflakeClient, SnowflakeConnection};
pub use config::SnowflakeConfig;
pub use dialect::SnowflakeDialect;
pub use driver::{Driver, DriverResult, ErrorListener, ExecuteRequest, RawConnection};
pub use settings::{ConnectionSettings, DSN_SCHEME};
pub use transaction::Transaction;

pub const DIALECT_NAME: &str = "snowflake";
