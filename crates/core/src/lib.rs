//! Query and schema description model, base SQL compilers and the client
//! contract that dialect crates build on.

pub mod base;
mod client;
mod dialect;
mod document;
mod error;
mod executor;
pub mod ident;
mod logger;
mod query;
mod renderer;
mod schema;
mod statement;
mod value;

pub use client::{Client, QueryRequest, QueryResponse, StatementInfo, process_response};
pub use dialect::Dialect;
pub use document::CompileDocument;
pub use error::{CompileError, ConfigError, DriverError, Error, ExecutionError, Result};
pub use executor::Executor;
pub use ident::{IdentifierCase, QueryContext, WrapIdentifierFn};
pub use logger::{Logger, NoopLogger, Notice, RecordingLogger, TracingLogger};
pub use query::{Direction, LockMode, OrderBy, Query, QueryMethod, RawSql, Where};
pub use renderer::Renderer;
pub use schema::{
    ColumnDef, ColumnType, DefaultValue, SchemaBuilder, SchemaCommand, TableBuilder, TableCommand,
    TableMode,
};
pub use statement::{
    ColumnInfo, ColumnLookup, CompiledQuery, Method, OutputProcessor, QueryOutput, catalog_field,
};
pub use value::{Row, Value, quote_string_literal, row};
