use std::{fmt, sync::Arc};

use sqlfrost_core::{ConfigError, IdentifierCase, Logger, TracingLogger, WrapIdentifierFn};

use crate::{ConnectionSettings, SnowflakeDialect};

/// Everything a [`crate::SnowflakeClient`] needs besides the driver.
#[derive(Clone)]
pub struct SnowflakeConfig {
    pub connection: ConnectionSettings,
    pub wrap_identifier: Option<WrapIdentifierFn>,
    pub identifier_case: IdentifierCase,
    /// Fail compilation instead of skipping a primary key over nullable columns.
    pub strict_primary_keys: bool,
    pub logger: Arc<dyn Logger>,
}

impl SnowflakeConfig {
    #[must_use]
    pub fn new(connection: ConnectionSettings) -> Self {
        Self {
            connection,
            ..Self::default()
        }
    }

    pub fn from_dsn(dsn: &str) -> Result<Self, ConfigError> {
        ConnectionSettings::from_dsn(dsn).map(Self::new)
    }

    #[must_use]
    pub fn with_wrap_identifier(mut self, wrap_identifier: WrapIdentifierFn) -> Self {
        self.wrap_identifier = Some(wrap_identifier);
        self
    }

    #[must_use]
    pub fn with_identifier_case(mut self, identifier_case: IdentifierCase) -> Self {
        self.identifier_case = identifier_case;
        self
    }

    #[must_use]
    pub fn with_strict_primary_keys(mut self, strict: bool) -> Self {
        self.strict_primary_keys = strict;
        self
    }

    #[must_use]
    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    #[must_use]
    pub fn dialect(&self) -> SnowflakeDialect {
        SnowflakeDialect {
            wrap_identifier: self.wrap_identifier.clone(),
            identifier_case: self.identifier_case,
            strict_primary_keys: self.strict_primary_keys,
            logger: Arc::clone(&self.logger),
        }
    }
}

impl Default for SnowflakeConfig {
    fn default() -> Self {
        Self {
            connection: ConnectionSettings::default(),
            wrap_identifier: None,
            identifier_case: IdentifierCase::default(),
            strict_primary_keys: false,
            logger: Arc::new(TracingLogger),
        }
    }
}

impl fmt::Debug for SnowflakeConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowflakeConfig")
            .field("connection", &self.connection.redacted())
            .field("wrap_identifier", &self.wrap_identifier.is_some())
            .field("identifier_case", &self.identifier_case)
            .field("strict_primary_keys", &self.strict_primary_keys)
            .finish_non_exhaustive()
    }
}
