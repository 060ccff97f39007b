use std::sync::Arc;

use sqlfrost_core::{Dialect, Logger, Notice};

/// Base behaviour plus one notice per `for update` clause.
pub struct PlainDialect {
    logger: Arc<dyn Logger>,
}

impl PlainDialect {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }
}

impl Dialect for PlainDialect {
    fn name(&self) -> &'static str {
        "plain"
    }

    fn for_update(&self) -> String {
        self.logger
            .warn(Notice::new("plain", "for_update", "lock clause kept"));
        "for update".to_string()
    }
}
