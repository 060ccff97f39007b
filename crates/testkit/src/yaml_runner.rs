use std::{
    collections::BTreeMap,
    fs, io,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::Deserialize;
use sqlfrost_core::{
    CompileDocument, CompiledQuery, Dialect, IdentifierCase, Logger, Query, RecordingLogger,
    SchemaBuilder, Value,
};
use thiserror::Error;

/// One named compile expectation.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TestCase {
    pub query: Option<Query>,
    pub schema: Option<SchemaBuilder>,
    pub options: CaseOptions,
    /// Expected SQL, one entry per compiled statement.
    pub sql: Option<Vec<String>>,
    /// Expected bindings, one list per compiled statement.
    pub bindings: Option<Vec<Vec<Value>>>,
    /// Expected number of logger notices.
    pub warnings: Option<usize>,
    /// Expected substring of the compile error.
    pub error: Option<String>,
}

/// Dialect options a case runs under.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CaseOptions {
    pub identifier_case: IdentifierCase,
    pub strict_primary_keys: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestResult {
    Passed,
    Failed(String),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read test cases from `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse yaml test cases: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub fn load_test_cases_from_str(yaml: &str) -> Result<BTreeMap<String, TestCase>, LoadError> {
    Ok(serde_yaml::from_str(yaml)?)
}

pub fn load_test_cases_from_path(path: &Path) -> Result<BTreeMap<String, TestCase>, LoadError> {
    let yaml = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_test_cases_from_str(&yaml)
}

/// Compiles `test` with a dialect built for its options and checks every
/// expectation the case declares.
pub fn run_compile_test<F>(test: &TestCase, build_dialect: F) -> TestResult
where
    F: FnOnce(&CaseOptions, Arc<dyn Logger>) -> Box<dyn Dialect>,
{
    let logger = Arc::new(RecordingLogger::new());
    let dialect = build_dialect(&test.options, Arc::clone(&logger) as Arc<dyn Logger>);

    let document = CompileDocument {
        query: test.query.clone(),
        schema: test.schema.clone(),
    };

    match (document.compile(dialect.as_ref()), test.error.as_deref()) {
        (Ok(statements), None) => {
            check_statements(test, &statements).and_then(|| check_warnings(test, &logger))
        }
        (Ok(statements), Some(expected)) => TestResult::Failed(format!(
            "expected error containing `{expected}`, but compiled {} statement(s)",
            statements.len()
        )),
        (Err(error), Some(expected)) if error.to_string().contains(expected) => {
            check_warnings(test, &logger)
        }
        (Err(error), Some(expected)) => TestResult::Failed(format!(
            "expected error containing `{expected}`, got `{error}`"
        )),
        (Err(error), None) => TestResult::Failed(format!("unexpected compile error: {error}")),
    }
}

impl TestResult {
    fn and_then(self, next: impl FnOnce() -> Self) -> Self {
        match self {
            Self::Passed => next(),
            failed @ Self::Failed(_) => failed,
        }
    }
}

fn check_statements(test: &TestCase, statements: &[CompiledQuery]) -> TestResult {
    if let Some(expected) = &test.sql {
        let actual = statements
            .iter()
            .map(|statement| statement.sql.clone())
            .collect::<Vec<_>>();
        if &actual != expected {
            return TestResult::Failed(format!(
                "sql mismatch\nexpected: {expected:#?}\nactual:   {actual:#?}"
            ));
        }
    }

    if let Some(expected) = &test.bindings {
        let actual = statements
            .iter()
            .map(|statement| statement.bindings.clone())
            .collect::<Vec<_>>();
        if &actual != expected {
            return TestResult::Failed(format!(
                "bindings mismatch\nexpected: {expected:?}\nactual:   {actual:?}"
            ));
        }
    }

    TestResult::Passed
}

fn check_warnings(test: &TestCase, logger: &RecordingLogger) -> TestResult {
    match test.warnings {
        Some(expected) if logger.count() != expected => TestResult::Failed(format!(
            "expected {expected} warning(s), got {}: {:?}",
            logger.count(),
            logger
                .notices()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
        )),
        _ => TestResult::Passed,
    }
}
