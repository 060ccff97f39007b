#[path = "support/plain_dialect.rs"]
mod plain_dialect;

use std::{fs, sync::Arc};

use plain_dialect::PlainDialect;
use sqlfrost_core::{Dialect, Logger};
use sqlfrost_testkit::{
    CaseOptions, LoadError, TestResult, load_test_cases_from_path, load_test_cases_from_str,
    run_compile_test,
};

fn build(_options: &CaseOptions, logger: Arc<dyn Logger>) -> Box<dyn Dialect> {
    Box::new(PlainDialect::new(logger))
}

const CASES: &str = r#"
select_with_lock:
  query:
    table: users
    wheres:
      - kind: compare
        column: id
        value: 7
    lock: for_update
  sql:
    - 'select * from "users" where "id" = ? for update'
  bindings:
    - [7]
  warnings: 1

wrong_sql:
  query:
    table: users
  sql:
    - 'select id from users'

empty_update:
  query:
    table: users
    method: update
  error: has no values to set

drop_table:
  schema:
    commands:
      - kind: drop_table
        name: users
        if_exists: true
  sql:
    - 'drop table if exists "users"'
"#;

#[test]
fn runner_reports_pass_and_failure_per_case() {
    let cases = load_test_cases_from_str(CASES)
        .unwrap_or_else(|error| panic!("failed to parse cases: {error}"));
    assert_eq!(cases.len(), 4);

    assert_eq!(run_compile_test(&cases["select_with_lock"], build), TestResult::Passed);
    assert_eq!(run_compile_test(&cases["empty_update"], build), TestResult::Passed);
    assert_eq!(run_compile_test(&cases["drop_table"], build), TestResult::Passed);
    assert!(
        matches!(
            run_compile_test(&cases["wrong_sql"], build),
            TestResult::Failed(message) if message.contains("sql mismatch")
        ),
        "sql mismatch must be reported"
    );
}

#[test]
fn runner_fails_when_warning_count_differs() {
    let mut cases = load_test_cases_from_str(CASES)
        .unwrap_or_else(|error| panic!("failed to parse cases: {error}"));
    let mut case = cases
        .remove("select_with_lock")
        .unwrap_or_else(|| panic!("select_with_lock case missing"));
    case.warnings = Some(0);

    assert!(matches!(
        run_compile_test(&case, build),
        TestResult::Failed(message) if message.contains("warning")
    ));
}

#[test]
fn unknown_case_fields_are_rejected() {
    let error = load_test_cases_from_str("broken:\n  querry: {}\n")
        .expect_err("unknown fields must fail to parse");
    assert!(matches!(error, LoadError::Yaml(_)));
}

#[test]
fn cases_load_from_a_file() {
    let dir = std::env::temp_dir().join(format!("sqlfrost-testkit-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap_or_else(|error| panic!("failed to create dir: {error}"));
    let path = dir.join("cases.yml");
    fs::write(&path, CASES).unwrap_or_else(|error| panic!("failed to write cases: {error}"));

    let cases = load_test_cases_from_path(&path)
        .unwrap_or_else(|error| panic!("failed to load cases: {error}"));
    assert!(cases.contains_key("drop_table"));

    let missing = load_test_cases_from_path(&dir.join("missing.yml"))
        .expect_err("missing file must fail");
    assert!(matches!(missing, LoadError::Io { .. }));

    let _ = fs::remove_dir_all(&dir);
}
