#[path = "support/fake_client.rs"]
mod fake_client;

use fake_client::FakeClient;
use sqlfrost_core::{
    CompiledQuery, Error, ExecutionError, Executor, Method, QueryOutput, Value,
};

fn statements() -> Vec<CompiledQuery> {
    vec![
        CompiledQuery::ddl("create table \"t\" (\"id\" integer)"),
        CompiledQuery::empty(Method::Insert),
        CompiledQuery::new("insert into \"t\" (\"id\") values (?)", vec![Value::from(1)], Method::Insert),
    ]
}

#[tokio::test]
async fn executes_statements_in_order_and_skips_empty_ones() {
    let client = FakeClient::default();
    let mut connection = ();

    let outputs = Executor::new(&client, &mut connection)
        .execute_all(&statements())
        .await
        .expect("batch succeeds");

    assert_eq!(
        client.executed_sql(),
        vec![
            "create table \"t\" (\"id\" integer)".to_string(),
            "insert into \"t\" (\"id\") values (?)".to_string(),
        ]
    );
    assert_eq!(outputs.len(), 3);
    assert!(matches!(outputs[0], QueryOutput::Raw(_)));
    assert_eq!(outputs[1], QueryOutput::Empty);
    assert_eq!(outputs[2], QueryOutput::Affected(1));
}

#[tokio::test]
async fn driver_failure_reports_statement_position() {
    let client = FakeClient::failing_on("insert into \"t\" (\"id\") values (?)");
    let mut connection = ();

    let error = Executor::new(&client, &mut connection)
        .execute_all(&statements())
        .await
        .expect_err("third statement fails");

    let Error::Execute(ExecutionError::StatementFailed {
        statement_index,
        executed_statements,
        source,
        ..
    }) = error
    else {
        panic!("expected statement failure, got {error:?}");
    };
    assert_eq!(statement_index, 2);
    assert_eq!(executed_statements, 1);
    assert_eq!(source.message, "injected failure");
}
