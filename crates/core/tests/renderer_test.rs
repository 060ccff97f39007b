#[path = "support/fake_client.rs"]
mod fake_client;

use fake_client::PlainDialect;
use sqlfrost_core::{CompiledQuery, Method, Notice, Renderer, Value};

#[test]
fn renders_statements_with_bindings_and_notices() {
    let statements = vec![
        CompiledQuery::new(
            "select * from \"users\" where \"name\" = ? and \"active\" = ?",
            vec![Value::from("o'brien"), Value::from(true)],
            Method::Select,
        ),
        CompiledQuery::empty(Method::Insert),
        CompiledQuery::ddl("drop table \"users\";"),
    ];
    let notices = vec![Notice::new("plain", "index", "indexes are ignored")];

    let rendered = Renderer::new(&PlainDialect).render(&statements, &notices);

    assert_eq!(
        rendered,
        "-- dialect: plain\n\
         -- Notices:\n\
         -- plain index: indexes are ignored\n\
         \n\
         select * from \"users\" where \"name\" = ? and \"active\" = ?;\n\
         -- bindings: ['o''brien', true]\n\
         -- (no statement)\n\
         drop table \"users\";\n"
    );
}

#[test]
fn renders_header_only_for_no_statements() {
    let rendered = Renderer::new(&PlainDialect).render(&[], &[]);
    assert_eq!(rendered, "-- dialect: plain\n");
}
