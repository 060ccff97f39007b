use sqlfrost_core::{Dialect, Direction, Query, SchemaBuilder, row};
use sqlfrost_dialect_snowflake::SnowflakeDialect;
use sqlparser::{dialect::SnowflakeDialect as SnowflakeParserDialect, parser::Parser};

fn assert_parses(sql: &str) {
    let statements = Parser::parse_sql(&SnowflakeParserDialect {}, sql)
        .unwrap_or_else(|error| panic!("`{sql}` does not parse as snowflake sql: {error}"));
    assert_eq!(statements.len(), 1, "`{sql}` should be one statement");
}

#[test]
fn compiled_dml_is_valid_snowflake_sql() {
    let dialect = SnowflakeDialect::new();
    let queries = [
        Query::table("analytics.events")
            .select(["id", "kind as event_kind"])
            .where_eq("kind", "click")
            .where_in("user_id", vec![1.into(), 2.into()])
            .order_by("id", Direction::Desc)
            .limit(10)
            .offset(20),
        Query::table("accounts").where_eq("id", 1).for_update(),
        Query::table("users").insert(vec![row([("email", "a@example.com")])]),
        Query::table("users")
            .where_eq("id", 3)
            .update(row([("active", false)])),
        Query::table("users").where_null("deleted_at").del(),
        Query::table("users").truncate(),
    ];

    for query in &queries {
        let compiled = dialect.compile(query).expect("query compiles");
        assert_parses(&compiled.sql);
    }
}

#[test]
fn catalog_queries_are_valid_snowflake_sql() {
    let dialect = SnowflakeDialect::new();
    assert_parses(&dialect.has_table("events").sql);
    assert_parses(&dialect.has_column("analytics.events", "kind").sql);
    assert_parses(&dialect.column_info("events", None).sql);
}

#[test]
fn simple_ddl_is_valid_snowflake_sql() {
    let dialect = SnowflakeDialect::new();
    let mut schema = SchemaBuilder::new();
    schema
        .create_table("users", |table| {
            table.string("email", None).not_nullable();
            table.boolean("active");
        })
        .drop_table_if_exists("sessions")
        .create_schema("staging");

    for statement in dialect.compile_schema(&schema).expect("schema compiles") {
        assert_parses(&statement.sql);
    }
}
