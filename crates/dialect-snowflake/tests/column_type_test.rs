use std::sync::Arc;

use sqlfrost_core::{
    ColumnDef, ColumnType, CompiledQuery, Dialect, Logger, RecordingLogger, SchemaBuilder,
};
use sqlfrost_dialect_snowflake::SnowflakeDialect;

fn recording_dialect() -> (SnowflakeDialect, Arc<RecordingLogger>) {
    let logger = Arc::new(RecordingLogger::new());
    let dialect = SnowflakeDialect::new().with_logger(Arc::clone(&logger) as Arc<dyn Logger>);
    (dialect, logger)
}

fn type_of(column_type: ColumnType) -> String {
    let (dialect, _) = recording_dialect();
    dialect.column_type(&ColumnDef::new("c", column_type))
}

fn sql_of(statements: &[CompiledQuery]) -> Vec<&str> {
    statements.iter().map(|statement| statement.sql.as_str()).collect()
}

#[test]
fn identity_columns() {
    assert_eq!(
        type_of(ColumnType::increments()),
        "integer identity(1,1) primary key not null"
    );
    assert_eq!(
        type_of(ColumnType::big_increments()),
        "bigint identity(1,1) primary key not null"
    );
    assert_eq!(
        type_of(ColumnType::Increments { primary_key: false }),
        "integer identity(1,1) not null"
    );
}

#[test]
fn numeric_columns() {
    assert_eq!(type_of(ColumnType::Integer), "int");
    assert_eq!(type_of(ColumnType::MediumInteger), "int");
    assert_eq!(type_of(ColumnType::BigInteger), "bigint");
    assert_eq!(type_of(ColumnType::SmallInteger), "smallint");
    assert_eq!(type_of(ColumnType::TinyInteger), "tinyint");
    assert_eq!(
        type_of(ColumnType::Float {
            precision: Some(8),
            scale: Some(2)
        }),
        "float"
    );
    assert_eq!(
        type_of(ColumnType::Double {
            precision: Some(10),
            scale: Some(4)
        }),
        "double(10, 4)"
    );
    assert_eq!(
        type_of(ColumnType::Double {
            precision: Some(10),
            scale: None
        }),
        "double precision"
    );
    assert_eq!(type_of(ColumnType::decimal(Some(8), Some(2))), "decimal(8, 2)");
    assert_eq!(type_of(ColumnType::decimal(None, None)), "decimal");
}

#[test]
fn character_and_binary_columns() {
    assert_eq!(type_of(ColumnType::string(None)), "varchar(255)");
    assert_eq!(type_of(ColumnType::string(Some(64))), "varchar(64)");
    assert_eq!(type_of(ColumnType::Text), "varchar(max)");
    assert_eq!(type_of(ColumnType::MediumText), "varchar(max)");
    assert_eq!(type_of(ColumnType::LongText), "varchar(max)");
    assert_eq!(type_of(ColumnType::Binary { length: Some(16) }), "varchar(max)");
    assert_eq!(type_of(ColumnType::Varbinary { length: None }), "varchar(max)");
    assert_eq!(type_of(ColumnType::LongBlob), "varchar(max)");
    assert_eq!(type_of(ColumnType::Uuid), "char(36)");
}

#[test]
fn temporal_and_semi_structured_columns() {
    assert_eq!(type_of(ColumnType::timestamp(true)), "timestamp_tz");
    assert_eq!(type_of(ColumnType::timestamp(false)), "timestamp");
    assert_eq!(
        type_of(ColumnType::Timestamp {
            use_tz: true,
            precision: Some(3)
        }),
        "timestamp_tz(3)"
    );
    assert_eq!(
        type_of(ColumnType::DateTime {
            use_tz: false,
            precision: Some(6)
        }),
        "timestamp(6)"
    );
    assert_eq!(type_of(ColumnType::Date), "date");
    assert_eq!(type_of(ColumnType::Time), "time");
    assert_eq!(type_of(ColumnType::Boolean), "boolean");
    assert_eq!(type_of(ColumnType::Json), "variant");
    assert_eq!(type_of(ColumnType::Jsonb), "variant");
    assert_eq!(type_of(ColumnType::Geography), "geography");
    assert_eq!(
        type_of(ColumnType::Specific {
            name: "number(38, 0)".to_string()
        }),
        "number(38, 0)"
    );
}

#[test]
fn enum_becomes_varchar_with_a_warning() {
    let (dialect, logger) = recording_dialect();
    let column = ColumnDef::new(
        "status",
        ColumnType::Enum {
            values: vec!["active".to_string(), "closed".to_string()],
        },
    );

    assert_eq!(dialect.column_type(&column), "varchar(255)");
    let notices = logger.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].operation, "enum");
    assert!(notices[0].message.contains("active, closed"));
}

#[test]
fn create_table_renders_folded_definitions() {
    let (dialect, logger) = recording_dialect();
    let mut schema = SchemaBuilder::new();
    schema.create_table("users", |table| {
        table.increments("id");
        table.string("email", None).not_nullable();
        table.timestamp("created_at").nullable();
        table.boolean("active").default_to(true);
    });

    let statements = dialect.compile_schema(&schema).expect("schema compiles");
    assert_eq!(
        sql_of(&statements),
        vec![
            "create table \"USERS\" (\"ID\" integer identity(1,1) primary key not null, \"EMAIL\" varchar(255) not null, \"CREATED_AT\" timestamp_tz null, \"ACTIVE\" boolean default true)"
        ]
    );
    assert_eq!(logger.count(), 0);
}

#[test]
fn unsigned_modifier_is_dropped_with_a_warning() {
    let (dialect, logger) = recording_dialect();
    let mut schema = SchemaBuilder::new();
    schema.create_table("counters", |table| {
        table.integer("hits").unsigned().not_nullable();
    });

    let statements = dialect.compile_schema(&schema).expect("schema compiles");
    assert_eq!(
        sql_of(&statements),
        vec!["create table \"COUNTERS\" (\"HITS\" int not null)"]
    );
    let notices = logger.notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].operation, "unsigned");
}

#[test]
fn comments_follow_the_create_statement() {
    let (dialect, _) = recording_dialect();
    let mut schema = SchemaBuilder::new();
    schema.create_table("users", |table| {
        table.comment("application users");
        table.json("profile").comment("it's free-form");
    });

    let statements = dialect.compile_schema(&schema).expect("schema compiles");
    assert_eq!(
        sql_of(&statements),
        vec![
            "create table \"USERS\" (\"PROFILE\" variant)",
            "comment on table \"USERS\" is 'application users'",
            "comment on column \"USERS\".\"PROFILE\" is 'it''s free-form'",
        ]
    );
}
