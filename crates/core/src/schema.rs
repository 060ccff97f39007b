use serde::Deserialize;

use crate::{RawSql, Value};

const fn default_true() -> bool {
    true
}

/// Abstract column type requested by a table builder.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ColumnType {
    Increments {
        #[serde(default = "default_true")]
        primary_key: bool,
    },
    BigIncrements {
        #[serde(default = "default_true")]
        primary_key: bool,
    },
    Integer,
    BigInteger,
    SmallInteger,
    TinyInteger,
    MediumInteger,
    Float {
        #[serde(default)]
        precision: Option<u32>,
        #[serde(default)]
        scale: Option<u32>,
    },
    Double {
        #[serde(default)]
        precision: Option<u32>,
        #[serde(default)]
        scale: Option<u32>,
    },
    Decimal {
        #[serde(default)]
        precision: Option<u32>,
        #[serde(default)]
        scale: Option<u32>,
    },
    String {
        #[serde(default)]
        length: Option<u32>,
    },
    Text,
    MediumText,
    LongText,
    Binary {
        #[serde(default)]
        length: Option<u32>,
    },
    Varbinary {
        #[serde(default)]
        length: Option<u32>,
    },
    LongBlob,
    Boolean,
    Date,
    Time,
    DateTime {
        #[serde(default = "default_true")]
        use_tz: bool,
        #[serde(default)]
        precision: Option<u32>,
    },
    Timestamp {
        #[serde(default = "default_true")]
        use_tz: bool,
        #[serde(default)]
        precision: Option<u32>,
    },
    Json,
    Jsonb,
    Uuid,
    Enum {
        #[serde(default)]
        values: Vec<String>,
    },
    Set {
        #[serde(default)]
        values: Vec<String>,
    },
    Geography,
    Specific {
        name: String,
    },
}

impl ColumnType {
    pub const fn increments() -> Self {
        Self::Increments { primary_key: true }
    }

    pub const fn big_increments() -> Self {
        Self::BigIncrements { primary_key: true }
    }

    pub const fn string(length: Option<u32>) -> Self {
        Self::String { length }
    }

    pub const fn decimal(precision: Option<u32>, scale: Option<u32>) -> Self {
        Self::Decimal { precision, scale }
    }

    pub const fn timestamp(use_tz: bool) -> Self {
        Self::Timestamp {
            use_tz,
            precision: None,
        }
    }

    #[must_use]
    pub const fn is_increments(&self) -> bool {
        matches!(self, Self::Increments { .. } | Self::BigIncrements { .. })
    }

    /// Identity columns that already declare `primary key` in their type.
    #[must_use]
    pub const fn has_inline_primary_key(&self) -> bool {
        matches!(
            self,
            Self::Increments { primary_key: true } | Self::BigIncrements { primary_key: true }
        )
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Raw { raw: String },
    Value(Value),
}

impl DefaultValue {
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Raw { raw } => raw.clone(),
            Self::Value(value) => value.to_sql_literal(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    #[serde(flatten)]
    pub column_type: ColumnType,
    #[serde(default)]
    pub nullable: Option<bool>,
    #[serde(default)]
    pub default: Option<DefaultValue>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub unsigned: bool,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub unique: bool,
    #[serde(default)]
    pub index: bool,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_type,
            nullable: None,
            default: None,
            comment: None,
            unsigned: false,
            primary: false,
            unique: false,
            index: false,
        }
    }

    pub fn not_nullable(&mut self) -> &mut Self {
        self.nullable = Some(false);
        self
    }

    pub fn nullable(&mut self) -> &mut Self {
        self.nullable = Some(true);
        self
    }

    pub fn default_to(&mut self, value: impl Into<Value>) -> &mut Self {
        self.default = Some(DefaultValue::Value(value.into()));
        self
    }

    pub fn default_raw(&mut self, sql: impl Into<String>) -> &mut Self {
        self.default = Some(DefaultValue::Raw { raw: sql.into() });
        self
    }

    pub fn comment(&mut self, comment: impl Into<String>) -> &mut Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn unsigned(&mut self) -> &mut Self {
        self.unsigned = true;
        self
    }

    pub fn primary(&mut self) -> &mut Self {
        self.primary = true;
        self
    }

    pub fn unique(&mut self) -> &mut Self {
        self.unique = true;
        self
    }

    pub fn index(&mut self) -> &mut Self {
        self.index = true;
        self
    }

    /// True when the column is declared non-nullable in its own definition.
    #[must_use]
    pub fn is_not_null(&self) -> bool {
        self.nullable == Some(false) || self.column_type.is_increments()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TableCommand {
    Primary {
        columns: Vec<String>,
        #[serde(default)]
        name: Option<String>,
    },
    DropPrimary {
        #[serde(default)]
        name: Option<String>,
    },
    Unique {
        columns: Vec<String>,
        #[serde(default)]
        name: Option<String>,
    },
    DropUnique {
        columns: Vec<String>,
        #[serde(default)]
        name: Option<String>,
    },
    Index {
        columns: Vec<String>,
        #[serde(default)]
        name: Option<String>,
    },
    DropIndex {
        columns: Vec<String>,
        #[serde(default)]
        name: Option<String>,
    },
    Foreign {
        columns: Vec<String>,
        references_table: String,
        references_columns: Vec<String>,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        on_delete: Option<String>,
        #[serde(default)]
        on_update: Option<String>,
    },
    DropForeign {
        columns: Vec<String>,
        #[serde(default)]
        name: Option<String>,
    },
    DropColumns {
        columns: Vec<String>,
    },
    RenameColumn {
        from: String,
        to: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableMode {
    #[default]
    Create,
    CreateIfNotExists,
    Alter,
}

/// Column definitions and table-level commands for one create/alter batch.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct TableBuilder {
    pub name: String,
    pub schema: Option<String>,
    pub mode: TableMode,
    pub inherits: Option<String>,
    pub comment: Option<String>,
    pub columns: Vec<ColumnDef>,
    pub commands: Vec<TableCommand>,
}

impl TableBuilder {
    pub fn new(name: impl Into<String>, mode: TableMode) -> Self {
        Self {
            name: name.into(),
            mode,
            ..Self::default()
        }
    }

    /// The table name, prefixed with the schema when one is set.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{schema}.{}", self.name),
            None => self.name.clone(),
        }
    }

    /// The column this batch defines under `name`, matched case-insensitively.
    #[must_use]
    pub fn column_def(&self, name: &str) -> Option<&ColumnDef> {
        self.columns
            .iter()
            .find(|column| column.name.eq_ignore_ascii_case(name))
    }

    pub fn column(&mut self, name: impl Into<String>, column_type: ColumnType) -> &mut ColumnDef {
        self.columns.push(ColumnDef::new(name, column_type));
        let index = self.columns.len() - 1;
        &mut self.columns[index]
    }

    pub fn increments(&mut self, name: impl Into<String>) -> &mut ColumnDef {
        self.column(name, ColumnType::increments())
    }

    pub fn big_increments(&mut self, name: impl Into<String>) -> &mut ColumnDef {
        self.column(name, ColumnType::big_increments())
    }

    pub fn integer(&mut self, name: impl Into<String>) -> &mut ColumnDef {
        self.column(name, ColumnType::Integer)
    }

    pub fn string(&mut self, name: impl Into<String>, length: Option<u32>) -> &mut ColumnDef {
        self.column(name, ColumnType::string(length))
    }

    pub fn text(&mut self, name: impl Into<String>) -> &mut ColumnDef {
        self.column(name, ColumnType::Text)
    }

    pub fn boolean(&mut self, name: impl Into<String>) -> &mut ColumnDef {
        self.column(name, ColumnType::Boolean)
    }

    pub fn timestamp(&mut self, name: impl Into<String>) -> &mut ColumnDef {
        self.column(name, ColumnType::timestamp(true))
    }

    pub fn json(&mut self, name: impl Into<String>) -> &mut ColumnDef {
        self.column(name, ColumnType::Json)
    }

    pub fn comment(&mut self, comment: impl Into<String>) -> &mut Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn inherits(&mut self, parent: impl Into<String>) -> &mut Self {
        self.inherits = Some(parent.into());
        self
    }

    pub fn primary<I, S>(&mut self, columns: I, name: Option<&str>) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.commands.push(TableCommand::Primary {
            columns: columns.into_iter().map(Into::into).collect(),
            name: name.map(ToString::to_string),
        });
        self
    }

    pub fn drop_primary(&mut self, name: Option<&str>) -> &mut Self {
        self.commands.push(TableCommand::DropPrimary {
            name: name.map(ToString::to_string),
        });
        self
    }

    pub fn unique<I, S>(&mut self, columns: I, name: Option<&str>) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.commands.push(TableCommand::Unique {
            columns: columns.into_iter().map(Into::into).collect(),
            name: name.map(ToString::to_string),
        });
        self
    }

    pub fn drop_unique<I, S>(&mut self, columns: I, name: Option<&str>) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.commands.push(TableCommand::DropUnique {
            columns: columns.into_iter().map(Into::into).collect(),
            name: name.map(ToString::to_string),
        });
        self
    }

    pub fn index<I, S>(&mut self, columns: I, name: Option<&str>) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.commands.push(TableCommand::Index {
            columns: columns.into_iter().map(Into::into).collect(),
            name: name.map(ToString::to_string),
        });
        self
    }

    pub fn drop_index<I, S>(&mut self, columns: I, name: Option<&str>) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.commands.push(TableCommand::DropIndex {
            columns: columns.into_iter().map(Into::into).collect(),
            name: name.map(ToString::to_string),
        });
        self
    }

    pub fn foreign<I, S>(
        &mut self,
        columns: I,
        references_table: impl Into<String>,
        references_columns: Vec<String>,
    ) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.commands.push(TableCommand::Foreign {
            columns: columns.into_iter().map(Into::into).collect(),
            references_table: references_table.into(),
            references_columns,
            name: None,
            on_delete: None,
            on_update: None,
        });
        self
    }

    pub fn drop_foreign<I, S>(&mut self, columns: I, name: Option<&str>) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.commands.push(TableCommand::DropForeign {
            columns: columns.into_iter().map(Into::into).collect(),
            name: name.map(ToString::to_string),
        });
        self
    }

    pub fn drop_columns<I, S>(&mut self, columns: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.commands.push(TableCommand::DropColumns {
            columns: columns.into_iter().map(Into::into).collect(),
        });
        self
    }

    pub fn rename_column(&mut self, from: impl Into<String>, to: impl Into<String>) -> &mut Self {
        self.commands.push(TableCommand::RenameColumn {
            from: from.into(),
            to: to.into(),
        });
        self
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaCommand {
    Table(TableBuilder),
    DropTable {
        name: String,
        #[serde(default)]
        if_exists: bool,
    },
    RenameTable {
        from: String,
        to: String,
    },
    HasTable {
        name: String,
    },
    HasColumn {
        table: String,
        column: String,
    },
    ColumnInfo {
        table: String,
        #[serde(default)]
        column: Option<String>,
    },
    CreateSchema {
        name: String,
        #[serde(default)]
        if_not_exists: bool,
    },
    DropSchema {
        name: String,
        #[serde(default)]
        if_exists: bool,
    },
    Raw(RawSql),
}

/// An ordered batch of schema commands, optionally scoped to one schema.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchemaBuilder {
    pub schema: Option<String>,
    pub commands: Vec<SchemaCommand>,
}

impl SchemaBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Prefixes an unqualified table name with the builder's schema.
    #[must_use]
    pub fn qualify(&self, name: &str) -> String {
        match &self.schema {
            Some(schema) if crate::ident::split_qualified(name).0.is_none() => {
                format!("{schema}.{name}")
            }
            _ => name.to_string(),
        }
    }

    pub fn create_table(&mut self, name: &str, build: impl FnOnce(&mut TableBuilder)) -> &mut Self {
        self.push_table(name, TableMode::Create, build)
    }

    pub fn create_table_if_not_exists(
        &mut self,
        name: &str,
        build: impl FnOnce(&mut TableBuilder),
    ) -> &mut Self {
        self.push_table(name, TableMode::CreateIfNotExists, build)
    }

    pub fn alter_table(&mut self, name: &str, build: impl FnOnce(&mut TableBuilder)) -> &mut Self {
        self.push_table(name, TableMode::Alter, build)
    }

    pub fn drop_table(&mut self, name: &str) -> &mut Self {
        self.commands.push(SchemaCommand::DropTable {
            name: name.to_string(),
            if_exists: false,
        });
        self
    }

    pub fn drop_table_if_exists(&mut self, name: &str) -> &mut Self {
        self.commands.push(SchemaCommand::DropTable {
            name: name.to_string(),
            if_exists: true,
        });
        self
    }

    pub fn rename_table(&mut self, from: &str, to: &str) -> &mut Self {
        self.commands.push(SchemaCommand::RenameTable {
            from: from.to_string(),
            to: to.to_string(),
        });
        self
    }

    pub fn has_table(&mut self, name: &str) -> &mut Self {
        self.commands.push(SchemaCommand::HasTable {
            name: name.to_string(),
        });
        self
    }

    pub fn has_column(&mut self, table: &str, column: &str) -> &mut Self {
        self.commands.push(SchemaCommand::HasColumn {
            table: table.to_string(),
            column: column.to_string(),
        });
        self
    }

    pub fn column_info(&mut self, table: &str, column: Option<&str>) -> &mut Self {
        self.commands.push(SchemaCommand::ColumnInfo {
            table: table.to_string(),
            column: column.map(ToString::to_string),
        });
        self
    }

    pub fn create_schema(&mut self, name: &str) -> &mut Self {
        self.commands.push(SchemaCommand::CreateSchema {
            name: name.to_string(),
            if_not_exists: false,
        });
        self
    }

    pub fn create_schema_if_not_exists(&mut self, name: &str) -> &mut Self {
        self.commands.push(SchemaCommand::CreateSchema {
            name: name.to_string(),
            if_not_exists: true,
        });
        self
    }

    pub fn drop_schema(&mut self, name: &str) -> &mut Self {
        self.commands.push(SchemaCommand::DropSchema {
            name: name.to_string(),
            if_exists: false,
        });
        self
    }

    pub fn drop_schema_if_exists(&mut self, name: &str) -> &mut Self {
        self.commands.push(SchemaCommand::DropSchema {
            name: name.to_string(),
            if_exists: true,
        });
        self
    }

    pub fn raw(&mut self, sql: &str, bindings: Vec<Value>) -> &mut Self {
        self.commands.push(SchemaCommand::Raw(RawSql::new(sql, bindings)));
        self
    }

    fn push_table(
        &mut self,
        name: &str,
        mode: TableMode,
        build: impl FnOnce(&mut TableBuilder),
    ) -> &mut Self {
        let mut table = TableBuilder::new(name, mode);
        table.schema.clone_from(&self.schema);
        build(&mut table);
        self.commands.push(SchemaCommand::Table(table));
        self
    }
}
