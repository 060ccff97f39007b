use crate::{CompiledQuery, Dialect, Notice, Value};

const NOTICES_HEADER: &str = "-- Notices:";
const EMPTY_STATEMENT: &str = "-- (no statement)";

/// Formats compiled statements as a reviewable SQL script.
pub struct Renderer<'a> {
    dialect: &'a dyn Dialect,
}

impl<'a> Renderer<'a> {
    #[must_use]
    pub const fn new(dialect: &'a dyn Dialect) -> Self {
        Self { dialect }
    }

    #[must_use]
    pub fn render(&self, statements: &[CompiledQuery], notices: &[Notice]) -> String {
        let mut rendered = format!("-- dialect: {}\n", self.dialect.name());
        Self::render_notices(&mut rendered, notices);

        for statement in statements {
            if statement.is_empty() {
                rendered.push_str(EMPTY_STATEMENT);
                rendered.push('\n');
                continue;
            }

            rendered.push_str(statement.sql.trim_end());
            if !statement.sql.trim_end().ends_with(';') {
                rendered.push(';');
            }
            rendered.push('\n');
            if !statement.bindings.is_empty() {
                rendered.push_str("-- bindings: ");
                rendered.push_str(&render_bindings(&statement.bindings));
                rendered.push('\n');
            }
        }

        rendered
    }

    fn render_notices(rendered: &mut String, notices: &[Notice]) {
        if notices.is_empty() {
            return;
        }

        rendered.push_str(NOTICES_HEADER);
        rendered.push('\n');
        for notice in notices {
            rendered.push_str("-- ");
            rendered.push_str(&notice.to_string());
            rendered.push('\n');
        }
        rendered.push('\n');
    }
}

fn render_bindings(bindings: &[Value]) -> String {
    let values = bindings
        .iter()
        .map(Value::to_sql_literal)
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{values}]")
}
