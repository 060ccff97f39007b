use std::{collections::BTreeMap, fmt, sync::Arc};

use serde::Deserialize;

pub const IDENTIFIER_QUOTE: char = '"';

/// Per-query values handed to a custom identifier wrapper.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(transparent)]
pub struct QueryContext(pub BTreeMap<String, String>);

impl QueryContext {
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }
}

/// User override for identifier wrapping: `(value, default_wrap, context) -> wrapped`.
pub type WrapIdentifierFn =
    Arc<dyn Fn(&str, &dyn Fn(&str) -> String, Option<&QueryContext>) -> String + Send + Sync>;

/// How unquoted identifiers are case-folded before quoting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierCase {
    #[default]
    Upper,
    Preserve,
}

impl IdentifierCase {
    #[must_use]
    pub fn apply(self, value: &str) -> String {
        match self {
            Self::Upper => value.to_uppercase(),
            Self::Preserve => value.to_string(),
        }
    }
}

impl fmt::Display for IdentifierCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Upper => f.write_str("upper"),
            Self::Preserve => f.write_str("preserve"),
        }
    }
}

#[must_use]
pub fn is_quoted(value: &str) -> bool {
    value.starts_with(IDENTIFIER_QUOTE)
}

/// Removes surrounding double quotes and un-escapes doubled quotes.
#[must_use]
pub fn unquote(value: &str) -> String {
    let inner = value
        .strip_prefix(IDENTIFIER_QUOTE)
        .map(|rest| rest.strip_suffix(IDENTIFIER_QUOTE).unwrap_or(rest))
        .unwrap_or(value);
    inner.replace("\"\"", "\"")
}

/// Splits a dotted identifier into atoms, ignoring dots inside double quotes.
#[must_use]
pub fn split_identifier(value: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (index, ch) in value.char_indices() {
        match ch {
            IDENTIFIER_QUOTE => in_quotes = !in_quotes,
            '.' if !in_quotes => {
                parts.push(value[start..index].trim());
                start = index + 1;
            }
            _ => {}
        }
    }
    parts.push(value[start..].trim());
    parts
}

/// Splits `[database.]schema.table` into `(Some(schema), table)`. A database
/// prefix is dropped since catalog views are scoped to one database.
#[must_use]
pub fn split_qualified(value: &str) -> (Option<String>, String) {
    let parts = split_identifier(value);
    match parts.split_last() {
        Some((table, [.., schema])) => (Some((*schema).to_string()), (*table).to_string()),
        _ => (None, value.trim().to_string()),
    }
}

/// Splits `column as alias` on a case-insensitive ` as ` outside quotes.
#[must_use]
pub fn split_alias(value: &str) -> Option<(&str, &str)> {
    let lowered = value.to_ascii_lowercase();
    let mut in_quotes = false;
    for (index, ch) in value.char_indices() {
        if ch == IDENTIFIER_QUOTE {
            in_quotes = !in_quotes;
            continue;
        }
        if !in_quotes && lowered[index..].starts_with(" as ") {
            return Some((value[..index].trim(), value[index + 4..].trim()));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::{split_alias, split_identifier, split_qualified, unquote};

    #[test]
    fn split_identifier_keeps_quoted_dots_together() {
        assert_eq!(split_identifier("a.b"), vec!["a", "b"]);
        assert_eq!(split_identifier("\"a.b\".c"), vec!["\"a.b\"", "c"]);
        assert_eq!(split_identifier("users"), vec!["users"]);
    }

    #[test]
    fn split_qualified_separates_schema() {
        assert_eq!(
            split_qualified("analytics.events"),
            (Some("analytics".to_string()), "events".to_string())
        );
        assert_eq!(split_qualified("events"), (None, "events".to_string()));
        assert_eq!(
            split_qualified("mydb.analytics.events"),
            (Some("analytics".to_string()), "events".to_string())
        );
    }

    #[test]
    fn split_alias_is_case_insensitive() {
        assert_eq!(split_alias("id AS user_id"), Some(("id", "user_id")));
        assert_eq!(split_alias("\"a as b\""), None);
    }

    #[test]
    fn unquote_unescapes_doubled_quotes() {
        assert_eq!(unquote("\"My\"\"Table\""), "My\"Table");
        assert_eq!(unquote("plain"), "plain");
    }
}
