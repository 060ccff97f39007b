use sqlfrost_core::{
    QueryContext, base,
    ident::{is_quoted, unquote},
};

use crate::SnowflakeDialect;

/// Decides the final spelling of one identifier atom.
///
/// A configured override wins outright. Quoted atoms keep their exact text;
/// anything else is case-folded before quoting.
pub(crate) fn wrap_identifier(
    dialect: &SnowflakeDialect,
    value: &str,
    context: Option<&QueryContext>,
) -> String {
    let default_wrap = |atom: &str| base::quote_identifier(atom);

    if let Some(custom) = &dialect.wrap_identifier {
        return custom(value, &default_wrap, context);
    }

    if is_quoted(value) {
        return default_wrap(&unquote(value));
    }

    default_wrap(&dialect.identifier_case.apply(value))
}

/// The catalog spelling of an identifier, as stored in `information_schema`.
pub(crate) fn fold_catalog_name(dialect: &SnowflakeDialect, value: &str) -> String {
    let value = value.trim();
    if is_quoted(value) {
        unquote(value)
    } else {
        dialect.identifier_case.apply(value)
    }
}

#[cfg(test)]
mod tests {
    use super::{fold_catalog_name, wrap_identifier};
    use crate::SnowflakeDialect;

    #[test]
    fn unquoted_atoms_are_upper_cased() {
        let dialect = SnowflakeDialect::new();
        assert_eq!(wrap_identifier(&dialect, "users", None), "\"USERS\"");
        assert_eq!(wrap_identifier(&dialect, "", None), "\"\"");
    }

    #[test]
    fn quoted_atoms_round_trip() {
        let dialect = SnowflakeDialect::new();
        assert_eq!(wrap_identifier(&dialect, "\"MixedCase\"", None), "\"MixedCase\"");
        assert_eq!(wrap_identifier(&dialect, "\"a\"\"b\"", None), "\"a\"\"b\"");
    }

    #[test]
    fn catalog_names_drop_quotes() {
        let dialect = SnowflakeDialect::new();
        assert_eq!(fold_catalog_name(&dialect, "users"), "USERS");
        assert_eq!(fold_catalog_name(&dialect, "\"Users\""), "Users");
    }
}
