use serde_json::Value;
use std::borrow::Cow;

use crate::{ast::ConditionTree, Error, Result};

/// A hand-written SQL condition with positional `?` placeholders.
///
/// The renderer writes the text in parentheses and replaces every
/// placeholder with the dialect's own parameter marker, so the values keep
/// their position among the rest of the query's parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlFragment<'a> {
    pub(crate) sql: Cow<'a, str>,
    pub(crate) values: Vec<Value>,
}

/// Builds a fragment, checking that every placeholder has a value.
///
/// A `?` inside a single-quoted literal or a `"`/`` ` ``-quoted identifier is
/// text, not a placeholder.
///
/// ```rust
/// # use relation_union::{ast::*, renderer::{self, Renderer}};
/// # fn main() -> Result<(), relation_union::Error> {
/// let query = Select::from_table("posts")
///     .so_that(fragment("created_at > ?", vec![Value::from("2014-07-19 00:00:00")])?);
///
/// let (sql, params) = renderer::Postgres::build(query);
///
/// assert_eq!(r#"SELECT "posts".* FROM "posts" WHERE (created_at > $1)"#, sql);
/// assert_eq!(vec![Value::from("2014-07-19 00:00:00")], params);
/// # Ok(())
/// # }
/// ```
pub fn fragment<'a, S>(sql: S, values: Vec<Value>) -> Result<SqlFragment<'a>>
where
    S: Into<Cow<'a, str>>,
{
    let sql = sql.into();
    let placeholders = placeholder_offsets(&sql).len();

    if placeholders != values.len() {
        return Err(Error::FragmentArity {
            placeholders,
            values: values.len(),
        });
    }

    Ok(SqlFragment { sql, values })
}

impl<'a> SqlFragment<'a> {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// The text between placeholders; always one more piece than there are
    /// values.
    pub(crate) fn segments(&self) -> Vec<&str> {
        let mut segments = Vec::with_capacity(self.values.len() + 1);
        let mut start = 0;

        for offset in placeholder_offsets(&self.sql) {
            segments.push(&self.sql[start..offset]);
            start = offset + 1;
        }

        segments.push(&self.sql[start..]);
        segments
    }
}

impl<'a> From<SqlFragment<'a>> for ConditionTree<'a> {
    fn from(fragment: SqlFragment<'a>) -> Self {
        ConditionTree::single(fragment)
    }
}

// Offsets of every `?` outside string literals and quoted identifiers.
fn placeholder_offsets(sql: &str) -> Vec<usize> {
    let mut quote: Option<char> = None;

    sql.char_indices()
        .filter_map(|(offset, c)| match (quote, c) {
            (Some(open), c) if c == open => {
                quote = None;
                None
            }
            (Some(_), _) => None,
            (None, '\'' | '"' | '`') => {
                quote = Some(c);
                None
            }
            (None, '?') => Some(offset),
            (None, _) => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_placeholders_outside_literals() {
        let fragment = fragment("title = '?' AND id > ?", vec![Value::from(1)]).unwrap();

        assert_eq!(vec!["title = '?' AND id > ", ""], fragment.segments());
    }

    #[test]
    fn rejects_missing_values() {
        let err = fragment("a = ? AND b = ?", vec![Value::from(1)]).unwrap_err();

        assert!(matches!(
            err,
            Error::FragmentArity {
                placeholders: 2,
                values: 1
            }
        ));
    }

    #[test]
    fn fragment_without_placeholders_is_a_single_segment() {
        let fragment = fragment("deleted_at IS NULL", vec![]).unwrap();

        assert_eq!(vec!["deleted_at IS NULL"], fragment.segments());
    }

    #[test]
    fn skips_quoted_identifiers() {
        let values = vec![Value::from(1), Value::from(2)];
        let fragment = fragment(r#""weird?" = ? AND `odd?` = ?"#, values).unwrap();

        assert_eq!(
            vec![r#""weird?" = "#, " AND `odd?` = ", ""],
            fragment.segments()
        );
    }

    #[test]
    fn quoted_identifier_needs_no_value() {
        assert!(fragment(r#""weird?" IS NULL"#, vec![]).is_ok());
    }
}
