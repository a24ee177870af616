use serde_json::Value;

use crate::{ast::*, renderer::Renderer};
use std::fmt::{self, Write};

/// A visitor to generate queries for the SQLite database.
///
/// SQLite rejects parentheses around the operands of a compound `SELECT`;
/// this renderer writes whatever grouping the tree carries, so trees meant for
/// SQLite have to be built without it.
pub struct Sqlite {
    query: String,
    parameters: Vec<Value>,
    inline: bool,
}

impl Sqlite {
    fn render<'a>(query: Query<'a>, inline: bool) -> (String, Vec<Value>) {
        let mut sqlite = Sqlite {
            query: String::with_capacity(4096),
            parameters: Vec::with_capacity(128),
            inline,
        };

        Sqlite::visit_query(&mut sqlite, query);

        (sqlite.query, sqlite.parameters)
    }
}

impl<'a> Renderer<'a> for Sqlite {
    const C_BACKTICK_OPEN: &'static str = "\"";
    const C_BACKTICK_CLOSE: &'static str = "\"";

    fn build<Q>(query: Q) -> (String, Vec<Value>)
    where
        Q: Into<Query<'a>>,
    {
        Sqlite::render(query.into(), false)
    }

    fn build_inlined<Q>(query: Q) -> String
    where
        Q: Into<Query<'a>>,
    {
        Sqlite::render(query.into(), true).0
    }

    fn write<D: fmt::Display>(&mut self, s: D) {
        write!(&mut self.query, "{s}")
            .expect("we ran out of memory or something else why write failed");
    }

    fn add_parameter(&mut self, value: Value) {
        self.parameters.push(value);
    }

    fn parameter_substitution(&mut self) {
        self.write("?");
    }

    fn inlines_parameters(&self) -> bool {
        self.inline
    }

    fn visit_limit_and_offset(&mut self, limit: Option<u32>, offset: Option<u32>) {
        match (limit, offset) {
            (Some(limit), Some(offset)) => {
                self.write(" LIMIT ");
                self.visit_parameterized(Value::from(limit));

                self.write(" OFFSET ");
                self.visit_parameterized(Value::from(offset))
            }
            (None, Some(offset)) => {
                // A negative limit means no limit.
                self.write(" LIMIT -1");

                self.write(" OFFSET ");
                self.visit_parameterized(Value::from(offset))
            }
            (Some(limit), None) => {
                self.write(" LIMIT ");
                self.visit_parameterized(Value::from(limit))
            }
            (None, None) => (),
        }
    }

    // No boolean type, TRUE and FALSE are aliases of 1 and 0.
    fn visit_boolean_literal(&mut self, value: bool) {
        self.write(if value { "1" } else { "0" })
    }
}

#[cfg(test)]
mod tests {
    use crate::renderer::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn offset_without_limit() {
        let (sql, params) = Sqlite::build(Select::from_table("posts").offset(5));

        assert_eq!(r#"SELECT "posts".* FROM "posts" LIMIT -1 OFFSET ?"#, sql);
        assert_eq!(vec![Value::from(5)], params);
    }

    #[test]
    fn ungrouped_union() {
        let left = Select::from_table("posts").so_that(("posts", "user_id").equals(1));
        let created_after = fragment("created_at > ?", vec![Value::from("2014-07-19 00:00:00")]);
        let right = Select::from_table("posts").so_that(created_after.unwrap());

        let union = SetOperation::new(SetOperator::UnionAll, left, right);
        let query = Select::from_table(Table::from(union).alias("posts"));

        let (sql, params) = Sqlite::build(query.clone());

        assert_eq!(
            r#"SELECT "posts".* FROM (SELECT "posts".* FROM "posts" WHERE "posts"."user_id" = ? UNION ALL SELECT "posts".* FROM "posts" WHERE (created_at > ?)) AS "posts""#,
            sql
        );
        assert_eq!(
            vec![Value::from(1), Value::from("2014-07-19 00:00:00")],
            params
        );

        assert_eq!(
            r#"SELECT "posts".* FROM (SELECT "posts".* FROM "posts" WHERE "posts"."user_id" = 1 UNION ALL SELECT "posts".* FROM "posts" WHERE (created_at > '2014-07-19 00:00:00')) AS "posts""#,
            Sqlite::build_inlined(query)
        );
    }

    #[test]
    fn booleans_inline_as_integers() {
        let join = Table::from("posts").on(("posts", "draft")
            .equals(true)
            .and(("posts", "user_id").equals(Column::from(("users", "id")))));

        let query = Select::from_table("users").inner_join(join);

        assert_eq!(
            r#"SELECT "users".* FROM "users" INNER JOIN "posts" ON ("posts"."draft" = 1 AND "posts"."user_id" = "users"."id")"#,
            Sqlite::build_inlined(query)
        );
    }
}
