use serde_json::Value;

use crate::{ast::*, renderer::Renderer};
use std::fmt::{self, Write};

/// A visitor to generate queries for the MySQL database.
///
/// Every parameter is a bare `?`; the values are bound in collection order.
pub struct Mysql {
    query: String,
    parameters: Vec<Value>,
    inline: bool,
}

impl Mysql {
    fn render<'a>(query: Query<'a>, inline: bool) -> (String, Vec<Value>) {
        let mut mysql = Mysql {
            query: String::with_capacity(4096),
            parameters: Vec::with_capacity(128),
            inline,
        };

        Mysql::visit_query(&mut mysql, query);

        (mysql.query, mysql.parameters)
    }
}

impl<'a> Renderer<'a> for Mysql {
    const C_BACKTICK_OPEN: &'static str = "`";
    const C_BACKTICK_CLOSE: &'static str = "`";

    fn build<Q>(query: Q) -> (String, Vec<Value>)
    where
        Q: Into<Query<'a>>,
    {
        Mysql::render(query.into(), false)
    }

    fn build_inlined<Q>(query: Q) -> String
    where
        Q: Into<Query<'a>>,
    {
        Mysql::render(query.into(), true).0
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

    // MySQL has no OFFSET without LIMIT; the documented workaround is the
    // largest unsigned 64-bit value.
    fn visit_limit_and_offset(&mut self, limit: Option<u32>, offset: Option<u32>) {
        match (limit, offset) {
            (Some(limit), Some(offset)) => {
                self.write(" LIMIT ");
                self.visit_parameterized(Value::from(limit));

                self.write(" OFFSET ");
                self.visit_parameterized(Value::from(offset))
            }
            (None, Some(offset)) => {
                self.write(" LIMIT ");
                self.write(u64::MAX);

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

    // Backslash is an escape character in MySQL string literals.
    fn visit_string_literal(&mut self, value: &str) {
        self.write("'");
        self.write(value.replace('\\', "\\\\").replace('\'', "''"));
        self.write("'")
    }
}

#[cfg(test)]
mod tests {
    use crate::renderer::*;
    use pretty_assertions::assert_eq;

    fn posts_of(user_id: i64) -> Select<'static> {
        Select::from_table("posts")
            .so_that(("posts", "user_id").equals(user_id))
            .order_by(("posts", "created_at").ascend())
    }

    #[test]
    fn identifiers_use_backticks() {
        let (sql, _) = Mysql::build(Select::from_table(("blog", "posts")).column("title"));

        assert_eq!("SELECT `title` FROM `blog`.`posts`", sql);
    }

    #[test]
    fn offset_without_limit() {
        let (sql, params) = Mysql::build(Select::from_table("posts").offset(5));

        assert_eq!(
            "SELECT `posts`.* FROM `posts` LIMIT 18446744073709551615 OFFSET ?",
            sql
        );
        assert_eq!(vec![Value::from(5)], params);
    }

    #[test]
    fn grouped_union_with_ordered_operands() {
        let union = SetOperation::new(
            SetOperator::Union,
            SetOperand::from(posts_of(1)).grouped(),
            SetOperand::from(posts_of(2)).grouped(),
        );

        let query = Select::from_table(Table::from(union).alias("posts")).order_by("created_at".ascend());
        let sql = Mysql::build_inlined(query);

        assert_eq!(
            "SELECT `posts`.* FROM ((SELECT `posts`.* FROM `posts` WHERE `posts`.`user_id` = 1 ORDER BY `posts`.`created_at` ASC) UNION (SELECT `posts`.* FROM `posts` WHERE `posts`.`user_id` = 2 ORDER BY `posts`.`created_at` ASC)) AS `posts` ORDER BY `created_at` ASC",
            sql
        );
    }

    #[test]
    fn string_literals_escape_backslashes() {
        let query = Select::from_table("posts").so_that(("posts", "title").equals(r"a\'b"));

        assert_eq!(
            r"SELECT `posts`.* FROM `posts` WHERE `posts`.`title` = 'a\\''b'",
            Mysql::build_inlined(query)
        );
    }

    #[test]
    fn identifiers_escape_backticks() {
        let (sql, _) = Mysql::build(Select::from_table("we`ird"));

        assert_eq!("SELECT `we``ird`.* FROM `we``ird`", sql);
    }
}
