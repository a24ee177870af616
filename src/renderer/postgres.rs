use serde_json::Value;

use crate::{ast::*, renderer::Renderer};
use std::fmt::{self, Write};

/// A visitor to generate queries for the PostgreSQL database.
///
/// Parameters are numbered, `$1`, `$2`, ..., in the order they are collected.
pub struct Postgres {
    query: String,
    parameters: Vec<Value>,
    inline: bool,
}

impl Postgres {
    fn render<'a>(query: Query<'a>, inline: bool) -> (String, Vec<Value>) {
        let mut postgres = Postgres {
            query: String::with_capacity(4096),
            parameters: Vec::with_capacity(128),
            inline,
        };

        Postgres::visit_query(&mut postgres, query);

        (postgres.query, postgres.parameters)
    }
}

impl<'a> Renderer<'a> for Postgres {
    const C_BACKTICK_OPEN: &'static str = "\"";
    const C_BACKTICK_CLOSE: &'static str = "\"";

    fn build<Q>(query: Q) -> (String, Vec<Value>)
    where
        Q: Into<Query<'a>>,
    {
        Postgres::render(query.into(), false)
    }

    fn build_inlined<Q>(query: Q) -> String
    where
        Q: Into<Query<'a>>,
    {
        Postgres::render(query.into(), true).0
    }

    fn write<D: fmt::Display>(&mut self, s: D) {
        write!(&mut self.query, "{s}")
            .expect("we ran out of memory or something else why write failed");
    }

    fn add_parameter(&mut self, value: Value) {
        self.parameters.push(value);
    }

    fn parameter_substitution(&mut self) {
        self.write("$");
        self.write(self.parameters.len())
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

    fn visit_like(&mut self, left: Expression<'a>, right: Expression<'a>) {
        let need_cast = matches!(&left.kind, ExpressionKind::Column(_));
        self.visit_expression(left);

        // NOTE: Pg is strongly typed, LIKE comparisons are only between strings.
        // to avoid problems with types without implicit casting we explicitly cast to text
        if need_cast {
            self.write("::text");
        }

        self.write(" LIKE ");
        self.visit_expression(right);
    }
}
