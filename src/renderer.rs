//! Visitors for reading an abstract SQL syntax tree, generating the query and
//! gathering parameters in the right order.
//!
//! Parameters are collected while the tree is walked, so their order is always
//! the order in which their placeholders appear in the generated text. For a
//! set operation that means every value of the left operand comes before any
//! value of the right one.
#[cfg(feature = "mysql")]
mod mysql;
#[cfg(feature = "postgresql")]
mod postgres;
#[cfg(feature = "sqlite")]
mod sqlite;

#[cfg(feature = "mysql")]
pub use self::mysql::Mysql;
#[cfg(feature = "postgresql")]
pub use self::postgres::Postgres;
#[cfg(feature = "sqlite")]
pub use self::sqlite::Sqlite;

use crate::ast::*;
use std::fmt;

/// A function travelling through the query AST, building the final query string
/// and gathering parameters sent to the database together with the query.
pub trait Renderer<'a> {
    /// Opening backtick character to surround identifiers, such as column and table names.
    const C_BACKTICK_OPEN: &'static str;
    /// Closing backtick character to surround identifiers, such as column and table names.
    const C_BACKTICK_CLOSE: &'static str;

    /// Convert the given `Query` to an SQL string and a vector of parameters.
    fn build<Q>(query: Q) -> (String, Vec<Value>)
    where
        Q: Into<Query<'a>>;

    /// Convert the given `Query` to an SQL string with every parameter written
    /// as a literal. Meant for logs and assertions, not for execution.
    fn build_inlined<Q>(query: Q) -> String
    where
        Q: Into<Query<'a>>;

    /// Write to the query.
    fn write<D: fmt::Display>(&mut self, s: D);

    /// Collect a parameter to be sent with the query.
    fn add_parameter(&mut self, value: Value);

    /// The placeholder for the most recently added parameter.
    fn parameter_substitution(&mut self);

    /// True when parameters are written into the text instead of collected.
    fn inlines_parameters(&self) -> bool;

    /// The `LIMIT` and `OFFSET` statement in the query
    fn visit_limit_and_offset(&mut self, limit: Option<u32>, offset: Option<u32>);

    fn visit_boolean_literal(&mut self, value: bool) {
        self.write(if value { "TRUE" } else { "FALSE" })
    }

    fn visit_string_literal(&mut self, value: &str) {
        self.write("'");
        self.write(value.replace('\'', "''"));
        self.write("'")
    }

    fn visit_literal(&mut self, value: Value) {
        match value {
            Value::Null => self.write("NULL"),
            Value::Bool(value) => self.visit_boolean_literal(value),
            Value::Number(number) => self.write(number),
            Value::String(value) => self.visit_string_literal(&value),
            json @ (Value::Array(_) | Value::Object(_)) => {
                self.visit_string_literal(&json.to_string())
            }
        }
    }

    /// A value, either written as a placeholder with the value collected, or
    /// inlined.
    fn visit_parameterized(&mut self, value: Value) {
        if self.inlines_parameters() {
            self.visit_literal(value);
        } else {
            self.add_parameter(value);
            self.parameter_substitution();
        }
    }

    fn surround_with<F>(&mut self, begin: &str, end: &str, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.write(begin);
        f(self);
        self.write(end)
    }

    fn surround_with_backticks(&mut self, part: &str) {
        let escaped = part.replace(
            Self::C_BACKTICK_CLOSE,
            &format!("{}{}", Self::C_BACKTICK_CLOSE, Self::C_BACKTICK_CLOSE),
        );

        self.surround_with(Self::C_BACKTICK_OPEN, Self::C_BACKTICK_CLOSE, |s| {
            s.write(escaped)
        });
    }

    fn delimited_identifiers(&mut self, parts: &[&str]) {
        let len = parts.len();

        for (i, part) in parts.iter().enumerate() {
            self.surround_with_backticks(part);

            if i < (len - 1) {
                self.write(".");
            }
        }
    }

    fn visit_query(&mut self, query: Query<'a>) {
        match query {
            Query::Select(select) => self.visit_select(*select),
            Query::SetOperation(operation) => self.visit_set_operation(*operation),
        }
    }

    fn visit_select(&mut self, select: Select<'a>) {
        self.write("SELECT ");

        if select.distinct {
            self.write("DISTINCT ");
        }

        match (select.tables.is_empty(), select.columns.is_empty()) {
            (_, false) => self.visit_columns(select.columns),
            (false, true) => self.visit_asterisks(&select.tables),
            (true, true) => self.write("*"),
        }

        if !select.tables.is_empty() {
            self.write(" FROM ");

            let len = select.tables.len();

            for (i, table) in select.tables.into_iter().enumerate() {
                self.visit_table(table, true);

                if i < (len - 1) {
                    self.write(", ");
                }
            }
        }

        if !select.joins.is_empty() {
            self.visit_joins(select.joins);
        }

        if let Some(conditions) = select.conditions {
            if !conditions.is_empty() {
                self.write(" WHERE ");
                self.visit_conditions(conditions);
            }
        }

        if !select.ordering.is_empty() {
            self.write(" ORDER BY ");
            self.visit_ordering(select.ordering);
        }

        self.visit_limit_and_offset(select.limit, select.offset);
    }

    /// `"table".*` for every table of a `SELECT` without explicit columns.
    fn visit_asterisks(&mut self, tables: &[Table<'a>]) {
        let len = tables.len();

        for (i, table) in tables.iter().enumerate() {
            match table.reference_name() {
                Some(name) => {
                    self.surround_with_backticks(name);
                    self.write(".*");
                }
                None => self.write("*"),
            }

            if i < (len - 1) {
                self.write(", ");
            }
        }
    }

    /// A set operation with both of its sides. Grouped operands get their
    /// parentheses here; nothing else is added.
    fn visit_set_operation(&mut self, operation: SetOperation<'a>) {
        self.visit_set_operand(*operation.left);
        self.write(" ");
        self.write(operation.operator.as_sql());
        self.write(" ");
        self.visit_set_operand(*operation.right);
    }

    fn visit_set_operand(&mut self, operand: SetOperand<'a>) {
        match operand {
            SetOperand::Select(select) => self.visit_select(*select),
            SetOperand::SetOperation(operation) => self.visit_set_operation(*operation),
            SetOperand::Grouped(inner) => {
                self.surround_with("(", ")", |s| s.visit_set_operand(*inner))
            }
        }
    }

    /// A table, with its alias when `include_alias` is set.
    fn visit_table(&mut self, table: Table<'a>, include_alias: bool) {
        let alias = table.alias.filter(|_| include_alias);
        let database = table.database;

        let joins = match table.typ {
            TableType::Table(name) => {
                self.visit_table_name(database.as_deref(), &name);
                None
            }
            TableType::JoinedTable(joined) => {
                let (name, joins) = *joined;
                self.visit_table_name(database.as_deref(), &name);
                Some(joins)
            }
            TableType::Query(select) => {
                self.surround_with("(", ")", |s| s.visit_select(*select));
                None
            }
            TableType::SetOperation(operation) => {
                self.surround_with("(", ")", |s| s.visit_set_operation(*operation));
                None
            }
        };

        if let Some(alias) = alias {
            self.write(" AS ");
            self.surround_with_backticks(&alias);
        }

        if let Some(joins) = joins {
            self.visit_joins(joins);
        }
    }

    fn visit_table_name(&mut self, database: Option<&str>, name: &str) {
        match database {
            Some(database) => self.delimited_identifiers(&[database, name]),
            None => self.delimited_identifiers(&[name]),
        }
    }

    /// How a column or an asterisk refers to its table: by alias if there is
    /// one, otherwise by name.
    fn visit_table_reference(&mut self, table: Table<'a>) {
        match table.alias {
            Some(ref alias) => self.surround_with_backticks(alias),
            None => self.visit_table(table, false),
        }
    }

    fn visit_joins(&mut self, joins: Vec<Join<'a>>) {
        for join in joins {
            self.write(" ");
            self.write(join.keyword());
            self.write(" ");
            self.visit_join_data(join.into_data());
        }
    }

    fn visit_join_data(&mut self, data: JoinData<'a>) {
        self.visit_table(data.table, true);
        self.write(" ON ");
        self.visit_conditions(data.conditions)
    }

    fn visit_columns(&mut self, columns: Vec<Expression<'a>>) {
        let len = columns.len();

        for (i, column) in columns.into_iter().enumerate() {
            self.visit_expression(column);

            if i < (len - 1) {
                self.write(", ");
            }
        }
    }

    fn visit_column(&mut self, column: Column<'a>) {
        if let Some(table) = column.table {
            self.visit_table_reference(table);
            self.write(".");
        }

        self.surround_with_backticks(&column.name);

        if let Some(alias) = column.alias {
            self.write(" AS ");
            self.surround_with_backticks(&alias);
        }
    }

    fn visit_expression(&mut self, value: Expression<'a>) {
        match value.kind {
            ExpressionKind::Parameterized(value) => self.visit_parameterized(value),
            ExpressionKind::Raw(value) => self.write(value),
            ExpressionKind::Fragment(fragment) => self.visit_fragment(fragment),
            ExpressionKind::Column(column) => self.visit_column(*column),
            ExpressionKind::Table(table) => self.visit_table(*table, false),
            ExpressionKind::Row(row) => self.visit_row(row),
            ExpressionKind::Selection(select) => {
                self.surround_with("(", ")", |s| s.visit_select(*select))
            }
            ExpressionKind::Asterisk(table) => match table {
                Some(table) => {
                    self.visit_table_reference(*table);
                    self.write(".*")
                }
                None => self.write("*"),
            },
            ExpressionKind::ConditionTree(tree) => self.visit_conditions(tree),
            ExpressionKind::Compare(compare) => self.visit_compare(compare),
        }

        if let Some(alias) = value.alias {
            self.write(" AS ");
            self.surround_with_backticks(&alias);
        }
    }

    /// A hand-written fragment in parentheses, each `?` replaced by the
    /// dialect's placeholder.
    fn visit_fragment(&mut self, fragment: SqlFragment<'a>) {
        let segments: Vec<String> = fragment
            .segments()
            .into_iter()
            .map(String::from)
            .collect();

        let mut values = fragment.values.into_iter();

        self.surround_with("(", ")", |s| {
            for (i, segment) in segments.iter().enumerate() {
                if i > 0 {
                    if let Some(value) = values.next() {
                        s.visit_parameterized(value);
                    }
                }

                s.write(segment);
            }
        });
    }

    fn visit_row(&mut self, row: Row<'a>) {
        self.surround_with("(", ")", |ref mut s| {
            let len = row.values.len();

            for (i, value) in row.values.into_iter().enumerate() {
                s.visit_expression(value);

                if i < (len - 1) {
                    s.write(",");
                }
            }
        })
    }

    fn visit_conditions(&mut self, tree: ConditionTree<'a>) {
        match tree {
            ConditionTree::And(expressions) => {
                self.visit_conjunction(expressions, " AND ");
            }
            ConditionTree::Or(expressions) => {
                self.visit_conjunction(expressions, " OR ");
            }
            ConditionTree::Not(expression) => {
                self.surround_with("(NOT ", ")", |s| s.visit_expression(*expression))
            }
            ConditionTree::Single(expression) => self.visit_expression(*expression),
            ConditionTree::NoCondition => self.write("1=1"),
            ConditionTree::NegativeCondition => self.write("1=0"),
        }
    }

    fn visit_conjunction(&mut self, expressions: Vec<Expression<'a>>, separator: &str) {
        let len = expressions.len();

        self.surround_with("(", ")", |s| {
            for (i, expr) in expressions.into_iter().enumerate() {
                s.visit_expression(expr);

                if i < (len - 1) {
                    s.write(separator);
                }
            }
        });
    }

    fn visit_compare(&mut self, compare: Compare<'a>) {
        match compare {
            Compare::Equals(left, right) => self.visit_equals(*left, *right),
            Compare::NotEquals(left, right) => self.visit_not_equals(*left, *right),
            Compare::LessThan(left, right) => self.visit_binary(*left, " < ", *right),
            Compare::GreaterThan(left, right) => self.visit_binary(*left, " > ", *right),
            Compare::In(left, right) => self.visit_in(*left, *right, false),
            Compare::NotIn(left, right) => self.visit_in(*left, *right, true),
            Compare::Like(left, right) => self.visit_like(*left, *right),
            Compare::Null(column) => {
                self.visit_expression(*column);
                self.write(" IS NULL");
            }
            Compare::NotNull(column) => {
                self.visit_expression(*column);
                self.write(" IS NOT NULL");
            }
        }
    }

    fn visit_binary(&mut self, left: Expression<'a>, operator: &str, right: Expression<'a>) {
        self.visit_expression(left);
        self.write(operator);
        self.visit_expression(right);
    }

    fn visit_equals(&mut self, left: Expression<'a>, right: Expression<'a>) {
        self.visit_binary(left, " = ", right);
    }

    fn visit_not_equals(&mut self, left: Expression<'a>, right: Expression<'a>) {
        self.visit_binary(left, " <> ", right);
    }

    fn visit_like(&mut self, left: Expression<'a>, right: Expression<'a>) {
        self.visit_binary(left, " LIKE ", right);
    }

    /// `IN` against a row or a nested selection. An empty row can never
    /// match, so it collapses into a constant condition.
    fn visit_in(&mut self, left: Expression<'a>, right: Expression<'a>, not: bool) {
        let empty_row = matches!(&right.kind, ExpressionKind::Row(row) if row.is_empty());
        let parenthesized = matches!(
            &right.kind,
            ExpressionKind::Row(_) | ExpressionKind::Selection(_)
        );

        if empty_row {
            self.write(if not { "1=1" } else { "1=0" });
            return;
        }

        self.visit_expression(left);
        self.write(if not { " NOT IN " } else { " IN " });

        if parenthesized {
            self.visit_expression(right);
        } else {
            self.surround_with("(", ")", |s| s.visit_expression(right));
        }
    }

    fn visit_ordering(&mut self, ordering: Ordering<'a>) {
        let len = ordering.0.len();

        for (i, (value, order)) in ordering.0.into_iter().enumerate() {
            self.visit_expression(value);

            if let Some(order) = order {
                self.write(" ");
                self.write(order.as_sql());
            }

            if i < (len - 1) {
                self.write(", ");
            }
        }
    }
}
