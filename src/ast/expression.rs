use serde_json::Value;

use crate::ast::{Aliasable, Column, ConditionTree, Row, Select, SqlFragment, Table};

use std::borrow::Cow;

/// An expression that can be positioned in a query. Can be a single value or a
/// statement that is evaluated into a value.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression<'a> {
    pub(crate) kind: ExpressionKind<'a>,
    pub(crate) alias: Option<Cow<'a, str>>,
}

impl<'a> Expression<'a> {
    /// The type of the expression, dictates how it's implemented in the query.
    pub fn kind(&self) -> &ExpressionKind<'a> {
        &self.kind
    }

    /// The name alias of the expression, how it can referred in the query.
    pub fn alias(&self) -> Option<&str> {
        self.alias.as_ref().map(|s| s.as_ref())
    }

    /// True if the expression is a bound value.
    pub fn is_parameterized(&self) -> bool {
        matches!(self.kind, ExpressionKind::Parameterized(_))
    }
}

/// An expression we can compare and use in database queries.
#[derive(Debug, Clone, PartialEq)]
pub enum ExpressionKind<'a> {
    /// Anything that we must parameterize before querying
    Parameterized(Value),
    /// Will be rendered as-is to the SQL statement. Carefully escape, if needed.
    Raw(&'a str),
    /// A raw SQL snippet carrying its own bound values
    Fragment(SqlFragment<'a>),
    /// A database column
    Column(Box<Column<'a>>),
    /// A database table, rendered as its (possibly qualified) name
    Table(Box<Table<'a>>),
    /// Data in a row form, e.g. (1, 2, 3)
    Row(Row<'a>),
    /// A nested `SELECT`
    Selection(Box<Select<'a>>),
    /// A qualified asterisk to a table
    Asterisk(Option<Box<Table<'a>>>),
    /// A tree of expressions to evaluate from the deepest value to up
    ConditionTree(ConditionTree<'a>),
    /// A comparison expression
    Compare(super::Compare<'a>),
}

/// A quick alias to create a raw value expression.
pub fn raw(value: &str) -> Expression<'_> {
    Expression {
        kind: ExpressionKind::Raw(value),
        alias: None,
    }
}

/// A quick alias to create an asterisk to a table.
pub fn asterisk() -> Expression<'static> {
    Expression {
        kind: ExpressionKind::Asterisk(None),
        alias: None,
    }
}

impl<'a, T> From<T> for Expression<'a>
where
    T: Into<Value>,
{
    fn from(p: T) -> Self {
        Expression {
            kind: ExpressionKind::Parameterized(p.into()),
            alias: None,
        }
    }
}

impl<'a> From<Row<'a>> for Expression<'a> {
    fn from(value: Row<'a>) -> Self {
        Expression {
            kind: ExpressionKind::Row(value),
            alias: None,
        }
    }
}

impl<'a> From<Table<'a>> for Expression<'a> {
    fn from(value: Table<'a>) -> Self {
        Self {
            kind: ExpressionKind::Table(Box::new(value)),
            alias: None,
        }
    }
}

impl<'a> From<SqlFragment<'a>> for Expression<'a> {
    fn from(value: SqlFragment<'a>) -> Self {
        Self {
            kind: ExpressionKind::Fragment(value),
            alias: None,
        }
    }
}

impl<'a> From<ExpressionKind<'a>> for Expression<'a> {
    fn from(kind: ExpressionKind<'a>) -> Self {
        Self { kind, alias: None }
    }
}

impl<'a> Aliasable<'a> for Expression<'a> {
    type Target = Expression<'a>;

    fn alias<T>(mut self, alias: T) -> Self::Target
    where
        T: Into<Cow<'a, str>>,
    {
        self.alias = Some(alias.into());
        self
    }
}
