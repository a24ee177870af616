use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    ast::{Query, Select},
    Error, Result,
};

/// The operator combining the rows of two statements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SetOperator {
    /// `UNION`, duplicate rows removed
    Union,
    /// `UNION ALL`, duplicate rows kept
    UnionAll,
    /// `INTERSECT`
    Intersect,
}

impl SetOperator {
    pub fn as_sql(self) -> &'static str {
        match self {
            SetOperator::Union => "UNION",
            SetOperator::UnionAll => "UNION ALL",
            SetOperator::Intersect => "INTERSECT",
        }
    }
}

impl fmt::Display for SetOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// One side of a set operation.
#[derive(Debug, Clone, PartialEq)]
pub enum SetOperand<'a> {
    Select(Box<Select<'a>>),
    SetOperation(Box<SetOperation<'a>>),
    /// Rendered in parentheses. Lets each side keep its own `ORDER BY` and
    /// `LIMIT` on databases that accept it.
    Grouped(Box<SetOperand<'a>>),
}

impl<'a> SetOperand<'a> {
    /// Wraps the operand in parentheses. Grouping twice is a no-op.
    pub fn grouped(self) -> Self {
        match self {
            grouped @ SetOperand::Grouped(_) => grouped,
            operand => SetOperand::Grouped(Box::new(operand)),
        }
    }

    /// Groups the operand only when `group` is set.
    pub fn grouped_if(self, group: bool) -> Self {
        if group {
            self.grouped()
        } else {
            self
        }
    }

    pub fn is_grouped(&self) -> bool {
        matches!(self, SetOperand::Grouped(_))
    }

    fn operand_count(&self) -> usize {
        match self {
            SetOperand::Select(_) => 1,
            SetOperand::SetOperation(operation) => operation.operand_count(),
            SetOperand::Grouped(inner) => inner.operand_count(),
        }
    }
}

impl<'a> From<Select<'a>> for SetOperand<'a> {
    fn from(select: Select<'a>) -> Self {
        SetOperand::Select(Box::new(select))
    }
}

impl<'a> From<SetOperation<'a>> for SetOperand<'a> {
    fn from(operation: SetOperation<'a>) -> Self {
        SetOperand::SetOperation(Box::new(operation))
    }
}

/// A binary `UNION`, `UNION ALL` or `INTERSECT` node.
///
/// ```rust
/// # use relation_union::{ast::*, renderer::{self, Renderer}};
/// # fn main() {
/// let left = Select::from_table("posts").so_that(("posts", "user_id").equals(1));
/// let right = Select::from_table("posts").so_that(("posts", "user_id").equals(2));
///
/// let union = SetOperation::new(
///     SetOperator::UnionAll,
///     SetOperand::from(left).grouped(),
///     SetOperand::from(right).grouped(),
/// );
///
/// let (sql, params) = renderer::Postgres::build(union);
///
/// assert_eq!(
///     r#"(SELECT "posts".* FROM "posts" WHERE "posts"."user_id" = $1) UNION ALL (SELECT "posts".* FROM "posts" WHERE "posts"."user_id" = $2)"#,
///     sql
/// );
/// assert_eq!(vec![Value::from(1), Value::from(2)], params);
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SetOperation<'a> {
    pub(crate) operator: SetOperator,
    pub(crate) left: Box<SetOperand<'a>>,
    pub(crate) right: Box<SetOperand<'a>>,
}

impl<'a> SetOperation<'a> {
    pub fn new<L, R>(operator: SetOperator, left: L, right: R) -> Self
    where
        L: Into<SetOperand<'a>>,
        R: Into<SetOperand<'a>>,
    {
        Self {
            operator,
            left: Box::new(left.into()),
            right: Box::new(right.into()),
        }
    }

    /// Folds the operands left to right into nested binary nodes,
    /// `((a ∪ b) ∪ c) ∪ d`.
    ///
    /// With `grouped` set every statement and every nested node is wrapped
    /// in parentheses; without it nothing is, and the left-associative
    /// grammar of the database keeps the same evaluation order.
    ///
    /// ```rust
    /// # use relation_union::{ast::*, renderer::{self, Renderer}};
    /// # fn main() -> Result<(), relation_union::Error> {
    /// let ids = [1, 2, 3];
    /// let selects = ids
    ///     .iter()
    ///     .map(|id| Select::from_table("users").so_that(("users", "id").equals(*id)));
    ///
    /// let union = SetOperation::reduce(SetOperator::Union, selects, false)?;
    /// let (sql, _) = renderer::Sqlite::build(union);
    ///
    /// assert_eq!(
    ///     r#"SELECT "users".* FROM "users" WHERE "users"."id" = ? UNION SELECT "users".* FROM "users" WHERE "users"."id" = ? UNION SELECT "users".* FROM "users" WHERE "users"."id" = ?"#,
    ///     sql
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub fn reduce<I, O>(operator: SetOperator, operands: I, grouped: bool) -> Result<Self>
    where
        I: IntoIterator<Item = O>,
        O: Into<SetOperand<'a>>,
    {
        let mut operands = operands.into_iter().map(|operand| {
            let operand: SetOperand<'a> = operand.into();
            operand.grouped_if(grouped)
        });

        let first = operands.next().ok_or(Error::MissingOperand { operator })?;
        let second = operands.next().ok_or(Error::MissingOperand { operator })?;

        let init = SetOperation::new(operator, first, second);

        Ok(operands.fold(init, |acc, operand| {
            SetOperation::new(operator, SetOperand::from(acc).grouped_if(grouped), operand)
        }))
    }

    pub fn operator(&self) -> SetOperator {
        self.operator
    }

    pub fn left(&self) -> &SetOperand<'a> {
        &self.left
    }

    pub fn right(&self) -> &SetOperand<'a> {
        &self.right
    }

    /// Number of statements combined under this node.
    pub fn operand_count(&self) -> usize {
        self.left.operand_count() + self.right.operand_count()
    }
}

impl<'a> From<SetOperation<'a>> for Query<'a> {
    fn from(operation: SetOperation<'a>) -> Self {
        Query::SetOperation(Box::new(operation))
    }
}
