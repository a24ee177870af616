use super::ExpressionKind;
use crate::ast::{Column, ConditionTree, Expression};

/// A comparison between two expressions, or a null check on one.
///
/// Anything else, `BETWEEN` or a vendor operator, goes through
/// [`fragment`](crate::ast::fragment).
#[derive(Debug, Clone, PartialEq)]
pub enum Compare<'a> {
    /// `left = right`
    Equals(Box<Expression<'a>>, Box<Expression<'a>>),
    /// `left <> right`
    NotEquals(Box<Expression<'a>>, Box<Expression<'a>>),
    /// `left < right`
    LessThan(Box<Expression<'a>>, Box<Expression<'a>>),
    /// `left > right`
    GreaterThan(Box<Expression<'a>>, Box<Expression<'a>>),
    /// `left IN (..)`
    In(Box<Expression<'a>>, Box<Expression<'a>>),
    /// `left NOT IN (..)`
    NotIn(Box<Expression<'a>>, Box<Expression<'a>>),
    /// `left LIKE pattern`
    Like(Box<Expression<'a>>, Box<Expression<'a>>),
    /// `value IS NULL`
    Null(Box<Expression<'a>>),
    /// `value IS NOT NULL`
    NotNull(Box<Expression<'a>>),
}

impl<'a> From<Compare<'a>> for ConditionTree<'a> {
    fn from(cmp: Compare<'a>) -> Self {
        ConditionTree::single(Expression::from(cmp))
    }
}

impl<'a> From<Compare<'a>> for Expression<'a> {
    fn from(cmp: Compare<'a>) -> Self {
        Expression {
            kind: ExpressionKind::Compare(cmp),
            alias: None,
        }
    }
}

/// An item that can be compared against other values in the database.
///
/// Implementors only say how they become the left side of the comparison.
pub trait Comparable<'a>: Sized {
    /// The expression standing on the left side.
    fn compared(self) -> Expression<'a>;

    /// Tests if both sides are the same value.
    fn equals<T>(self, comparison: T) -> Compare<'a>
    where
        T: Into<Expression<'a>>,
    {
        Compare::Equals(Box::new(self.compared()), Box::new(comparison.into()))
    }

    /// Tests if both sides are not the same value.
    fn not_equals<T>(self, comparison: T) -> Compare<'a>
    where
        T: Into<Expression<'a>>,
    {
        Compare::NotEquals(Box::new(self.compared()), Box::new(comparison.into()))
    }

    /// Tests if the left side is smaller than the right side.
    fn less_than<T>(self, comparison: T) -> Compare<'a>
    where
        T: Into<Expression<'a>>,
    {
        Compare::LessThan(Box::new(self.compared()), Box::new(comparison.into()))
    }

    /// Tests if the left side is bigger than the right side.
    fn greater_than<T>(self, comparison: T) -> Compare<'a>
    where
        T: Into<Expression<'a>>,
    {
        Compare::GreaterThan(Box::new(self.compared()), Box::new(comparison.into()))
    }

    /// Tests if the left side is included in the right side collection, a
    /// [`Row`](crate::ast::Row), a nested selection or a relation.
    fn in_selection<T>(self, selection: T) -> Compare<'a>
    where
        T: Into<Expression<'a>>,
    {
        Compare::In(Box::new(self.compared()), Box::new(selection.into()))
    }

    /// Tests if the left side is not included in the right side collection.
    fn not_in_selection<T>(self, selection: T) -> Compare<'a>
    where
        T: Into<Expression<'a>>,
    {
        Compare::NotIn(Box::new(self.compared()), Box::new(selection.into()))
    }

    /// Tests if the left side matches the right side pattern.
    fn like<T>(self, pattern: T) -> Compare<'a>
    where
        T: Into<Expression<'a>>,
    {
        Compare::Like(Box::new(self.compared()), Box::new(pattern.into()))
    }

    /// Tests if the left side is `NULL`.
    #[allow(clippy::wrong_self_convention)]
    fn is_null(self) -> Compare<'a> {
        Compare::Null(Box::new(self.compared()))
    }

    /// Tests if the left side is not `NULL`.
    #[allow(clippy::wrong_self_convention)]
    fn is_not_null(self) -> Compare<'a> {
        Compare::NotNull(Box::new(self.compared()))
    }
}

impl<'a> Comparable<'a> for Expression<'a> {
    fn compared(self) -> Expression<'a> {
        self
    }
}

impl<'a, U> Comparable<'a> for U
where
    U: Into<Column<'a>>,
{
    fn compared(self) -> Expression<'a> {
        let column: Column<'a> = self.into();
        column.into()
    }
}
