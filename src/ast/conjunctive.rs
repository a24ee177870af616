use crate::ast::{ConditionTree, Expression};

/// `AND`, `OR` and `NOT` for anything that can be turned into an expression,
/// most commonly a [`Compare`](crate::ast::Compare).
///
/// ```rust
/// # use relation_union::{ast::*, renderer::{self, Renderer}};
/// # fn main() {
/// let conditions = ("posts", "draft").equals(true).and(("posts", "user_id").equals(1));
/// let query = Select::from_table("posts").so_that(conditions);
/// let (sql, params) = renderer::Postgres::build(query);
///
/// assert_eq!(
///     r#"SELECT "posts".* FROM "posts" WHERE ("posts"."draft" = $1 AND "posts"."user_id" = $2)"#,
///     sql
/// );
/// assert_eq!(vec![Value::from(true), Value::from(1)], params);
/// # }
/// ```
pub trait Conjunctive<'a> {
    /// Builds an `AND` condition having `self` as the left leaf and `other` as the right.
    fn and<E>(self, other: E) -> ConditionTree<'a>
    where
        E: Into<Expression<'a>>;

    /// Builds an `OR` condition having `self` as the left leaf and `other` as the right.
    fn or<E>(self, other: E) -> ConditionTree<'a>
    where
        E: Into<Expression<'a>>;

    /// Builds a `NOT` condition having `self` as the condition.
    fn not(self) -> ConditionTree<'a>;
}

impl<'a, T> Conjunctive<'a> for T
where
    T: Into<Expression<'a>>,
{
    fn and<E>(self, other: E) -> ConditionTree<'a>
    where
        E: Into<Expression<'a>>,
    {
        ConditionTree::And(vec![self.into(), other.into()])
    }

    fn or<E>(self, other: E) -> ConditionTree<'a>
    where
        E: Into<Expression<'a>>,
    {
        ConditionTree::Or(vec![self.into(), other.into()])
    }

    fn not(self) -> ConditionTree<'a> {
        ConditionTree::not(self.into())
    }
}
