use std::borrow::Cow;

use crate::{
    ast::{Column, ConditionTree, Select},
    relation::Relation,
    Dialect,
};

/// A table together with the dialect it is queried with and an optional
/// default scope.
///
/// ```rust
/// # use relation_union::{ast::*, relation::Model, Dialect};
/// # fn main() {
/// let published = Model::new("posts", Dialect::Sqlite)
///     .default_scope(("posts", "published").equals(true));
///
/// assert_eq!(
///     r#"SELECT "posts".* FROM "posts" WHERE "posts"."published" = 1"#,
///     published.all().to_sql()
/// );
/// assert_eq!(r#"SELECT "posts".* FROM "posts""#, published.unscoped().to_sql());
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Model<'a> {
    table: Cow<'a, str>,
    dialect: Dialect,
    default_scope: Option<ConditionTree<'a>>,
}

impl<'a> Model<'a> {
    pub fn new<T>(table: T, dialect: Dialect) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        Self {
            table: table.into(),
            dialect,
            default_scope: None,
        }
    }

    /// A condition added to every relation started with [`Model::all`] or
    /// [`Model::filter`].
    pub fn default_scope<C>(mut self, conditions: C) -> Self
    where
        C: Into<ConditionTree<'a>>,
    {
        self.default_scope = Some(conditions.into());
        self
    }

    pub fn table_name(&self) -> &str {
        &self.table
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// A column qualified with the table name.
    pub fn column<C>(&self, name: C) -> Column<'a>
    where
        C: Into<Cow<'a, str>>,
    {
        Column::new(name).table(self.table.clone())
    }

    /// Every row of the table, default scope applied.
    pub fn all(&self) -> Relation<'a> {
        self.unscoped().scoped(self.default_scope.clone())
    }

    /// Every row of the table, ignoring the default scope.
    pub fn unscoped(&self) -> Relation<'a> {
        Relation::new(self.clone(), Select::from_table(self.table.clone()))
    }

    pub fn filter<C>(&self, conditions: C) -> Relation<'a>
    where
        C: Into<ConditionTree<'a>>,
    {
        self.all().filter(conditions)
    }
}
