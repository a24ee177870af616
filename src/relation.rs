//! Lazy, chainable queries bound to a model, and the set-operation
//! combinators over them.
mod combine;
mod model;

pub use combine::Operand;
pub use model::Model;

use std::{borrow::Cow, fmt};

use crate::{
    ast::{
        ConditionTree, Column, Expression, IntoOrderDefinition, JoinData, Query, Select, Table,
        Value,
    },
    Dialect,
};

/// How an association is to be loaded together with the rows of a relation.
///
/// Rows of a combined relation come out of a derived table, which none of
/// these can be applied to, so a relation carrying one cannot be combined.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoadDirective {
    Includes,
    Preload,
    EagerLoad,
}

impl LoadDirective {
    /// In the order relations are checked for them before a combination.
    pub(crate) const ALL: [LoadDirective; 3] = [
        LoadDirective::Includes,
        LoadDirective::Preload,
        LoadDirective::EagerLoad,
    ];
}

impl fmt::Display for LoadDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadDirective::Includes => f.write_str("includes"),
            LoadDirective::Preload => f.write_str("preload"),
            LoadDirective::EagerLoad => f.write_str("eager load"),
        }
    }
}

/// A `SELECT` over a model that has not been run yet.
///
/// Every method consumes the relation and returns a new one. Relations are
/// started from a [`Model`] and rendered with the model's dialect.
///
/// ```rust
/// # use relation_union::{ast::*, relation::Model, Dialect};
/// # fn main() {
/// let posts = Model::new("posts", Dialect::Mysql);
///
/// let relation = posts
///     .filter(posts.column("user_id").equals(1))
///     .exclude(posts.column("draft").equals(true))
///     .order_by(posts.column("created_at").descend())
///     .limit(10);
///
/// let (sql, params) = relation.build();
///
/// assert_eq!(
///     "SELECT `posts`.* FROM `posts` WHERE (`posts`.`user_id` = ? AND (NOT `posts`.`draft` = ?)) ORDER BY `posts`.`created_at` DESC LIMIT ?",
///     sql
/// );
/// assert_eq!(vec![Value::from(1), Value::from(true), Value::from(10)], params);
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Relation<'a> {
    model: Model<'a>,
    select: Select<'a>,
    scope: Option<ConditionTree<'a>>,
    directives: Vec<(LoadDirective, Cow<'a, str>)>,
}

impl<'a> Relation<'a> {
    pub(crate) fn new(model: Model<'a>, select: Select<'a>) -> Self {
        Self {
            model,
            select,
            scope: None,
            directives: Vec::new(),
        }
    }

    /// Conditions kept out of the relation's own `WHERE`, and put in front of
    /// it with `AND` when the relation is built.
    pub(crate) fn scoped(mut self, scope: Option<ConditionTree<'a>>) -> Self {
        self.scope = scope;
        self
    }

    fn map_select<F>(mut self, f: F) -> Self
    where
        F: FnOnce(Select<'a>) -> Select<'a>,
    {
        self.select = f(std::mem::take(&mut self.select));
        self
    }

    /// Adds a `WHERE` condition, combined with the previous ones using `AND`.
    pub fn filter<C>(self, conditions: C) -> Self
    where
        C: Into<ConditionTree<'a>>,
    {
        self.map_select(|select| select.and_where(conditions))
    }

    /// Adds a `WHERE` condition, combined with the previous ones using `OR`.
    pub fn or_filter<C>(self, conditions: C) -> Self
    where
        C: Into<ConditionTree<'a>>,
    {
        self.map_select(|select| select.or_where(conditions))
    }

    /// Adds a negated `WHERE` condition, combined with the previous ones using
    /// `AND`.
    pub fn exclude<E>(self, conditions: E) -> Self
    where
        E: Into<Expression<'a>>,
    {
        self.map_select(|select| select.and_where(ConditionTree::not(conditions)))
    }

    /// Selects the given columns instead of every column of the table.
    pub fn select<T, C>(self, columns: T) -> Self
    where
        T: IntoIterator<Item = C>,
        C: Into<Column<'a>>,
    {
        self.map_select(|select| select.columns(columns))
    }

    pub fn inner_join<J>(self, join: J) -> Self
    where
        J: Into<JoinData<'a>>,
    {
        self.map_select(|select| select.inner_join(join))
    }

    pub fn left_join<J>(self, join: J) -> Self
    where
        J: Into<JoinData<'a>>,
    {
        self.map_select(|select| select.left_join(join))
    }

    pub fn order_by<T>(self, value: T) -> Self
    where
        T: IntoOrderDefinition<'a>,
    {
        self.map_select(|select| select.order_by(value))
    }

    /// Replaces the whole `ORDER BY` with the given ordering.
    pub fn reorder<T>(self, value: T) -> Self
    where
        T: IntoOrderDefinition<'a>,
    {
        self.map_select(|select| select.clear_ordering().order_by(value))
    }

    /// Drops the `ORDER BY`.
    pub fn unordered(self) -> Self {
        self.map_select(Select::clear_ordering)
    }

    pub fn limit(self, limit: u32) -> Self {
        self.map_select(|select| select.limit(limit))
    }

    pub fn offset(self, offset: u32) -> Self {
        self.map_select(|select| select.offset(offset))
    }

    /// Replaces the `FROM` clause, e.g. with a derived table.
    pub fn from_source<T>(self, table: T) -> Self
    where
        T: Into<Table<'a>>,
    {
        self.map_select(|select| select.replace_from(table))
    }

    /// Marks an association to be loaded in a separate query or a join,
    /// whichever the caller decides on.
    pub fn includes<A>(self, association: A) -> Self
    where
        A: Into<Cow<'a, str>>,
    {
        self.load(LoadDirective::Includes, association)
    }

    /// Marks an association to be loaded in a separate query.
    pub fn preload<A>(self, association: A) -> Self
    where
        A: Into<Cow<'a, str>>,
    {
        self.load(LoadDirective::Preload, association)
    }

    /// Marks an association to be loaded with a `LEFT OUTER JOIN`.
    pub fn eager_load<A>(self, association: A) -> Self
    where
        A: Into<Cow<'a, str>>,
    {
        self.load(LoadDirective::EagerLoad, association)
    }

    fn load<A>(mut self, directive: LoadDirective, association: A) -> Self
    where
        A: Into<Cow<'a, str>>,
    {
        self.directives.push((directive, association.into()));
        self
    }

    pub fn model(&self) -> &Model<'a> {
        &self.model
    }

    pub fn dialect(&self) -> Dialect {
        self.model.dialect()
    }

    /// The associations marked for loading, with how they are to be loaded.
    pub fn load_directives(&self) -> &[(LoadDirective, Cow<'a, str>)] {
        &self.directives
    }

    pub fn has_directive(&self, directive: LoadDirective) -> bool {
        self.directives.iter().any(|(d, _)| *d == directive)
    }

    /// The relation's own query, without the model's default scope.
    pub fn as_select(&self) -> &Select<'a> {
        &self.select
    }

    /// The query to run, with the default scope in front of every other
    /// condition.
    pub fn into_select(self) -> Select<'a> {
        let Some(scope) = self.scope else {
            return self.select;
        };

        let mut select = self.select;

        let conditions = match (scope, select.conditions.take()) {
            (scope, None | Some(ConditionTree::NoCondition)) => scope,
            (ConditionTree::And(mut scoped), Some(ConditionTree::And(expressions))) => {
                scoped.extend(expressions);
                ConditionTree::And(scoped)
            }
            (scope, Some(ConditionTree::And(mut expressions))) => {
                expressions.insert(0, Expression::from(scope));
                ConditionTree::And(expressions)
            }
            (scope, Some(conditions)) => scope.and(conditions),
        };

        select.so_that(conditions)
    }

    pub fn into_query(self) -> Query<'a> {
        Query::from(self.into_select())
    }

    /// The SQL for the model's dialect and the values bound to its
    /// placeholders, in the order the placeholders appear.
    pub fn build(&self) -> (String, Vec<Value>) {
        self.dialect().build(self.clone().into_select())
    }

    pub fn bind_values(&self) -> Vec<Value> {
        self.build().1
    }

    /// The SQL with every bound value written as a literal.
    pub fn to_sql(&self) -> String {
        self.dialect().build_inlined(self.clone().into_select())
    }
}

impl<'a> From<Relation<'a>> for Expression<'a> {
    fn from(relation: Relation<'a>) -> Self {
        Expression::from(relation.into_select())
    }
}

impl<'a> From<Relation<'a>> for Query<'a> {
    fn from(relation: Relation<'a>) -> Self {
        relation.into_query()
    }
}

#[cfg(all(test, feature = "postgresql", feature = "sqlite"))]
mod tests {
    use super::*;
    use crate::ast::{Comparable, Orderable};
    use pretty_assertions::assert_eq;

    fn posts(dialect: Dialect) -> Model<'static> {
        Model::new("posts", dialect)
    }

    #[test]
    fn load_directives_are_recorded() {
        let relation = posts(Dialect::Postgres)
            .all()
            .includes("user")
            .eager_load("comments");

        assert!(relation.has_directive(LoadDirective::Includes));
        assert!(!relation.has_directive(LoadDirective::Preload));
        assert!(relation.has_directive(LoadDirective::EagerLoad));
        assert_eq!(
            &[
                (LoadDirective::Includes, Cow::from("user")),
                (LoadDirective::EagerLoad, Cow::from("comments"))
            ],
            relation.load_directives()
        );
    }

    #[test]
    fn directives_display_as_words() {
        assert_eq!("includes", LoadDirective::Includes.to_string());
        assert_eq!("preload", LoadDirective::Preload.to_string());
        assert_eq!("eager load", LoadDirective::EagerLoad.to_string());
    }

    #[test]
    fn reorder_replaces_the_ordering() {
        let model = posts(Dialect::Postgres);

        let relation = model
            .all()
            .order_by(model.column("created_at").ascend())
            .reorder(model.column("id").descend());

        assert_eq!(
            r#"SELECT "posts".* FROM "posts" ORDER BY "posts"."id" DESC"#,
            relation.build().0
        );
        assert!(!relation.unordered().as_select().is_ordered());
    }

    #[test]
    fn or_filter_and_select() {
        let model = posts(Dialect::Sqlite);

        let relation = model
            .filter(model.column("id").equals(2))
            .or_filter(model.column("id").equals(3))
            .select([model.column("id")]);

        assert_eq!(
            r#"SELECT "posts"."id" FROM "posts" WHERE ("posts"."id" = ? OR "posts"."id" = ?)"#,
            relation.build().0
        );
        assert_eq!(vec![Value::from(2), Value::from(3)], relation.bind_values());
    }

    #[test]
    fn relations_nest_as_selections() {
        let model = posts(Dialect::Postgres);
        let own = model.filter(model.column("user_id").equals(3)).select([model.column("id")]);

        let relation = model
            .filter(model.column("user_id").equals(1))
            .exclude(model.column("id").in_selection(own));

        let (sql, params) = relation.build();

        assert_eq!(
            r#"SELECT "posts".* FROM "posts" WHERE ("posts"."user_id" = $1 AND (NOT "posts"."id" IN (SELECT "posts"."id" FROM "posts" WHERE "posts"."user_id" = $2)))"#,
            sql
        );
        assert_eq!(vec![Value::from(1), Value::from(3)], params);
    }

    #[test]
    fn or_filter_stays_inside_the_default_scope() {
        let model = posts(Dialect::Sqlite).default_scope(("posts", "published").equals(true));

        let relation = model
            .filter(model.column("id").equals(1))
            .or_filter(model.column("id").equals(2));

        assert_eq!(
            r#"SELECT "posts".* FROM "posts" WHERE ("posts"."published" = 1 AND ("posts"."id" = 1 OR "posts"."id" = 2))"#,
            relation.to_sql()
        );
        assert_eq!(
            vec![Value::from(true), Value::from(1), Value::from(2)],
            relation.bind_values()
        );
    }

    #[test]
    fn default_scope_is_not_part_of_the_own_conditions() {
        let model = posts(Dialect::Postgres).default_scope(("posts", "published").equals(true));
        let relation = model
            .filter(model.column("user_id").equals(1))
            .filter(model.column("id").equals(2));

        assert_eq!(
            r#"SELECT "posts".* FROM "posts" WHERE ("posts"."user_id" = $1 AND "posts"."id" = $2)"#,
            Dialect::Postgres.build(relation.as_select().clone()).0
        );
        assert_eq!(
            r#"SELECT "posts".* FROM "posts" WHERE ("posts"."published" = $1 AND "posts"."user_id" = $2 AND "posts"."id" = $3)"#,
            relation.build().0
        );
    }
}
