use super::{
    Column, ConditionTree, Expression, ExpressionKind, IntoOrderDefinition, Join, JoinData,
    Ordering, Query, Table,
};

/// A builder for a `SELECT` statement.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct Select<'a> {
    pub(crate) distinct: bool,
    pub(crate) tables: Vec<Table<'a>>,
    pub(crate) columns: Vec<Expression<'a>>,
    pub(crate) conditions: Option<ConditionTree<'a>>,
    pub(crate) ordering: Ordering<'a>,
    pub(crate) limit: Option<u32>,
    pub(crate) offset: Option<u32>,
    pub(crate) joins: Vec<Join<'a>>,
}

impl<'a> From<Select<'a>> for Expression<'a> {
    fn from(sel: Select<'a>) -> Expression<'a> {
        Expression {
            kind: ExpressionKind::Selection(Box::new(sel)),
            alias: None,
        }
    }
}

impl<'a> From<Select<'a>> for Query<'a> {
    fn from(sel: Select<'a>) -> Query<'a> {
        Query::Select(Box::new(sel))
    }
}

impl<'a> Select<'a> {
    /// Creates a new `SELECT` statement for the given table.
    ///
    /// ```rust
    /// # use relation_union::{ast::*, renderer::{self, Renderer}};
    /// # fn main() {
    /// let query = Select::from_table("users");
    /// let (sql, _) = renderer::Postgres::build(query);
    ///
    /// assert_eq!(r#"SELECT "users".* FROM "users""#, sql);
    /// # }
    /// ```
    ///
    /// Selecting from a nested `SELECT`.
    ///
    /// ```rust
    /// # use relation_union::{ast::*, renderer::{self, Renderer}};
    /// # fn main() {
    /// let select = Table::from(Select::default().value(1)).alias("num");
    /// let query = Select::from_table(select);
    /// let (sql, params) = renderer::Postgres::build(query);
    ///
    /// assert_eq!(r#"SELECT "num".* FROM (SELECT $1) AS "num""#, sql);
    /// assert_eq!(vec![Value::from(1)], params);
    /// # }
    /// ```
    pub fn from_table<T>(table: T) -> Self
    where
        T: Into<Table<'a>>,
    {
        Select {
            tables: vec![table.into()],
            ..Select::default()
        }
    }

    /// Adds a table to be selected.
    pub fn and_from<T>(mut self, table: T) -> Self
    where
        T: Into<Table<'a>>,
    {
        self.tables.push(table.into());
        self
    }

    /// Replaces every table of the `FROM` clause with the given one.
    pub fn replace_from<T>(mut self, table: T) -> Self
    where
        T: Into<Table<'a>>,
    {
        self.tables = vec![table.into()];
        self
    }

    /// Selects a static value as the column.
    pub fn value<T>(mut self, value: T) -> Self
    where
        T: Into<Expression<'a>>,
    {
        self.columns.push(value.into());
        self
    }

    /// Adds a column to be selected.
    ///
    /// ```rust
    /// # use relation_union::{ast::*, renderer::{Renderer, self}};
    /// # fn main() {
    /// let query = Select::from_table("users")
    ///     .column("name")
    ///     .column(("users", "id"));
    ///
    /// let (sql, _) = renderer::Mysql::build(query);
    ///
    /// assert_eq!("SELECT `name`, `users`.`id` FROM `users`", sql);
    /// # }
    /// ```
    pub fn column<T>(mut self, column: T) -> Self
    where
        T: Into<Column<'a>>,
    {
        self.columns.push(column.into().into());
        self
    }

    /// A bulk method to select multiple values, replacing the previous ones.
    pub fn columns<T, C>(mut self, columns: T) -> Self
    where
        T: IntoIterator<Item = C>,
        C: Into<Column<'a>>,
    {
        self.columns = columns.into_iter().map(|c| c.into().into()).collect();
        self
    }

    /// Adds `DISTINCT` to the select query.
    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    /// Adds `WHERE` conditions to the query, replacing the previous conditions.
    ///
    /// ```rust
    /// # use relation_union::{ast::*, renderer::{Renderer, self}};
    /// # fn main() {
    /// let query = Select::from_table("users").so_that("foo".equals("bar"));
    /// let (sql, params) = renderer::Postgres::build(query);
    ///
    /// assert_eq!(r#"SELECT "users".* FROM "users" WHERE "foo" = $1"#, sql);
    /// assert_eq!(vec![Value::from("bar")], params);
    /// # }
    /// ```
    pub fn so_that<T>(mut self, conditions: T) -> Self
    where
        T: Into<ConditionTree<'a>>,
    {
        self.conditions = Some(conditions.into());
        self
    }

    /// Adds an additional `WHERE` condition to the query combining the possible
    /// previous condition with `AND`.
    ///
    /// ```rust
    /// # use relation_union::{ast::*, renderer::{Renderer, self}};
    /// # fn main() {
    /// let query = Select::from_table("users")
    ///     .so_that("foo".equals("bar"))
    ///     .and_where("lol".equals("wtf"));
    ///
    /// let (sql, params) = renderer::Sqlite::build(query);
    ///
    /// assert_eq!(r#"SELECT "users".* FROM "users" WHERE ("foo" = ? AND "lol" = ?)"#, sql);
    /// assert_eq!(vec![Value::from("bar"), Value::from("wtf")], params);
    /// # }
    /// ```
    pub fn and_where<T>(mut self, conditions: T) -> Self
    where
        T: Into<ConditionTree<'a>>,
    {
        match self.conditions {
            Some(previous) => {
                self.conditions = Some(previous.and(conditions.into()));
                self
            }
            None => self.so_that(conditions),
        }
    }

    /// Adds an additional `WHERE` condition to the query combining the possible
    /// previous condition with `OR`.
    pub fn or_where<T>(mut self, conditions: T) -> Self
    where
        T: Into<ConditionTree<'a>>,
    {
        match self.conditions {
            Some(previous) => {
                self.conditions = Some(previous.or(conditions.into()));
                self
            }
            None => self.so_that(conditions),
        }
    }

    /// Adds `INNER JOIN` clause to the query.
    ///
    /// ```rust
    /// # use relation_union::{ast::*, renderer::{Renderer, self}};
    /// # fn main() {
    /// let join = Table::from("posts")
    ///     .alias("p")
    ///     .on(("p", "user_id").equals(Column::from(("users", "id"))));
    ///
    /// let query = Select::from_table("users").inner_join(join);
    /// let (sql, _) = renderer::Postgres::build(query);
    ///
    /// assert_eq!(
    ///     r#"SELECT "users".* FROM "users" INNER JOIN "posts" AS "p" ON "p"."user_id" = "users"."id""#,
    ///     sql
    /// );
    /// # }
    /// ```
    pub fn inner_join<J>(mut self, join: J) -> Self
    where
        J: Into<JoinData<'a>>,
    {
        self.joins.push(Join::Inner(join.into()));
        self
    }

    /// Adds `LEFT JOIN` clause to the query.
    pub fn left_join<J>(mut self, join: J) -> Self
    where
        J: Into<JoinData<'a>>,
    {
        self.joins.push(Join::Left(join.into()));
        self
    }

    /// Adds an ordering to the `ORDER BY` section.
    ///
    /// ```rust
    /// # use relation_union::{ast::*, renderer::{Renderer, self}};
    /// # fn main() {
    /// let query = Select::from_table("users")
    ///     .order_by("foo")
    ///     .order_by("baz".ascend())
    ///     .order_by("bar".descend());
    ///
    /// let (sql, _) = renderer::Postgres::build(query);
    ///
    /// assert_eq!(r#"SELECT "users".* FROM "users" ORDER BY "foo", "baz" ASC, "bar" DESC"#, sql);
    /// # }
    /// ```
    pub fn order_by<T>(mut self, value: T) -> Self
    where
        T: IntoOrderDefinition<'a>,
    {
        self.ordering = self.ordering.append(value.into_order_definition());
        self
    }

    /// Removes every `ORDER BY` definition.
    pub fn clear_ordering(mut self) -> Self {
        self.ordering = Ordering::default();
        self
    }

    /// Sets the `LIMIT` value.
    ///
    /// ```rust
    /// # use relation_union::{ast::*, renderer::{Renderer, self}};
    /// # fn main() {
    /// let query = Select::from_table("users").limit(10);
    /// let (sql, params) = renderer::Postgres::build(query);
    ///
    /// assert_eq!(r#"SELECT "users".* FROM "users" LIMIT $1"#, sql);
    /// assert_eq!(vec![Value::from(10_i64)], params);
    /// # }
    /// ```
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Sets the `OFFSET` value.
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn tables(&self) -> &[Table<'a>] {
        &self.tables
    }

    pub fn conditions(&self) -> Option<&ConditionTree<'a>> {
        self.conditions.as_ref()
    }

    /// True if the statement carries an `ORDER BY`.
    pub fn is_ordered(&self) -> bool {
        !self.ordering.is_empty()
    }

    /// True if the statement carries a `LIMIT` or an `OFFSET`.
    pub fn is_limited(&self) -> bool {
        self.limit.is_some() || self.offset.is_some()
    }
}
