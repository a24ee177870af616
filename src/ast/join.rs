use crate::ast::{ConditionTree, Expression, Table};

/// A joined table and the `ON` condition its rows are matched with.
#[derive(Debug, PartialEq, Clone)]
pub struct JoinData<'a> {
    pub(crate) table: Table<'a>,
    pub(crate) conditions: ConditionTree<'a>,
}

impl<'a> JoinData<'a> {
    pub fn table(&self) -> &Table<'a> {
        &self.table
    }

    pub fn conditions(&self) -> &ConditionTree<'a> {
        &self.conditions
    }

    /// Narrows the `ON` condition with another one, combined using `AND`.
    pub fn and_on<E>(mut self, conditions: E) -> Self
    where
        E: Into<Expression<'a>>,
    {
        self.conditions = self.conditions.and(conditions);
        self
    }
}

/// The kinds of `JOIN` a relation can add.
#[derive(Debug, PartialEq, Clone)]
pub enum Join<'a> {
    Inner(JoinData<'a>),
    Left(JoinData<'a>),
}

impl<'a> Join<'a> {
    pub(crate) fn keyword(&self) -> &'static str {
        match self {
            Join::Inner(_) => "INNER JOIN",
            Join::Left(_) => "LEFT JOIN",
        }
    }

    pub(crate) fn into_data(self) -> JoinData<'a> {
        match self {
            Join::Inner(data) | Join::Left(data) => data,
        }
    }
}

/// A table that can be joined once given its `ON` condition.
pub trait Joinable<'a> {
    fn on<T>(self, conditions: T) -> JoinData<'a>
    where
        T: Into<ConditionTree<'a>>;
}

impl<'a, U> Joinable<'a> for U
where
    U: Into<Table<'a>>,
{
    fn on<T>(self, conditions: T) -> JoinData<'a>
    where
        T: Into<ConditionTree<'a>>,
    {
        JoinData {
            table: self.into(),
            conditions: conditions.into(),
        }
    }
}

#[cfg(all(test, feature = "sqlite"))]
mod tests {
    use crate::{ast::*, relation::Model, Dialect};
    use pretty_assertions::assert_eq;

    #[test]
    fn and_on_narrows_the_join() {
        let users = Model::new("users", Dialect::Sqlite);

        let drafts = Table::from("posts")
            .alias("drafts")
            .on(("drafts", "user_id").equals(Column::from(("users", "id"))))
            .and_on(("drafts", "draft").equals(true));

        let relation = users.all().left_join(drafts);

        assert_eq!(
            r#"SELECT "users".* FROM "users" LEFT JOIN "posts" AS "drafts" ON ("drafts"."user_id" = "users"."id" AND "drafts"."draft" = 1)"#,
            relation.to_sql()
        );
        assert_eq!(vec![Value::from(true)], relation.bind_values());
    }
}
