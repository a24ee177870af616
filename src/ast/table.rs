use super::{ExpressionKind, Join, JoinData};
use crate::ast::{Expression, Select, SetOperation};
use std::borrow::Cow;

/// An object that can be aliased.
pub trait Aliasable<'a> {
    type Target;

    /// Alias table for usage elsewhere in the query.
    fn alias<T>(self, alias: T) -> Self::Target
    where
        T: Into<Cow<'a, str>>;
}

#[derive(Clone, Debug, PartialEq)]
/// Either an identifier or a nested query.
pub enum TableType<'a> {
    Table(Cow<'a, str>),
    JoinedTable(Box<(Cow<'a, str>, Vec<Join<'a>>)>),
    Query(Box<Select<'a>>),
    /// A combined statement used as a derived table, e.g.
    /// `FROM (... UNION ...) AS "posts"`.
    SetOperation(Box<SetOperation<'a>>),
}

/// A table definition
#[derive(Clone, Debug)]
pub struct Table<'a> {
    pub typ: TableType<'a>,
    pub alias: Option<Cow<'a, str>>,
    pub database: Option<Cow<'a, str>>,
}

impl<'a> PartialEq for Table<'a> {
    fn eq(&self, other: &Table) -> bool {
        self.typ == other.typ && self.database == other.database
    }
}

impl<'a> Table<'a> {
    /// Define in which database the table is located
    pub fn database<T>(mut self, database: T) -> Self
    where
        T: Into<Cow<'a, str>>,
    {
        self.database = Some(database.into());
        self
    }

    /// A qualified asterisk to this table
    pub fn asterisk(self) -> Expression<'a> {
        Expression {
            kind: ExpressionKind::Asterisk(Some(Box::new(self))),
            alias: None,
        }
    }

    /// The name the table is referred to with elsewhere in the query: the
    /// alias if set, otherwise the table name. Nested queries without an
    /// alias have no name.
    pub fn reference_name(&self) -> Option<&str> {
        match (&self.alias, &self.typ) {
            (Some(alias), _) => Some(alias),
            (None, TableType::Table(name)) => Some(name),
            (None, TableType::JoinedTable(jt)) => Some(&jt.0),
            (None, _) => None,
        }
    }

    /// Adds a `LEFT JOIN` clause right after this table. Useful when
    /// selecting from several tables and the join belongs to one of them.
    ///
    /// # Panics
    ///
    /// If the table is a nested query or a set operation; only named tables
    /// take positional joins.
    pub fn left_join<J>(self, join: J) -> Self
    where
        J: Into<JoinData<'a>>,
    {
        self.join(Join::Left(join.into()))
    }

    /// Adds an `INNER JOIN` clause right after this table.
    ///
    /// # Panics
    ///
    /// If the table is a nested query or a set operation.
    pub fn inner_join<J>(self, join: J) -> Self
    where
        J: Into<JoinData<'a>>,
    {
        self.join(Join::Inner(join.into()))
    }

    fn join(mut self, join: Join<'a>) -> Self {
        match self.typ {
            TableType::Table(table_name) => {
                self.typ = TableType::JoinedTable(Box::new((table_name, vec![join])))
            }
            TableType::JoinedTable(ref mut jt) => jt.1.push(join),
            TableType::Query(_) | TableType::SetOperation(_) => {
                panic!("Positional joins are only supported on named tables")
            }
        }

        self
    }
}

impl<'a> From<&'a str> for Table<'a> {
    fn from(s: &'a str) -> Table<'a> {
        Table {
            typ: TableType::Table(s.into()),
            alias: None,
            database: None,
        }
    }
}

impl<'a> From<&'a String> for Table<'a> {
    fn from(s: &'a String) -> Table<'a> {
        Table::from(s.as_str())
    }
}

impl<'a> From<Cow<'a, str>> for Table<'a> {
    fn from(s: Cow<'a, str>) -> Table<'a> {
        Table {
            typ: TableType::Table(s),
            alias: None,
            database: None,
        }
    }
}

impl<'a> From<(&'a str, &'a str)> for Table<'a> {
    fn from(s: (&'a str, &'a str)) -> Table<'a> {
        let table: Table<'a> = s.1.into();
        table.database(s.0)
    }
}

impl<'a> From<String> for Table<'a> {
    fn from(s: String) -> Self {
        Table::from(Cow::Owned(s))
    }
}

impl<'a> From<Select<'a>> for Table<'a> {
    fn from(select: Select<'a>) -> Self {
        Table {
            typ: TableType::Query(Box::new(select)),
            alias: None,
            database: None,
        }
    }
}

impl<'a> From<SetOperation<'a>> for Table<'a> {
    fn from(operation: SetOperation<'a>) -> Self {
        Table {
            typ: TableType::SetOperation(Box::new(operation)),
            alias: None,
            database: None,
        }
    }
}

impl<'a> Aliasable<'a> for Table<'a> {
    type Target = Table<'a>;

    fn alias<T>(mut self, alias: T) -> Self::Target
    where
        T: Into<Cow<'a, str>>,
    {
        self.alias = Some(alias.into());
        self
    }
}

#[cfg(all(test, feature = "postgresql"))]
mod tests {
    use crate::{ast::*, renderer::*};
    use pretty_assertions::assert_eq;

    #[test]
    fn positional_join_stays_with_its_table() {
        let users = Table::from("users").left_join(
            Table::from("posts")
                .alias("p")
                .on(("p", "user_id").equals(Column::from(("users", "id")))),
        );

        let (sql, _) = Postgres::build(Select::from_table(users).and_from("tags"));

        assert_eq!(
            r#"SELECT "users".*, "tags".* FROM "users" LEFT JOIN "posts" AS "p" ON "p"."user_id" = "users"."id", "tags""#,
            sql
        );
    }

    #[test]
    fn derived_tables_are_named_by_their_alias() {
        let union = SetOperation::new(
            SetOperator::Union,
            Select::from_table("posts"),
            Select::from_table("drafts"),
        );

        assert_eq!(None, Table::from(union.clone()).reference_name());
        assert_eq!(
            Some("posts"),
            Table::from(union).alias("posts").reference_name()
        );
    }

    #[test]
    #[should_panic(expected = "Positional joins are only supported on named tables")]
    fn set_operations_take_no_positional_join() {
        let union = SetOperation::new(
            SetOperator::UnionAll,
            Select::from_table("posts"),
            Select::from_table("drafts"),
        );

        Table::from(union).inner_join(Table::from("users").on(("users", "id").equals(1)));
    }
}
