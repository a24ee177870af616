//! Runtime choice of the database a relation renders for.
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    ast::{Query, Value},
    Error, Result,
};

#[cfg(feature = "mysql")]
use crate::renderer::Mysql;
#[cfg(feature = "postgresql")]
use crate::renderer::Postgres;
#[cfg(feature = "sqlite")]
use crate::renderer::Sqlite;
#[cfg(any(feature = "postgresql", feature = "mysql", feature = "sqlite"))]
use crate::renderer::Renderer;

/// The database adapter a relation is built for.
///
/// Parses from the usual adapter names, so it can come straight from a
/// configuration file or a connection url:
///
/// ```rust
/// # use relation_union::Dialect;
/// # fn main() -> Result<(), relation_union::Error> {
/// assert_eq!(Dialect::Postgres, "PostgreSQL".parse()?);
/// assert_eq!(Dialect::Sqlite, Dialect::from_url("sqlite::memory:")?);
/// assert_eq!(Dialect::Mysql, Dialect::from_url("mysql://root@localhost/blog")?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    #[cfg(feature = "postgresql")]
    #[serde(alias = "postgresql")]
    Postgres,
    #[cfg(feature = "mysql")]
    #[serde(alias = "mysql2")]
    Mysql,
    #[cfg(feature = "sqlite")]
    #[serde(alias = "sqlite3")]
    Sqlite,
}

impl Dialect {
    /// Whether the operands of a set operation may be wrapped in
    /// parentheses. SQLite rejects `(SELECT ...) UNION (SELECT ...)`.
    pub fn groups_set_operands(self) -> bool {
        match self {
            #[cfg(feature = "postgresql")]
            Dialect::Postgres => true,
            #[cfg(feature = "mysql")]
            Dialect::Mysql => true,
            #[cfg(feature = "sqlite")]
            Dialect::Sqlite => false,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            #[cfg(feature = "postgresql")]
            Dialect::Postgres => "postgres",
            #[cfg(feature = "mysql")]
            Dialect::Mysql => "mysql",
            #[cfg(feature = "sqlite")]
            Dialect::Sqlite => "sqlite",
        }
    }

    /// Renders the query with this dialect's renderer, returning the SQL and
    /// the values bound to its placeholders.
    pub fn build<'a, Q>(self, query: Q) -> (String, Vec<Value>)
    where
        Q: Into<Query<'a>>,
    {
        tracing::trace!(dialect = self.name(), "rendering query");

        match self {
            #[cfg(feature = "postgresql")]
            Dialect::Postgres => Postgres::build(query),
            #[cfg(feature = "mysql")]
            Dialect::Mysql => Mysql::build(query),
            #[cfg(feature = "sqlite")]
            Dialect::Sqlite => Sqlite::build(query),
        }
    }

    /// Renders the query with every value written as a literal.
    pub fn build_inlined<'a, Q>(self, query: Q) -> String
    where
        Q: Into<Query<'a>>,
    {
        match self {
            #[cfg(feature = "postgresql")]
            Dialect::Postgres => Postgres::build_inlined(query),
            #[cfg(feature = "mysql")]
            Dialect::Mysql => Mysql::build_inlined(query),
            #[cfg(feature = "sqlite")]
            Dialect::Sqlite => Sqlite::build_inlined(query),
        }
    }

    /// The dialect matching the scheme of a connection url.
    pub fn from_url(url: &str) -> Result<Self> {
        let url = Url::parse(url)?;
        url.scheme().parse()
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            #[cfg(feature = "postgresql")]
            "postgres" | "postgresql" => Ok(Dialect::Postgres),
            #[cfg(feature = "mysql")]
            "mysql" | "mysql2" => Ok(Dialect::Mysql),
            #[cfg(feature = "sqlite")]
            "sqlite" | "sqlite3" => Ok(Dialect::Sqlite),
            _ => Err(Error::UnknownDialect(s.to_string())),
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
