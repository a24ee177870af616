//! Set-operation combinators for lazy SQL relations.
//!
//! A [`Relation`](relation::Relation) is a not-yet-executed `SELECT` bound to
//! a [`Model`](relation::Model). Two relations can be combined with `UNION`,
//! `UNION ALL` or `INTERSECT`; the result is a new relation selecting from the
//! combined statement, aliased back to the model's table, so it can be
//! filtered, ordered and combined again.
//!
//! ```rust
//! # use relation_union::{ast::*, relation::Model, Dialect};
//! # fn main() -> Result<(), relation_union::Error> {
//! let posts = Model::new("posts", Dialect::Postgres);
//!
//! let union = posts
//!     .filter(posts.column("user_id").equals(1))
//!     .union(posts.filter(posts.column("user_id").equals(2)))?;
//!
//! let (sql, params) = union.build();
//!
//! assert_eq!(
//!     r#"SELECT "posts".* FROM ((SELECT "posts".* FROM "posts" WHERE "posts"."user_id" = $1) UNION (SELECT "posts".* FROM "posts" WHERE "posts"."user_id" = $2)) AS "posts""#,
//!     sql
//! );
//! assert_eq!(vec![Value::from(1), Value::from(2)], params);
//! # Ok(())
//! # }
//! ```
//!
//! The `ast` module holds the query representation, `renderer` turns it into
//! SQL for a concrete database, and `dialect` picks the renderer at runtime.
pub mod ast;
pub mod dialect;
pub mod relation;
pub mod renderer;

mod error;

pub use dialect::Dialect;
pub use error::{Error, Result};
