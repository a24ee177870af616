//! An abstract syntax tree for SQL queries.
//!
//! The ast module handles everything related building abstract SQL queries
//! without going into database-level specifics. Set operations are plain
//! nodes in this tree; whether their operands are parenthesized is decided by
//! whoever builds the node, not by the renderer.
mod column;
mod compare;
mod conditions;
mod conjunctive;
mod expression;
mod fragment;
mod join;
mod ordering;
mod query;
mod row;
mod select;
mod set_operation;
mod table;

pub use column::Column;
pub use compare::{Comparable, Compare};
pub use conditions::ConditionTree;
pub use conjunctive::Conjunctive;
pub use expression::*;
pub use fragment::{fragment, SqlFragment};
pub use join::{Join, JoinData, Joinable};
pub use ordering::{IntoOrderDefinition, Order, OrderDefinition, Orderable, Ordering};
pub use query::Query;
pub use row::Row;
pub use select::Select;
pub use serde_json::{Map, Value};
pub use set_operation::{SetOperand, SetOperation, SetOperator};
pub use table::*;
