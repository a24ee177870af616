use crate::ast::{Select, SetOperation};

/// A database query
#[derive(Debug, Clone, PartialEq)]
pub enum Query<'a> {
    Select(Box<Select<'a>>),
    SetOperation(Box<SetOperation<'a>>),
}

impl<'a> Query<'a> {
    pub fn is_select(&self) -> bool {
        matches!(self, Query::Select(_))
    }

    pub fn is_set_operation(&self) -> bool {
        matches!(self, Query::SetOperation(_))
    }
}
