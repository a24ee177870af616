use crate::{ast::SetOperator, relation::LoadDirective};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// One of the operands carries a directive that changes how rows are
    /// loaded, which cannot survive being wrapped in a derived table.
    #[error("Cannot {operator} relation with {directive}.")]
    IncompatibleRelation {
        operator: SetOperator,
        directive: LoadDirective,
    },

    #[error("{operator} needs at least one relation to combine with")]
    MissingOperand { operator: SetOperator },

    #[error("SQL fragment has {placeholders} placeholder(s) but {values} bound value(s)")]
    FragmentArity { placeholders: usize, values: usize },

    #[error("unknown database adapter `{0}`")]
    UnknownDialect(String),

    #[error("invalid connection url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}
