use crate::ast::Expression;

/// A collection of values surrounded by parentheses, e.g. the right side of
/// `"id" IN (1, 2, 3)`.
#[derive(Debug, Default, PartialEq, Clone)]
pub struct Row<'a> {
    pub(crate) values: Vec<Expression<'a>>,
}

impl<'a> Row<'a> {
    pub fn new() -> Self {
        Row { values: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Row {
            values: Vec::with_capacity(capacity),
        }
    }

    pub fn push<T>(&mut self, value: T)
    where
        T: Into<Expression<'a>>,
    {
        self.values.push(value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

impl<'a, T> From<Vec<T>> for Row<'a>
where
    T: Into<Expression<'a>>,
{
    fn from(vector: Vec<T>) -> Row<'a> {
        vector.into_iter().collect()
    }
}

impl<'a, T> FromIterator<T> for Row<'a>
where
    T: Into<Expression<'a>>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Row {
            values: iter.into_iter().map(Into::into).collect(),
        }
    }
}
