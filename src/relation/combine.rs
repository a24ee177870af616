use crate::{
    ast::{Aliasable, Compare, ConditionTree, SetOperation, SetOperator, SqlFragment, Table},
    relation::{LoadDirective, Model, Relation},
    Error, Result,
};

/// The right-hand side of a combination: another relation, or conditions
/// that start a new relation on the left-hand side's model.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand<'a> {
    Relation(Relation<'a>),
    Conditions(ConditionTree<'a>),
}

impl<'a> Operand<'a> {
    fn into_relation(self, model: &Model<'a>) -> Relation<'a> {
        match self {
            Operand::Relation(relation) => relation,
            Operand::Conditions(conditions) => model.filter(conditions),
        }
    }
}

impl<'a> From<Relation<'a>> for Operand<'a> {
    fn from(relation: Relation<'a>) -> Self {
        Operand::Relation(relation)
    }
}

impl<'a> From<ConditionTree<'a>> for Operand<'a> {
    fn from(conditions: ConditionTree<'a>) -> Self {
        Operand::Conditions(conditions)
    }
}

impl<'a> From<Compare<'a>> for Operand<'a> {
    fn from(compare: Compare<'a>) -> Self {
        Operand::Conditions(compare.into())
    }
}

impl<'a> From<SqlFragment<'a>> for Operand<'a> {
    fn from(fragment: SqlFragment<'a>) -> Self {
        Operand::Conditions(fragment.into())
    }
}

impl<'a> Relation<'a> {
    /// Rows of either relation, duplicates removed.
    ///
    /// The result selects from the combined statement aliased to this
    /// relation's table, so anything chained onto it applies to the whole
    /// union.
    ///
    /// ```rust
    /// # use relation_union::{ast::*, relation::Model, Dialect};
    /// # fn main() -> Result<(), relation_union::Error> {
    /// let posts = Model::new("posts", Dialect::Sqlite);
    ///
    /// let union = posts
    ///     .filter(posts.column("user_id").equals(1))
    ///     .union(fragment("created_at > ?", vec![Value::from("2014-07-19 00:00:00")])?)?;
    ///
    /// assert_eq!(
    ///     r#"SELECT "posts".* FROM (SELECT "posts".* FROM "posts" WHERE "posts"."user_id" = 1 UNION SELECT "posts".* FROM "posts" WHERE (created_at > '2014-07-19 00:00:00')) AS "posts""#,
    ///     union.to_sql()
    /// );
    /// assert_eq!(
    ///     vec![Value::from(1), Value::from("2014-07-19 00:00:00")],
    ///     union.bind_values()
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub fn union<O>(self, other: O) -> Result<Self>
    where
        O: Into<Operand<'a>>,
    {
        self.combine(SetOperator::Union, [other])
    }

    /// Rows of either relation, duplicates kept.
    pub fn union_all<O>(self, other: O) -> Result<Self>
    where
        O: Into<Operand<'a>>,
    {
        self.combine(SetOperator::UnionAll, [other])
    }

    /// Rows present in both relations.
    ///
    /// ```rust
    /// # use relation_union::{ast::*, relation::Model, Dialect};
    /// # fn main() -> Result<(), relation_union::Error> {
    /// let users = Model::new("users", Dialect::Postgres);
    ///
    /// let intersect = users
    ///     .filter(users.column("id").in_selection(Row::from(vec![1, 2])))
    ///     .intersect(users.column("id").in_selection(Row::from(vec![2, 3])))?;
    ///
    /// assert_eq!(
    ///     r#"SELECT "users".* FROM ((SELECT "users".* FROM "users" WHERE "users"."id" IN ($1,$2)) INTERSECT (SELECT "users".* FROM "users" WHERE "users"."id" IN ($3,$4))) AS "users""#,
    ///     intersect.build().0
    /// );
    /// # Ok(())
    /// # }
    /// ```
    pub fn intersect<O>(self, other: O) -> Result<Self>
    where
        O: Into<Operand<'a>>,
    {
        self.combine(SetOperator::Intersect, [other])
    }

    /// Combines this relation with every relation of `others`, left to right:
    /// `((self op a) op b) op c`.
    ///
    /// Operands are parenthesized when the dialect of this relation allows
    /// it, which lets each of them carry its own `ORDER BY` and `LIMIT`.
    /// SQLite does not, and rejects such operands.
    pub fn combine<I, O>(self, operator: SetOperator, others: I) -> Result<Self>
    where
        I: IntoIterator<Item = O>,
        O: Into<Operand<'a>>,
    {
        let model = self.model.clone();
        let dialect = model.dialect();

        let mut relations = vec![self];
        relations.extend(
            others
                .into_iter()
                .map(|other| other.into().into_relation(&model)),
        );

        if relations.len() < 2 {
            return Err(Error::MissingOperand { operator });
        }

        verify_combinable(operator, &relations)?;

        let grouped = dialect.groups_set_operands();

        for relation in &relations[1..] {
            if relation.dialect() != dialect {
                tracing::warn!(
                    %operator,
                    %dialect,
                    other = %relation.dialect(),
                    "combining relations of different dialects, rendering with {dialect}"
                );
            }
        }

        if !grouped
            && relations.iter().any(|relation| {
                let select = relation.as_select();
                select.is_ordered() || select.is_limited()
            })
        {
            tracing::warn!(
                %operator,
                %dialect,
                "operand with ORDER BY or LIMIT cannot be parenthesized, the database will reject the statement"
            );
        }

        let operation = SetOperation::reduce(
            operator,
            relations.into_iter().map(Relation::into_select),
            grouped,
        )?;

        tracing::debug!(
            %operator,
            %dialect,
            operands = operation.operand_count(),
            grouped,
            table = model.table_name(),
            "combined relations"
        );

        let alias = model.table_name().to_owned();
        let source = Table::from(operation).alias(alias);

        Ok(model.unscoped().from_source(source))
    }
}

/// Every relation is checked for one directive before any is checked for
/// the next, so the error names the first directive in that order.
fn verify_combinable(operator: SetOperator, relations: &[Relation<'_>]) -> Result<()> {
    for directive in LoadDirective::ALL {
        if relations
            .iter()
            .any(|relation| relation.has_directive(directive))
        {
            return Err(Error::IncompatibleRelation {
                operator,
                directive,
            });
        }
    }

    Ok(())
}
