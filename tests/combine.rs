use pretty_assertions::assert_eq;
use relation_union::{
    ast::*,
    relation::{Model, Operand, Relation},
    Dialect, Error,
};

fn users(dialect: Dialect) -> Model<'static> {
    Model::new("users", dialect)
}

fn user(dialect: Dialect, id: i64) -> Relation<'static> {
    let users = users(dialect);
    users.filter(users.column("id").equals(id))
}

#[test]
fn folds_many_operands_to_the_left_with_parentheses() -> anyhow::Result<()> {
    let union = user(Dialect::Postgres, 1).combine(
        SetOperator::Union,
        [
            user(Dialect::Postgres, 2),
            user(Dialect::Postgres, 3),
            user(Dialect::Postgres, 4),
        ],
    )?;

    let (sql, params) = union.build();

    assert_eq!(
        r#"SELECT "users".* FROM ((((SELECT "users".* FROM "users" WHERE "users"."id" = $1) UNION (SELECT "users".* FROM "users" WHERE "users"."id" = $2)) UNION (SELECT "users".* FROM "users" WHERE "users"."id" = $3)) UNION (SELECT "users".* FROM "users" WHERE "users"."id" = $4)) AS "users""#,
        sql
    );
    assert_eq!(
        vec![
            Value::from(1),
            Value::from(2),
            Value::from(3),
            Value::from(4)
        ],
        params
    );

    Ok(())
}

#[test]
fn folds_many_operands_without_parentheses_on_sqlite() -> anyhow::Result<()> {
    let intersect = user(Dialect::Sqlite, 1).combine(
        SetOperator::Intersect,
        [user(Dialect::Sqlite, 2), user(Dialect::Sqlite, 3)],
    )?;

    assert_eq!(
        r#"SELECT "users".* FROM (SELECT "users".* FROM "users" WHERE "users"."id" = 1 INTERSECT SELECT "users".* FROM "users" WHERE "users"."id" = 2 INTERSECT SELECT "users".* FROM "users" WHERE "users"."id" = 3) AS "users""#,
        intersect.to_sql()
    );

    Ok(())
}

#[test]
fn chained_combinations_nest_the_same_way() -> anyhow::Result<()> {
    let chained = user(Dialect::Mysql, 1)
        .union_all(user(Dialect::Mysql, 2))?
        .union_all(user(Dialect::Mysql, 3))?;

    assert_eq!(
        "SELECT `users`.* FROM ((SELECT `users`.* FROM ((SELECT `users`.* FROM `users` WHERE `users`.`id` = ?) UNION ALL (SELECT `users`.* FROM `users` WHERE `users`.`id` = ?)) AS `users`) UNION ALL (SELECT `users`.* FROM `users` WHERE `users`.`id` = ?)) AS `users`",
        chained.build().0
    );
    assert_eq!(
        vec![Value::from(1), Value::from(2), Value::from(3)],
        chained.bind_values()
    );

    Ok(())
}

#[test]
fn mixes_relations_and_conditions() -> anyhow::Result<()> {
    let users = users(Dialect::Sqlite);

    let operands: Vec<Operand> = vec![
        user(Dialect::Sqlite, 2).into(),
        users.column("id").equals(3).into(),
        fragment("name LIKE ?", vec![Value::from("a%")])?.into(),
    ];

    let union = user(Dialect::Sqlite, 1).combine(SetOperator::Union, operands)?;

    assert_eq!(
        r#"SELECT "users".* FROM (SELECT "users".* FROM "users" WHERE "users"."id" = ? UNION SELECT "users".* FROM "users" WHERE "users"."id" = ? UNION SELECT "users".* FROM "users" WHERE "users"."id" = ? UNION SELECT "users".* FROM "users" WHERE (name LIKE ?)) AS "users""#,
        union.build().0
    );
    assert_eq!(
        vec![
            Value::from(1),
            Value::from(2),
            Value::from(3),
            Value::from("a%")
        ],
        union.bind_values()
    );

    Ok(())
}

#[test]
fn needs_at_least_one_other_operand() {
    let err = user(Dialect::Postgres, 1)
        .combine(SetOperator::UnionAll, Vec::<Relation>::new())
        .unwrap_err();

    assert!(matches!(
        err,
        Error::MissingOperand {
            operator: SetOperator::UnionAll
        }
    ));
}

#[test]
fn grouping_is_kept_when_rendered_with_another_dialect() -> anyhow::Result<()> {
    let union = user(Dialect::Postgres, 1).union(user(Dialect::Postgres, 2))?;

    assert_eq!(
        r#"SELECT "users".* FROM ((SELECT "users".* FROM "users" WHERE "users"."id" = 1) UNION (SELECT "users".* FROM "users" WHERE "users"."id" = 2)) AS "users""#,
        Dialect::Sqlite.build_inlined(union.into_select())
    );

    Ok(())
}

#[test]
fn combined_relation_can_be_paginated() -> anyhow::Result<()> {
    let users = users(Dialect::Sqlite);

    let page = user(Dialect::Sqlite, 1)
        .union(user(Dialect::Sqlite, 2))?
        .order_by(users.column("id").descend())
        .offset(20);

    let (sql, params) = page.build();

    assert_eq!(
        r#"SELECT "users".* FROM (SELECT "users".* FROM "users" WHERE "users"."id" = ? UNION SELECT "users".* FROM "users" WHERE "users"."id" = ?) AS "users" ORDER BY "users"."id" DESC LIMIT -1 OFFSET ?"#,
        sql
    );
    assert_eq!(
        vec![Value::from(1), Value::from(2), Value::from(20)],
        params
    );

    Ok(())
}
