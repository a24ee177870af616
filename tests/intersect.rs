use pretty_assertions::assert_eq;
use relation_union::{
    ast::*,
    relation::{LoadDirective, Model, Relation},
    Dialect, Error,
};

const SQL_TIME: &str = "2014-07-19 00:00:00";

fn posts(dialect: Dialect) -> Model<'static> {
    Model::new("posts", dialect)
}

fn posts_of(dialect: Dialect, user_id: i64) -> Relation<'static> {
    let posts = posts(dialect);
    posts.filter(posts.column("user_id").equals(user_id))
}

#[test]
fn refuses_load_directives_on_either_side() {
    let users = Model::new("users", Dialect::Postgres);

    let cases = [
        (users.all().includes("posts"), LoadDirective::Includes),
        (users.all().preload("posts"), LoadDirective::Preload),
        (users.all().eager_load("posts"), LoadDirective::EagerLoad),
    ];

    for (loading, expected) in cases {
        for result in [
            users.all().intersect(loading.clone()),
            loading.clone().intersect(users.all()),
        ] {
            let err = result.unwrap_err();

            assert!(matches!(
                err,
                Error::IncompatibleRelation { operator: SetOperator::Intersect, directive } if directive == expected
            ));
            assert_eq!(
                format!("Cannot INTERSECT relation with {expected}."),
                err.to_string()
            );
        }
    }
}

#[test]
fn works() -> anyhow::Result<()> {
    let intersect = posts_of(Dialect::Sqlite, 1).intersect(fragment(
        "created_at > ?",
        vec![Value::from(SQL_TIME)],
    )?)?;

    assert_eq!(
        format!(
            r#"SELECT "posts".* FROM (SELECT "posts".* FROM "posts" WHERE "posts"."user_id" = 1 INTERSECT SELECT "posts".* FROM "posts" WHERE (created_at > '{SQL_TIME}')) AS "posts""#
        ),
        intersect.to_sql()
    );

    Ok(())
}

#[test]
fn numbers_placeholders_across_operands() -> anyhow::Result<()> {
    let posts = posts(Dialect::Postgres);
    let others = posts_of(Dialect::Postgres, 3).select([posts.column("id")]);

    let intersect = posts_of(Dialect::Postgres, 1)
        .intersect(posts_of(Dialect::Postgres, 2))?
        .exclude(posts.column("id").in_selection(others));

    let (sql, params) = intersect.build();

    assert_eq!(
        r#"SELECT "posts".* FROM ((SELECT "posts".* FROM "posts" WHERE "posts"."user_id" = $1) INTERSECT (SELECT "posts".* FROM "posts" WHERE "posts"."user_id" = $2)) AS "posts" WHERE (NOT "posts"."id" IN (SELECT "posts"."id" FROM "posts" WHERE "posts"."user_id" = $3))"#,
        sql
    );
    assert_eq!(vec![Value::from(1), Value::from(2), Value::from(3)], params);

    Ok(())
}

#[test]
fn binds_values_on_joins() -> anyhow::Result<()> {
    let users = Model::new("users", Dialect::Postgres);

    let drafts = Table::from("posts").on(("posts", "user_id")
        .equals(Column::from(("users", "id")))
        .and(("posts", "draft").equals(true)));

    let intersect = users
        .all()
        .inner_join(drafts)
        .intersect(users.column("id").equals(11))?;

    assert_eq!(
        vec![Value::from(true), Value::from(11)],
        intersect.bind_values()
    );
    assert_eq!(
        r#"SELECT "users".* FROM ((SELECT "users".* FROM "users" INNER JOIN "posts" ON ("posts"."user_id" = "users"."id" AND "posts"."draft" = TRUE)) INTERSECT (SELECT "users".* FROM "users" WHERE "users"."id" = 11)) AS "users""#,
        intersect.to_sql()
    );

    Ok(())
}

#[test]
fn does_not_repeat_default_scopes() -> anyhow::Result<()> {
    let published = posts(Dialect::Mysql).default_scope(fragment(
        "published_at < ?",
        vec![Value::from("2014-07-24 00:00:00")],
    )?);

    let intersect = published
        .filter(fragment("created_at > ?", vec![Value::from(SQL_TIME)])?)
        .intersect(posts_of(Dialect::Mysql, 1))?;

    assert_eq!(
        "SELECT `posts`.* FROM ((SELECT `posts`.* FROM `posts` WHERE ((published_at < ?) AND (created_at > ?))) INTERSECT (SELECT `posts`.* FROM `posts` WHERE `posts`.`user_id` = ?)) AS `posts`",
        intersect.build().0
    );
    assert_eq!(
        vec![
            Value::from("2014-07-24 00:00:00"),
            Value::from(SQL_TIME),
            Value::from(1)
        ],
        intersect.bind_values()
    );
    assert_eq!(None, intersect.as_select().conditions());

    Ok(())
}

#[test]
fn limited_operands_keep_their_limit_when_grouped() -> anyhow::Result<()> {
    let posts = posts(Dialect::Postgres);

    let intersect = posts
        .all()
        .order_by(posts.column("created_at").descend())
        .limit(10)
        .intersect(posts_of(Dialect::Postgres, 1))?
        .order_by("created_at".descend());

    assert_eq!(
        r#"SELECT "posts".* FROM ((SELECT "posts".* FROM "posts" ORDER BY "posts"."created_at" DESC LIMIT 10) INTERSECT (SELECT "posts".* FROM "posts" WHERE "posts"."user_id" = 1)) AS "posts" ORDER BY "created_at" DESC"#,
        intersect.to_sql()
    );

    Ok(())
}
