use super::*;
use std::collections::BTreeMap;

fn params(entries: &[(&str, Value)]) -> Parameters {
    entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

#[test]
fn test_empty_builder() {
    let qb = QueryBuilder::new();
    assert_eq!(qb.generate_sql(), "");
    assert!(qb.get_parameters().is_empty());
    assert!(qb.is_empty());
}

#[test]
fn test_end_to_end_select() {
    let mut qb = QueryBuilder::new();
    qb.add_select(vec!["id", "name"]).add_from("users");
    qb.add_where([("active", true)]).unwrap();
    qb.add_sort("name");

    assert_eq!(
        qb.generate_sql(),
        "SELECT id, name FROM users WHERE active = :active ORDER BY name"
    );
    assert_eq!(qb.get_parameters(), &params(&[("active", Value::Bool(true))]));
}

#[test]
fn test_with_select_from() {
    let qb = QueryBuilder::with_select_from(["id", "email"], "users");
    assert_eq!(qb.generate_sql(), "SELECT id, email FROM users");

    let qb = QueryBuilder::with_select_from("count(*)", ["a", "b"]);
    assert_eq!(qb.generate_sql(), "SELECT count(*) FROM a, b");
}

#[test]
fn test_segment_order_is_fixed() {
    let mut qb = QueryBuilder::new();
    // Added in reverse order on purpose.
    qb.add_sort("total DESC")
        .add_group("user_id")
        .add_where_not_null("user_id")
        .add_from("orders")
        .add_select(["user_id", "sum(amount) AS total"]);

    let sql = qb.generate_sql();
    assert_eq!(
        sql,
        "SELECT user_id, sum(amount) AS total FROM orders WHERE user_id is not null \
         GROUP BY user_id ORDER BY total DESC"
    );

    let positions: Vec<usize> = ["SELECT", "FROM", "WHERE", "GROUP BY", "ORDER BY"]
        .iter()
        .map(|kw| {
            assert_eq!(sql.matches(kw).count(), 1, "{kw} should appear once");
            sql.find(kw).unwrap()
        })
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_empty_segments_are_omitted() {
    let mut qb = QueryBuilder::new();
    qb.add_from("users");
    assert_eq!(qb.generate_sql(), "FROM users");

    qb.add_sort(["a", "b DESC"]);
    assert_eq!(qb.generate_sql(), "FROM users ORDER BY a, b DESC");
}

#[test]
fn test_join_after_plain_from() {
    let mut qb = QueryBuilder::new();
    qb.add_from("orders")
        .add_join("users", "LEFT JOIN", "orders.user_id = users.id");
    assert_eq!(
        qb.generate_sql(),
        "FROM orders, LEFT JOIN users ON orders.user_id = users.id"
    );
}

#[test]
fn test_join_without_type_or_condition_is_plain_from() {
    let mut qb = QueryBuilder::new();
    qb.add_join("a", "", "a.id = b.id")
        .add_join("b", "INNER JOIN", "")
        .add_join("", "INNER JOIN", "x = y");
    assert_eq!(qb.froms(), &["a".to_string(), "b".to_string()]);
}

#[test]
fn test_where_mapping_binds_each_entry() {
    let mut qb = QueryBuilder::new();
    qb.add_from("users");
    qb.add_where(vec![("status", Value::from("active")), ("role_id", Value::Int(2))])
        .unwrap();

    assert_eq!(
        qb.generate_sql(),
        "FROM users WHERE status = :status AND role_id = :role_id"
    );
    assert_eq!(
        qb.get_parameters(),
        &params(&[
            ("status", Value::from("active")),
            ("role_id", Value::Int(2)),
        ])
    );
}

#[test]
fn test_where_btreemap() {
    let mut map = BTreeMap::new();
    map.insert("b", 2);
    map.insert("a", 1);

    let mut qb = QueryBuilder::new();
    qb.add_where(map).unwrap();
    assert_eq!(qb.wheres(), &["a = :a".to_string(), "b = :b".to_string()]);
}

#[test]
fn test_where_plain_clause_is_verbatim() {
    let mut qb = QueryBuilder::new();
    qb.add_where("created_at > now() - interval '1 day'").unwrap();
    assert_eq!(
        qb.generate_sql(),
        "WHERE created_at > now() - interval '1 day'"
    );
    assert!(qb.get_parameters().is_empty());
}

#[test]
fn test_where_required_none_fails() {
    let mut qb = QueryBuilder::new();
    let err = qb.add_where([("status", None::<&str>)]).unwrap_err();
    assert!(err.is_missing_value());
    assert_eq!(err.missing_column(), Some("status"));
    assert_eq!(
        err.to_string(),
        "Value for required parameter 'status' is missing."
    );
    assert!(qb.wheres().is_empty());
    assert!(qb.get_parameters().is_empty());
}

#[test]
fn test_where_failure_keeps_earlier_entries() {
    let mut qb = QueryBuilder::new();
    let result = qb.add_where(vec![("a", Value::Int(1)), ("b", Value::Null), ("c", Value::Int(3))]);
    assert!(result.is_err());
    assert_eq!(qb.wheres(), &["a = :a".to_string()]);
    assert_eq!(qb.get_parameters(), &params(&[("a", Value::Int(1))]));
}

#[test]
fn test_optional_where_skips_none() {
    let mut qb = QueryBuilder::new();
    qb.add_optional_where([("status", None::<&str>)]);
    assert!(qb.wheres().is_empty());
    assert!(qb.get_parameters().is_empty());

    qb.add_optional_where(vec![("a", Value::Null), ("b", Value::Int(5))]);
    assert_eq!(qb.generate_sql(), "WHERE b = :b");
    assert_eq!(qb.get_parameters(), &params(&[("b", Value::Int(5))]));
}

#[test]
fn test_in_operator_expands_list() {
    let mut qb = QueryBuilder::new();
    qb.add_where_with_operator("id", vec![1, 2, 3], "in").unwrap();

    assert_eq!(qb.wheres(), &["id IN (:id_0, :id_1, :id_2)".to_string()]);
    assert_eq!(
        qb.get_parameters(),
        &params(&[
            ("id_0", Value::Int(1)),
            ("id_1", Value::Int(2)),
            ("id_2", Value::Int(3)),
        ])
    );
}

#[test]
fn test_in_operator_is_case_insensitive() {
    let mut qb = QueryBuilder::new();
    qb.add_where_with_operator("code", vec!["a", "b"], "In").unwrap();
    assert_eq!(qb.generate_sql(), "WHERE code IN (:code_0, :code_1)");
}

#[test]
fn test_in_operator_with_scalar_falls_back() {
    let mut qb = QueryBuilder::new();
    qb.add_where_with_operator("id", 7, "IN").unwrap();
    assert_eq!(qb.generate_sql(), "WHERE id IN :id");
    assert_eq!(qb.get_parameters(), &params(&[("id", Value::Int(7))]));
}

#[test]
fn test_empty_in_list_verbatim_by_default() {
    let mut qb = QueryBuilder::new();
    qb.add_where_with_operator("id", Vec::<i64>::new(), "in")
        .unwrap();
    assert_eq!(qb.generate_sql(), "WHERE id IN ()");
    assert!(qb.get_parameters().is_empty());
}

#[test]
fn test_empty_in_list_always_false() {
    let mut qb =
        QueryBuilder::with_config(BuilderConfig::new().with_empty_in(EmptyInList::AlwaysFalse));
    qb.add_from("users").add_where_in("id", Vec::<i64>::new());
    assert_eq!(qb.generate_sql(), "FROM users WHERE 1=0");
}

#[test]
fn test_add_where_in() {
    let mut qb = QueryBuilder::new();
    qb.add_where_in("status", ["new", "open"]);
    assert_eq!(qb.generate_sql(), "WHERE status IN (:status_0, :status_1)");
    assert_eq!(qb.get_parameters()["status_1"], Value::from("open"));
}

#[test]
fn test_operator_variants() {
    let mut qb = QueryBuilder::new();
    qb.add_where_with_operator("age", 18, ">=")
        .unwrap()
        .add_where_with_operator("name", "%bob%", "ILIKE")
        .unwrap();
    assert_eq!(
        qb.generate_sql(),
        "WHERE age >= :age AND name ILIKE :name"
    );
}

#[test]
fn test_operator_required_none_fails() {
    let mut qb = QueryBuilder::new();
    let err = qb
        .add_where_with_operator("age", None::<i32>, "=")
        .unwrap_err();
    assert_eq!(err.missing_column(), Some("age"));
    assert!(qb.wheres().is_empty());
}

#[test]
fn test_optional_operator_binds_null() {
    let mut qb = QueryBuilder::new();
    qb.add_optional_where_with_operator("age", None::<i32>, "=");
    assert_eq!(qb.generate_sql(), "WHERE age = :age");
    assert_eq!(qb.get_parameters(), &params(&[("age", Value::Null)]));
}

#[test]
fn test_where_not_null() {
    let mut qb = QueryBuilder::new();
    qb.add_where_not_null("email")
        .add_where_not_null(vec!["phone", "address"]);
    assert_eq!(
        qb.generate_sql(),
        "WHERE email is not null AND phone is not null AND address is not null"
    );
    assert!(qb.get_parameters().is_empty());
}

#[test]
fn test_extra_is_comma_joined_with_leading_space() {
    let mut qb = QueryBuilder::new();
    qb.add_select("id").add_from("users").add_extra("LIMIT 10");
    assert_eq!(qb.generate_sql(), "SELECT id FROM users  LIMIT 10");

    qb.add_extra("OFFSET 5");
    assert_eq!(qb.generate_sql(), "SELECT id FROM users  LIMIT 10, OFFSET 5");
}

#[test]
fn test_extra_alone() {
    let mut qb = QueryBuilder::new();
    qb.add_extra(["LIMIT 1"]);
    assert_eq!(qb.generate_sql(), "LIMIT 1");
}

#[test]
fn test_parameter_collision_overwrites() {
    let mut qb = QueryBuilder::new();
    qb.add_where([("status", "a")]).unwrap();
    qb.add_where_with_operator("status", "b", "!=").unwrap();

    assert_eq!(
        qb.generate_sql(),
        "WHERE status = :status AND status != :status"
    );
    assert_eq!(qb.get_parameters(), &params(&[("status", Value::from("b"))]));
}

#[test]
fn test_falsy_inputs_are_noops() {
    let mut qb = QueryBuilder::new();
    qb.add_select("id").add_from("users");
    let before = qb.get_query();

    qb.add_select("")
        .add_select(Vec::<String>::new())
        .add_from("")
        .add_join("", "LEFT JOIN", "a = b")
        .add_group("")
        .add_sort(Vec::<&str>::new())
        .add_extra(String::new())
        .add_where_not_null("")
        .add_where_not_null(Vec::<&str>::new())
        .add_optional_where("")
        .add_optional_where(Vec::<(&str, i32)>::new());
    qb.add_where("").unwrap();
    qb.add_where(Vec::<(&str, i32)>::new()).unwrap();

    assert_eq!(qb.get_query(), before);
}

#[test]
fn test_render_is_idempotent() {
    let mut qb = QueryBuilder::new();
    qb.add_select("id").add_from("t");
    qb.add_where_with_operator("id", vec![1, 2], "in").unwrap();

    let first = qb.generate_sql();
    let second = qb.generate_sql();
    assert_eq!(first, second);
    assert_eq!(qb.get_parameters().clone(), qb.get_parameters().clone());
    assert_eq!(qb.get_query(), qb.get_query());
}

#[test]
fn test_get_parameters_before_filters() {
    let mut qb = QueryBuilder::new();
    qb.add_select("1");
    assert!(qb.get_parameters().is_empty());
}

#[test]
fn test_get_query_pairs_sql_and_params() {
    let mut qb = QueryBuilder::new();
    qb.add_from("users");
    qb.add_where([("id", 1)]).unwrap();

    let (sql, params): (String, Parameters) = qb.get_query().into();
    assert_eq!(sql, "FROM users WHERE id = :id");
    assert_eq!(params["id"], Value::Int(1));
}

#[test]
fn test_where_input_from_json() {
    let mut qb = QueryBuilder::new();
    let input = WhereInput::try_from(serde_json::json!({"active": true})).unwrap();
    qb.add_where(input).unwrap();
    assert_eq!(qb.generate_sql(), "WHERE active = :active");

    let bad = WhereInput::try_from(serde_json::json!(12));
    assert!(bad.unwrap_err().is_invalid_argument());
}

#[test]
fn test_bound_query_to_positional() {
    let mut qb = QueryBuilder::new();
    qb.add_select("*").add_from("users");
    qb.add_where([("status", "active")]).unwrap();
    qb.add_where_in("id", [3, 4]);

    let positional = qb.get_query().to_positional().unwrap();
    assert_eq!(
        positional.sql,
        "SELECT * FROM users WHERE status = $1 AND id IN ($2, $3)"
    );
    assert_eq!(
        positional.params,
        vec![Value::from("active"), Value::Int(3), Value::Int(4)]
    );
}

#[test]
fn test_optional_variants_accept_every_input_shape() {
    let mut qb = QueryBuilder::new();
    qb.add_optional_where("deleted_at is null")
        .add_optional_where(vec![("a", Value::Int(1)), ("b", Value::Null)])
        .add_optional_where_with_operator("id", vec![7, 8], "in")
        .add_optional_where_with_operator("tags", Value::Null, "in");

    assert_eq!(
        qb.generate_sql(),
        "WHERE deleted_at is null AND a = :a AND id IN (:id_0, :id_1) AND tags in :tags"
    );
    assert_eq!(
        qb.get_parameters(),
        &params(&[
            ("a", Value::Int(1)),
            ("id_0", Value::Int(7)),
            ("id_1", Value::Int(8)),
            ("tags", Value::Null),
        ])
    );
}

#[test]
fn test_qualified_columns_translate_to_positional() {
    let mut qb = QueryBuilder::new();
    qb.add_select(["u.id", "o.total"])
        .add_from("users u")
        .add_join("orders o", "INNER JOIN", "o.user_id = u.id")
        .add_where_in("o.status", ["new", "paid"]);
    qb.add_where([("u.id", 1)]).unwrap();

    let query = qb.get_query();
    assert_eq!(
        query.sql,
        "SELECT u.id, o.total FROM users u, INNER JOIN orders o ON o.user_id = u.id \
         WHERE o.status IN (:o.status_0, :o.status_1) AND u.id = :u.id"
    );

    let positional = query.to_positional().unwrap();
    assert_eq!(
        positional.sql,
        "SELECT u.id, o.total FROM users u, INNER JOIN orders o ON o.user_id = u.id \
         WHERE o.status IN ($1, $2) AND u.id = $3"
    );
    assert_eq!(
        positional.params,
        vec![Value::from("new"), Value::from("paid"), Value::Int(1)]
    );
}
