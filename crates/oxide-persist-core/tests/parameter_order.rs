mod common;

use common::{assert_balanced, compile_generic};
use oxide_persist_core::{
    BigInteger, BooleanExpr, ColumnRef, Expr, NumberBinaryOp, NumberExpr, NumberUnaryOp,
    NumberVariadicOp, SelectItem, SimpleSelect, SqlValue, StringExpr, TableName,
};

#[test]
fn test_literal_binds_nothing() {
    let (sql, params) = compile_generic(&NumberExpr::column("age").eq(NumberExpr::literal(18)));
    assert_eq!(sql, "age = 18");
    assert!(params.is_empty());
}

#[test]
fn test_parameter_binds_once() {
    let (sql, params) = compile_generic(&NumberExpr::column("age").eq(NumberExpr::parameter(18)));
    assert_eq!(sql, "age = ?");
    assert_eq!(params, vec![SqlValue::Int32(18)]);
}

#[test]
fn test_deep_tree_binds_left_to_right() {
    let expr = NumberExpr::parameter(1)
        .binary(NumberBinaryOp::Add, NumberExpr::parameter(2_i64))
        .binary(
            NumberBinaryOp::Multiply,
            NumberExpr::variadic(
                NumberVariadicOp::Greatest,
                vec![
                    NumberExpr::parameter(3.5_f64),
                    NumberExpr::literal(4),
                    NumberExpr::parameter(5_i8).unary(NumberUnaryOp::Abs),
                ],
            ),
        )
        .between(
            NumberExpr::parameter("-12345678901234567890".parse::<BigInteger>().unwrap()),
            NumberExpr::parameter(6.0_f32),
        )
        .or(BooleanExpr::Parameter(false).not());

    let (sql, params) = assert_balanced(&expr);
    assert_eq!(
        sql,
        "((? + ?) * GREATEST(?, 4, ABS(?))) BETWEEN ? AND ? OR NOT (?)"
    );
    assert_eq!(
        params,
        vec![
            SqlValue::Int32(1),
            SqlValue::Int64(2),
            SqlValue::Float64(3.5),
            SqlValue::Int8(5),
            SqlValue::BigInteger("-12345678901234567890".parse().unwrap()),
            SqlValue::Float32(6.0),
            SqlValue::Bool(false),
        ]
    );
}

#[test]
fn test_string_literal_is_escaped_inline() {
    let (sql, params) =
        compile_generic(&StringExpr::column("name").eq(StringExpr::Literal(String::from("O'Brien"))));
    assert_eq!(sql, "name = 'O''Brien'");
    assert!(params.is_empty());
}

#[test]
fn test_parameters_from_values() {
    let condition = Expr::from(NumberExpr::column("id"))
        .eq(Expr::parameter(SqlValue::Int64(9)).unwrap())
        .and(
            Expr::from(StringExpr::column("grade"))
                .eq(Expr::parameter(SqlValue::Char('A')).unwrap()),
        );
    let (sql, params) = assert_balanced(&condition);
    assert_eq!(sql, "id = ? AND grade = ?");
    assert_eq!(
        params,
        vec![SqlValue::Int64(9), SqlValue::Text(String::from("A"))]
    );
}

#[test]
fn test_placeholders_match_values_across_shapes() {
    let shapes = vec![
        BooleanExpr::Literal(true),
        BooleanExpr::Parameter(true),
        Expr::from(NumberExpr::parameter(1)).is_null(),
        NumberExpr::column("a").between(NumberExpr::literal(1), NumberExpr::parameter(9)),
        Expr::from(NumberExpr::column("id")).in_selection(
            SimpleSelect {
                columns: vec![SelectItem::Expr {
                    expr: Expr::from(NumberExpr::parameter(2)),
                    alias: None,
                }],
                ..SimpleSelect::new(TableName::new("t"))
            }
            .where_clause(NumberExpr::Column(ColumnRef::new("x")).gt(NumberExpr::parameter(3)))
            .into(),
        ),
    ];
    for shape in &shapes {
        assert_balanced(shape);
    }
}
