use heapgres::errors::engine_error::{EngineError, ErrorKind};
use heapgres::errors::eval_error::EvalError;
use heapgres::executer::filter::{build_predicate, cmp_values, eval_predicate, SubqueryRunner};
use heapgres::types::filter_types::{CmpOp, Predicate};
use heapgres::types::parser_types::{Expr, FromItem, Select};
use heapgres::types::storage_types::{ColumnDefinition, ColumnType, TableSchema, Tuple, Value};

fn schema() -> TableSchema {
    TableSchema::new(
        "t",
        vec![
            ColumnDefinition::new("id", ColumnType::Int),
            ColumnDefinition::with_max_length("name", ColumnType::Varchar, 20),
            ColumnDefinition::new("score", ColumnType::Float),
            ColumnDefinition::new("active", ColumnType::Boolean),
        ],
    )
}

fn row(id: Option<i32>, name: Option<&str>, score: Option<f32>, active: Option<bool>) -> Tuple {
    Tuple::new(vec![
        id.map_or(Value::Null, Value::Int),
        name.map_or(Value::Null, |s| Value::Text(s.into())),
        score.map_or(Value::Null, Value::Float),
        active.map_or(Value::Null, Value::Bool),
    ])
}

fn eval(expr: &Expr, tuple: &Tuple) -> bool {
    let p = build_predicate(expr, &schema(), None).unwrap();
    eval_predicate(&p, tuple).unwrap()
}

const OPS: [CmpOp; 6] = [CmpOp::Eq, CmpOp::Ne, CmpOp::Lt, CmpOp::Lte, CmpOp::Gt, CmpOp::Gte];

#[test]
fn test_null_comparisons_are_false() {
    let null_row = row(None, None, None, None);
    for op in OPS {
        assert!(!eval(&Expr::column("id").cmp(op, Expr::int(1)), &null_row), "{}", op);
        assert!(!eval(&Expr::column("id").cmp(op, Expr::null()), &row(Some(1), None, None, None)));
        assert!(!cmp_values(op, &Value::Null, &Value::Null).unwrap());
    }
}

#[test]
fn test_is_null_partitions_rows() {
    let rows = vec![
        row(Some(1), Some("a"), None, None),
        row(Some(2), None, None, None),
        row(None, Some("c"), None, None),
    ];
    let is_null = Expr::column("name").is_null();
    let not_null = Expr::column("name").is_not_null();

    for r in &rows {
        assert_ne!(eval(&is_null, r), eval(&not_null, r));
    }
    assert_eq!(rows.iter().filter(|r| eval(&is_null, r)).count(), 1);
}

#[test]
fn test_ordering_per_type() {
    let r = row(Some(5), Some("bob"), Some(2.5), Some(true));
    assert!(eval(&Expr::column("id").cmp(CmpOp::Gte, Expr::int(5)), &r));
    assert!(eval(&Expr::column("id").cmp(CmpOp::Ne, Expr::int(4)), &r));
    assert!(eval(&Expr::column("name").cmp(CmpOp::Gt, Expr::string("alice")), &r));
    assert!(eval(&Expr::column("score").cmp(CmpOp::Lt, Expr::number("3")), &r));
    assert!(eval(&Expr::column("score").equals(Expr::number("2.5")), &r));
    // false < true
    assert!(eval(&Expr::column("active").cmp(CmpOp::Gt, Expr::boolean(false)), &r));
}

#[test]
fn test_literal_on_the_left_is_mirrored() {
    let r = row(Some(3), None, None, None);
    let expr = Expr::int(5).cmp(CmpOp::Gt, Expr::column("id"));
    let p = build_predicate(&expr, &schema(), None).unwrap();
    assert!(matches!(p, Predicate::Compare { op: CmpOp::Lt, column: 0, .. }));
    assert!(eval_predicate(&p, &r).unwrap());
}

#[test]
fn test_and_or() {
    let r = row(Some(1), Some("a"), None, Some(false));
    let yes = Expr::column("id").equals(Expr::int(1));
    let no = Expr::column("active").equals(Expr::boolean(true));
    assert!(!eval(&yes.clone().and(no.clone()), &r));
    assert!(eval(&no.clone().or(yes.clone()), &r));
    assert!(!eval(&no.clone().or(no), &r));
}

#[test]
fn test_column_to_column() {
    let s = TableSchema::new(
        "p",
        vec![
            ColumnDefinition::new("a", ColumnType::Int),
            ColumnDefinition::new("b", ColumnType::Int),
        ],
    );
    let p = build_predicate(&Expr::column("a").equals(Expr::column("b")), &s, None).unwrap();
    assert!(eval_predicate(&p, &Tuple::new(vec![Value::Int(2), Value::Int(2)])).unwrap());
    assert!(!eval_predicate(&p, &Tuple::new(vec![Value::Int(2), Value::Int(3)])).unwrap());
    assert!(!eval_predicate(&p, &Tuple::new(vec![Value::Null, Value::Null])).unwrap());
}

#[test]
fn test_incompatible_types_fail_on_evaluation() {
    let expr = Expr::column("name").equals(Expr::boolean(true));
    let p = build_predicate(&expr, &schema(), None).unwrap();

    // NULL short-circuits before the type check
    assert!(!eval_predicate(&p, &row(None, None, None, None)).unwrap());
    assert!(matches!(
        eval_predicate(&p, &row(None, Some("x"), None, None)),
        Err(EvalError::TypeMismatch { .. })
    ));

    // no implicit INT/FLOAT coercion
    assert!(cmp_values(CmpOp::Eq, &Value::Int(1), &Value::Float(1.0)).is_err());
}

#[test]
fn test_non_integral_literal_against_int_column() {
    let cond = Expr::column("id").equals(Expr::number("1.5"));
    let err = build_predicate(&cond, &schema(), None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
}

#[test]
fn test_unknown_and_unsupported() {
    let unknown =
        build_predicate(&Expr::column("nope").equals(Expr::int(1)), &schema(), None).unwrap_err();
    assert_eq!(unknown.kind(), ErrorKind::Schema);

    let not = build_predicate(
        &Expr::Not(Box::new(Expr::column("id").equals(Expr::int(1)))),
        &schema(),
        None,
    )
    .unwrap_err();
    assert_eq!(not.kind(), ErrorKind::Unsupported);

    let literals =
        build_predicate(&Expr::int(1).equals(Expr::int(1)), &schema(), None).unwrap_err();
    assert_eq!(literals.kind(), ErrorKind::Unsupported);

    let sub = Select::columns(&["id"], FromItem::table("t"));
    let no_runner =
        build_predicate(&Expr::column("id").in_subquery(sub), &schema(), None).unwrap_err();
    assert_eq!(no_runner.kind(), ErrorKind::Unsupported);
}

#[test]
fn test_in_subquery_runs_once() {
    let calls = std::cell::Cell::new(0);
    let runner: &SubqueryRunner<'_> = &|_: &Select| {
        calls.set(calls.get() + 1);
        Ok::<_, EngineError>(vec![
            Tuple::new(vec![Value::Int(1)]),
            Tuple::new(vec![Value::Null]),
            Tuple::new(vec![Value::Int(3)]),
        ])
    };

    let sub = Select::columns(&["id"], FromItem::table("other"));
    let p = build_predicate(&Expr::column("id").in_subquery(sub), &schema(), Some(runner)).unwrap();
    assert_eq!(calls.get(), 1);

    let hits: Vec<bool> = [Some(1), Some(2), Some(3), None]
        .into_iter()
        .map(|id| eval_predicate(&p, &row(id, None, None, None)).unwrap())
        .collect();
    assert_eq!(hits, vec![true, false, true, false]);
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_ambiguous_column_on_merged_schema() {
    let a = TableSchema::new("a", vec![ColumnDefinition::new("id", ColumnType::Int)]);
    let b = TableSchema::new(
        "b",
        vec![
            ColumnDefinition::new("id", ColumnType::Int),
            ColumnDefinition::new("val", ColumnType::Text),
        ],
    );
    let merged = TableSchema::merge("a", &a, "b", &b);

    assert_eq!(merged.column_index("B.ID").unwrap(), 1);
    assert_eq!(merged.column_index("val").unwrap(), 2);
    assert!(matches!(merged.column_index("id"), Err(EvalError::AmbiguousColumn(_))));

    let err = build_predicate(&Expr::column("id").equals(Expr::int(1)), &merged, None).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Schema);
}
