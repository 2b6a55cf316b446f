use crate::errors::engine_error::EngineError;
use crate::errors::eval_error::{EvalError, EvalResult};
use crate::executer::help_functions::condition_literal;
use crate::types::filter_types::{CmpOp, MemberKey, Operand, Predicate};
use crate::types::parser_types::{Expr, Select};
use crate::types::storage_types::{TableSchema, Tuple, Value};
use std::cmp::Ordering;
use std::collections::HashSet;

/// Runs a sub-select and hands back its rows; only the first column is used.
pub type SubqueryRunner<'r> = dyn Fn(&Select) -> Result<Vec<Tuple>, EngineError> + 'r;

/// Compiles a condition against `schema`.
///
/// Column names are resolved once here, and every `IN (subquery)` is run
/// exactly once, so the resulting predicate can be evaluated per row
/// without touching the catalog. Without a runner, `IN` is rejected.
pub fn build_predicate(
    expr: &Expr,
    schema: &TableSchema,
    subqueries: Option<&SubqueryRunner<'_>>,
) -> Result<Predicate, EngineError> {
    match expr {
        Expr::And(a, b) => Ok(Predicate::And(
            Box::new(build_predicate(a, schema, subqueries)?),
            Box::new(build_predicate(b, schema, subqueries)?),
        )),
        Expr::Or(a, b) => Ok(Predicate::Or(
            Box::new(build_predicate(a, schema, subqueries)?),
            Box::new(build_predicate(b, schema, subqueries)?),
        )),

        Expr::Compare { op, left, right } => build_comparison(*op, left, right, schema),

        Expr::IsNull { expr, negated } => Ok(Predicate::IsNull {
            column: resolve_column(expr, schema)?,
            negated: *negated,
        }),

        Expr::InSubquery { expr, subquery } => {
            let column = resolve_column(expr, schema)?;
            let run = subqueries.ok_or_else(|| {
                EvalError::Unsupported("sub-query is not available in this context".into())
            })?;
            let query: &Select = subquery;
            let members: HashSet<MemberKey> = run(query)?
                .iter()
                .filter_map(|t| t.value(0).and_then(MemberKey::of))
                .collect();
            Ok(Predicate::In { column, members })
        }

        Expr::Not(_) => Err(EvalError::Unsupported("NOT".into()).into()),
        other => Err(EvalError::Unsupported(format!("condition {:?}", other)).into()),
    }
}

fn resolve_column(expr: &Expr, schema: &TableSchema) -> Result<usize, EngineError> {
    let name = expr.column_name().ok_or_else(|| {
        EvalError::Unsupported(format!("expected a column reference, got {:?}", expr))
    })?;
    Ok(schema.column_index(&name)?)
}

fn build_comparison(
    op: CmpOp,
    left: &Expr,
    right: &Expr,
    schema: &TableSchema,
) -> Result<Predicate, EngineError> {
    match (left, right) {
        // column op column, used by JOIN ... ON
        (Expr::Column { .. }, Expr::Column { .. }) => Ok(Predicate::Compare {
            op,
            column: resolve_column(left, schema)?,
            right: Operand::Column(resolve_column(right, schema)?),
        }),

        (Expr::Column { .. }, Expr::Literal(lit)) => {
            let column = resolve_column(left, schema)?;
            let col = &schema.columns[column];
            Ok(Predicate::Compare {
                op,
                column,
                right: Operand::Literal(condition_literal(lit, col)?),
            })
        }

        // literal op column: swap sides
        (Expr::Literal(_), Expr::Column { .. }) => {
            build_comparison(op.mirrored(), right, left, schema)
        }

        (Expr::Literal(_), Expr::Literal(_)) => {
            Err(EvalError::Unsupported("comparison between two literals".into()).into())
        }
        _ => Err(EvalError::Unsupported(format!(
            "comparison operand in {:?} {} {:?}",
            left, op, right
        ))
        .into()),
    }
}

fn column_value(tuple: &Tuple, column: usize) -> EvalResult<&Value> {
    tuple
        .value(column)
        .ok_or_else(|| EvalError::UnknownColumn(format!("#{}", column)))
}

/// Evaluates a compiled predicate on one row. AND/OR short-circuit left to right.
pub fn eval_predicate(predicate: &Predicate, tuple: &Tuple) -> EvalResult<bool> {
    match predicate {
        Predicate::True => Ok(true),

        Predicate::And(a, b) => Ok(eval_predicate(a, tuple)? && eval_predicate(b, tuple)?),
        Predicate::Or(a, b) => Ok(eval_predicate(a, tuple)? || eval_predicate(b, tuple)?),

        Predicate::Compare { op, column, right } => {
            let left = column_value(tuple, *column)?;
            match right {
                Operand::Column(idx) => cmp_values(*op, left, column_value(tuple, *idx)?),
                Operand::Literal(lit) => cmp_values(*op, left, lit),
            }
        }

        Predicate::IsNull { column, negated } => {
            Ok(column_value(tuple, *column)?.is_null() != *negated)
        }

        // NULL is never a member
        Predicate::In { column, members } => {
            Ok(MemberKey::of(column_value(tuple, *column)?).is_some_and(|k| members.contains(&k)))
        }
    }
}

/// Compares two values; any NULL operand makes the comparison false.
/// Values of different types (INT vs FLOAT included) are an error.
pub fn cmp_values(op: CmpOp, left: &Value, right: &Value) -> EvalResult<bool> {
    if left.is_null() || right.is_null() {
        return Ok(false);
    }

    let ordering = match (left, right) {
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
        // lexicographical
        (Value::Text(a), Value::Text(b)) => a.cmp(b),
        // false < true
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        _ => {
            return Err(EvalError::TypeMismatch {
                left: left.vtype(),
                right: right.vtype(),
                op,
            })
        }
    };

    use CmpOp::*;
    Ok(match op {
        Eq => ordering == Ordering::Equal,
        Ne => ordering != Ordering::Equal,
        Lt => ordering == Ordering::Less,
        Lte => ordering != Ordering::Greater,
        Gt => ordering == Ordering::Greater,
        Gte => ordering != Ordering::Less,
    })
}
