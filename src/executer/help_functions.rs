use crate::errors::catalog_error::CatalogError;
use crate::errors::engine_error::EngineError;
use crate::errors::eval_error::{EvalError, EvalResult};
use crate::errors::storage_error::StorageError;
use crate::executer::executer::Executer;
use crate::storage::storage_engine::HeapFileRef;
use crate::types::parser_types::{Expr, FromItem, Literal};
use crate::types::storage_types::{ColumnDefinition, ColumnType, TableSchema, Value};

impl Executer<'_> {
    /// Schema and heap file of an existing table.
    pub(crate) fn table_handle(
        &self,
        table_name: &str,
    ) -> Result<(TableSchema, HeapFileRef), EngineError> {
        let schema = self
            .catalog
            .get_table(table_name)
            .ok_or_else(|| CatalogError::TableNotFound(table_name.to_string()))?;
        let heap = self
            .storage
            .get_heap_file(table_name)
            .ok_or_else(|| StorageError::HeapFileNotFound(table_name.to_string()))?;
        Ok((schema, heap))
    }
}

/// UPDATE and DELETE only address a plain, unaliased table.
pub fn target_table(target: &FromItem) -> Result<&str, EngineError> {
    match target {
        FromItem::Table { name, alias: None } => Ok(name.as_str()),
        _ => Err(EngineError::Unsupported(
            "only simple table references are supported as a target".into(),
        )),
    }
}

/// `Inserted 1 row.` / `Deleted 3 rows.`
pub fn row_count_message(verb: &str, n: usize) -> String {
    format!("{} {} {}.", verb, n, if n == 1 { "row" } else { "rows" })
}

pub fn expect_literal(expr: &Expr) -> Result<&Literal, EngineError> {
    match expr {
        Expr::Literal(lit) => Ok(lit),
        other => Err(EngineError::Unsupported(format!(
            "expected a literal value, got {:?}",
            other
        ))),
    }
}

fn literal_text(lit: &Literal) -> String {
    match lit {
        Literal::Number(n) => n.clone(),
        Literal::String(s) => format!("'{}'", s),
        Literal::Boolean(b) => b.to_string(),
        Literal::Null => "NULL".into(),
    }
}

fn literal_error(lit: &Literal, col: &ColumnDefinition) -> EvalError {
    EvalError::LiteralType {
        column: col.name.clone(),
        literal: literal_text(lit),
    }
}

/// Exact 32-bit integer; `3.0` is accepted, `3.5` is not.
fn parse_int(text: &str) -> Option<i32> {
    if let Ok(i) = text.parse::<i32>() {
        return Some(i);
    }
    let x = text.parse::<f64>().ok()?;
    let in_range = x >= f64::from(i32::MIN) && x <= f64::from(i32::MAX);
    (x.fract() == 0.0 && in_range).then_some(x as i32)
}

/// Converts a literal into a value storable in `col`.
pub fn literal_to_value(lit: &Literal, col: &ColumnDefinition) -> EvalResult<Value> {
    let value = match (lit, col.column_type) {
        (Literal::Null, _) => Some(Value::Null),
        (Literal::Number(n), ColumnType::Int) => parse_int(n).map(Value::Int),
        (Literal::Number(n), ColumnType::Float) => n.parse::<f32>().ok().map(Value::Float),
        (Literal::String(s), ColumnType::Varchar | ColumnType::Text) => {
            Some(Value::Text(s.clone()))
        }
        (Literal::Boolean(b), ColumnType::Boolean) => Some(Value::Bool(*b)),
        _ => None,
    };
    value.ok_or_else(|| literal_error(lit, col))
}

/// Converts a literal compared against `col` in a condition. Unlike
/// [`literal_to_value`] a literal of the wrong kind is kept as is, so
/// the mismatch surfaces when a row is actually compared.
pub fn condition_literal(lit: &Literal, col: &ColumnDefinition) -> EvalResult<Value> {
    match (lit, col.column_type) {
        (Literal::Number(_), ColumnType::Int | ColumnType::Float) => literal_to_value(lit, col),
        (Literal::Number(n), _) => match parse_int(n) {
            Some(i) => Ok(Value::Int(i)),
            None => n
                .parse::<f32>()
                .map(Value::Float)
                .map_err(|_| literal_error(lit, col)),
        },
        (Literal::String(s), _) => Ok(Value::Text(s.clone())),
        (Literal::Boolean(b), _) => Ok(Value::Bool(*b)),
        (Literal::Null, _) => Ok(Value::Null),
    }
}
