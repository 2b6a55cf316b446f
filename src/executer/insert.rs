use crate::errors::engine_error::EngineError;
use crate::errors::storage_error::StorageError;
use crate::executer::executer::Executer;
use crate::executer::help_functions::{expect_literal, literal_to_value, row_count_message};
use crate::types::parser_types::Expr;
use crate::types::storage_types::{TableSchema, Tuple};

impl Executer<'_> {
    /// Every row is checked and converted before the first one is written.
    pub(crate) fn insert_into(
        &self,
        table_name: &str,
        rows: &[Vec<Expr>],
    ) -> Result<String, EngineError> {
        let (schema, heap) = self.table_handle(table_name)?;

        let tuples = rows
            .iter()
            .map(|row| build_tuple(&schema, row))
            .collect::<Result<Vec<_>, _>>()?;

        let mut heap = heap.lock();
        for tuple in &tuples {
            heap.insert_tuple(tuple)?;
        }

        Ok(row_count_message("Inserted", tuples.len()))
    }
}

fn build_tuple(schema: &TableSchema, row: &[Expr]) -> Result<Tuple, EngineError> {
    if row.len() != schema.column_count() {
        return Err(StorageError::ArityMismatch {
            table: schema.table_name.clone(),
            expected: schema.column_count(),
            actual: row.len(),
        }
        .into());
    }

    let mut values = Vec::with_capacity(row.len());
    for (expr, col) in row.iter().zip(&schema.columns) {
        values.push(literal_to_value(expect_literal(expr)?, col)?);
    }
    Ok(Tuple::new(values))
}
