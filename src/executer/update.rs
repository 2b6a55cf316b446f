use crate::errors::engine_error::EngineError;
use crate::executer::executer::Executer;
use crate::executer::filter::eval_predicate;
use crate::executer::help_functions::{
    expect_literal, literal_to_value, row_count_message, target_table,
};
use crate::types::parser_types::{Expr, FromItem};
use crate::types::storage_types::{Tuple, Value};

impl Executer<'_> {
    /// Rewrites matching rows as delete + insert, so every updated row
    /// gets a new address.
    pub(crate) fn update(
        &self,
        target: &FromItem,
        column_names: &[String],
        values: &[Expr],
        filter: Option<&Expr>,
    ) -> Result<String, EngineError> {
        let table_name = target_table(target)?;
        let (schema, heap) = self.table_handle(table_name)?;

        if column_names.len() != values.len() {
            return Err(EngineError::Schema(format!(
                "{} target columns but {} values",
                column_names.len(),
                values.len()
            )));
        }

        // step 1: resolve SET targets; a later assignment to the same column wins
        let mut assignments: Vec<(usize, Value)> = Vec::with_capacity(column_names.len());
        for (name, expr) in column_names.iter().zip(values) {
            let idx = schema.column_index(name)?;
            let value = literal_to_value(expect_literal(expr)?, &schema.columns[idx])?;
            assignments.push((idx, value));
        }

        // step 2: compile WHERE before locking the table
        let predicate = filter.map(|cond| self.compile(cond, &schema)).transpose()?;

        let mut heap = heap.lock();

        // step 3: collect every candidate before touching any of them
        let candidates = match &predicate {
            Some(p) => {
                heap.scan_with_filter_and_ids(|t| eval_predicate(p, t).map_err(EngineError::from))?
            }
            None => heap.scan_all_with_ids()?,
        };

        // step 4: build and check every new row while the old ones are intact
        let mut rewrites = Vec::with_capacity(candidates.len());
        for (id, old) in candidates {
            let mut new_values = old.values;
            for (idx, value) in &assignments {
                new_values[*idx] = value.clone();
            }
            let tuple = Tuple::new(new_values);
            heap.check_insertable(&tuple)?;
            rewrites.push((id, tuple));
        }

        // step 5: delete old, insert new
        for (id, tuple) in &rewrites {
            heap.delete_tuple(*id)?;
            heap.insert_tuple(tuple)?;
        }

        Ok(row_count_message("Updated", rewrites.len()))
    }
}
