use crate::errors::engine_error::EngineError;
use crate::executer::executer::Executer;
use crate::executer::filter::eval_predicate;
use crate::executer::help_functions::{row_count_message, target_table};
use crate::types::parser_types::{Expr, FromItem};

impl Executer<'_> {
    pub(crate) fn delete(
        &self,
        target: &FromItem,
        filter: Option<&Expr>,
    ) -> Result<String, EngineError> {
        let table_name = target_table(target)?;
        let (schema, heap) = self.table_handle(table_name)?;
        let predicate = filter.map(|cond| self.compile(cond, &schema)).transpose()?;

        let mut heap = heap.lock();
        let candidates = match &predicate {
            Some(p) => {
                heap.scan_with_filter_and_ids(|t| eval_predicate(p, t).map_err(EngineError::from))?
            }
            None => heap.scan_all_with_ids()?,
        };

        let mut deleted = 0;
        for (id, _) in candidates {
            if heap.delete_tuple(id)? {
                deleted += 1;
            }
        }

        Ok(row_count_message("Deleted", deleted))
    }
}
