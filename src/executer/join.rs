use crate::errors::engine_error::EngineError;
use crate::executer::executer::Executer;
use crate::executer::filter::eval_predicate;
use crate::executer::select::Relation;
use crate::types::filter_types::Predicate;
use crate::types::parser_types::{Expr, FromItem, JoinKind};
use crate::types::storage_types::{TableSchema, Tuple, Value};

impl Executer<'_> {
    /// Nested-loop join: left rows in scan order, and for each of them the
    /// matching right rows in scan order.
    pub(crate) fn resolve_join(
        &self,
        left: &FromItem,
        right: &FromItem,
        kind: JoinKind,
        on: Option<&Expr>,
    ) -> Result<Relation, EngineError> {
        if matches!(kind, JoinKind::Right | JoinKind::Full) {
            return Err(EngineError::Unsupported(format!("{:?} join", kind)));
        }

        // resolve both sides independently
        let left = self.resolve_from(left)?;
        let right = self.resolve_from(right)?;

        // columns become "<side name>.<column>"
        let schema = TableSchema::merge(
            &left.schema.table_name,
            &left.schema,
            &right.schema.table_name,
            &right.schema,
        );

        // comma joins carry no condition
        let predicate = match on {
            Some(cond) => self.compile(cond, &schema)?,
            None => Predicate::True,
        };

        let null_right = Tuple::new(vec![Value::Null; right.schema.column_count()]);
        let mut tuples = Vec::new();

        for l in &left.tuples {
            let mut matched = false;
            for r in &right.tuples {
                let merged = Tuple::merge(l, r);
                if eval_predicate(&predicate, &merged)? {
                    tuples.push(merged);
                    matched = true;
                }
            }

            // LEFT JOIN keeps unmatched left rows, padded with NULLs
            if !matched && kind == JoinKind::Left {
                tuples.push(Tuple::merge(l, &null_right));
            }
        }

        Ok(Relation { schema, tuples })
    }
}
