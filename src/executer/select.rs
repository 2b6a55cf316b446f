use crate::errors::engine_error::EngineError;
use crate::executer::executer::Executer;
use crate::executer::filter::{build_predicate, eval_predicate, SubqueryRunner};
use crate::printer::format_table;
use crate::types::filter_types::Predicate;
use crate::types::parser_types::{Expr, FromItem, Select, SelectItem};
use crate::types::storage_types::{TableSchema, Tuple, Value};

/// Rows produced by one step of a query, together with the schema they
/// are aligned to.
#[derive(Debug, Clone, PartialEq)]
pub struct Relation {
    pub schema: TableSchema,
    pub tuples: Vec<Tuple>,
}

impl Executer<'_> {
    pub(crate) fn select(&self, select: &Select) -> Result<String, EngineError> {
        let relation = self.run_select(select)?;
        Ok(format_table(&relation.schema, &relation.tuples))
    }

    /// FROM, then WHERE, then the select list. Also used for sub-selects.
    pub fn run_select(&self, select: &Select) -> Result<Relation, EngineError> {
        // step 1: FROM + WHERE; a bare table filters while scanning
        let relation = match &select.from {
            FromItem::Table { name, alias } => {
                self.scan_table(name, alias.as_deref(), select.filter.as_ref())?
            }
            from => {
                let relation = self.resolve_from(from)?;
                match &select.filter {
                    Some(cond) => self.filter_relation(relation, cond)?,
                    None => relation,
                }
            }
        };

        // step 2: projection
        if select.is_star() {
            Ok(relation)
        } else {
            project(relation, &select.projection)
        }
    }

    /// Compiles a condition, giving it access to sub-selects.
    pub(crate) fn compile(
        &self,
        cond: &Expr,
        schema: &TableSchema,
    ) -> Result<Predicate, EngineError> {
        let runner: &SubqueryRunner<'_> =
            &|query: &Select| self.run_select(query).map(|r| r.tuples);
        build_predicate(cond, schema, Some(runner))
    }

    pub(crate) fn resolve_from(&self, from: &FromItem) -> Result<Relation, EngineError> {
        match from {
            FromItem::Table { name, alias } => self.scan_table(name, alias.as_deref(), None),

            // the sub-select's schema is known even when it returns no rows
            FromItem::Subquery { query, alias } => {
                let relation = self.run_select(query)?;
                Ok(match alias {
                    Some(alias) => Relation {
                        schema: relation.schema.renamed(alias.as_str()),
                        tuples: relation.tuples,
                    },
                    None => relation,
                })
            }

            FromItem::Join {
                left,
                right,
                kind,
                on,
            } => self.resolve_join(left, right, *kind, on.as_ref()),
        }
    }

    fn scan_table(
        &self,
        table_name: &str,
        alias: Option<&str>,
        filter: Option<&Expr>,
    ) -> Result<Relation, EngineError> {
        let (schema, heap) = self.table_handle(table_name)?;
        let schema = match alias {
            Some(alias) => schema.renamed(alias),
            None => schema,
        };

        let tuples = match filter {
            Some(cond) => {
                // compile first: sub-selects may scan this same table
                let predicate = self.compile(cond, &schema)?;
                let guard = heap.lock();
                guard.scan_with_filter(|t| {
                    eval_predicate(&predicate, t).map_err(EngineError::from)
                })?
            }
            None => heap.lock().scan_all()?,
        };

        Ok(Relation { schema, tuples })
    }

    fn filter_relation(&self, relation: Relation, cond: &Expr) -> Result<Relation, EngineError> {
        let predicate = self.compile(cond, &relation.schema)?;
        let mut tuples = Vec::with_capacity(relation.tuples.len());
        for tuple in relation.tuples {
            if eval_predicate(&predicate, &tuple)? {
                tuples.push(tuple);
            }
        }
        Ok(Relation {
            schema: relation.schema,
            tuples,
        })
    }
}

/// Narrows a relation to the listed columns, keeping row order.
fn project(relation: Relation, items: &[SelectItem]) -> Result<Relation, EngineError> {
    let mut indices = Vec::with_capacity(items.len());
    for item in items {
        let SelectItem::Expr(expr) = item else {
            return Err(EngineError::Unsupported(
                "'*' combined with other select items".into(),
            ));
        };
        let name = expr.column_name().ok_or_else(|| {
            EngineError::Unsupported(format!(
                "only column names are supported in the select list, got {:?}",
                expr
            ))
        })?;
        indices.push(relation.schema.column_index(&name)?);
    }

    let columns = indices
        .iter()
        .map(|&i| relation.schema.columns[i].clone())
        .collect();
    let schema = TableSchema::new(relation.schema.table_name.clone(), columns);

    let tuples = relation
        .tuples
        .into_iter()
        .map(|t| {
            Tuple::new(
                indices
                    .iter()
                    .map(|&i| t.value(i).cloned().unwrap_or(Value::Null))
                    .collect(),
            )
        })
        .collect();

    Ok(Relation { schema, tuples })
}
