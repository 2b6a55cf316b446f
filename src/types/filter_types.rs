use super::storage_types::Value;
use std::collections::HashSet;
use std::fmt;

/// Enumerates supported comparison operators for conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Lte,
    Gt,
    Gte,
}

impl CmpOp {
    /// Operator to use when both operands swap sides (`1 < a` becomes `a > 1`).
    pub fn mirrored(self) -> Self {
        match self {
            CmpOp::Eq => CmpOp::Eq,
            CmpOp::Ne => CmpOp::Ne,
            CmpOp::Lt => CmpOp::Gt,
            CmpOp::Lte => CmpOp::Gte,
            CmpOp::Gt => CmpOp::Lt,
            CmpOp::Gte => CmpOp::Lte,
        }
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CmpOp::Eq => "=",
            CmpOp::Ne => "<>",
            CmpOp::Lt => "<",
            CmpOp::Lte => "<=",
            CmpOp::Gt => ">",
            CmpOp::Gte => ">=",
        };
        f.write_str(s)
    }
}

/// Right-hand side of a compiled comparison.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Column(usize),
    Literal(Value),
}

/// Hashable identity of a non-NULL value, used for `IN (subquery)` membership.
/// Floats compare by bit pattern.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MemberKey {
    Int(i32),
    Float(u32),
    Bool(bool),
    Text(String),
}

impl MemberKey {
    pub fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(MemberKey::Int(*i)),
            Value::Float(x) => Some(MemberKey::Float(x.to_bits())),
            Value::Bool(b) => Some(MemberKey::Bool(*b)),
            Value::Text(s) => Some(MemberKey::Text(s.clone())),
            Value::Null => None,
        }
    }
}

/// A WHERE/ON condition compiled against one schema: column references are
/// already resolved to positions and sub-queries already materialized.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Always true, used for comma joins and missing ON clauses.
    True,
    And(Box<Predicate>, Box<Predicate>),
    Or(Box<Predicate>, Box<Predicate>),
    Compare {
        op: CmpOp,
        column: usize,
        right: Operand,
    },
    IsNull {
        column: usize,
        negated: bool,
    },
    In {
        column: usize,
        members: HashSet<MemberKey>,
    },
}
