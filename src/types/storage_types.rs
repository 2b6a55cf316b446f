use crate::errors::eval_error::{EvalError, EvalResult};
use std::fmt;

// Supported data types for columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Int,
    Float,
    Boolean,
    Varchar,
    Text,
}

impl ColumnType {
    /// Number of bytes a non-NULL value occupies, or `None` for variable-length types.
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            ColumnType::Int | ColumnType::Float => Some(4),
            ColumnType::Boolean => Some(1),
            ColumnType::Varchar | ColumnType::Text => None,
        }
    }

    /// Canonical name used in the catalog metadata file.
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Int => "INT",
            ColumnType::Float => "FLOAT",
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::Varchar => "VARCHAR",
            ColumnType::Text => "TEXT",
        }
    }

    /// Parses a canonical catalog name (the inverse of [`ColumnType::name`]).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "INT" => Some(ColumnType::Int),
            "FLOAT" => Some(ColumnType::Float),
            "BOOLEAN" => Some(ColumnType::Boolean),
            "VARCHAR" => Some(ColumnType::Varchar),
            "TEXT" => Some(ColumnType::Text),
            _ => None,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    // Column name (possibly qualified as "alias.col" inside a join schema)
    pub name: String,
    // Data type of the column
    pub column_type: ColumnType,
    // Advisory maximum length, only meaningful for VARCHAR
    pub max_length: u32,
}

impl ColumnDefinition {
    /// Column whose length attribute defaults to the type's fixed size (0 for variable types).
    pub fn new(name: impl Into<String>, column_type: ColumnType) -> Self {
        let max_length = column_type.fixed_size().unwrap_or(0) as u32;
        Self {
            name: name.into(),
            column_type,
            max_length,
        }
    }

    pub fn with_max_length(
        name: impl Into<String>,
        column_type: ColumnType,
        max_length: u32,
    ) -> Self {
        Self {
            name: name.into(),
            column_type,
            max_length,
        }
    }
}

/// Ordered column list of a table, a join or a projection.
///
/// Column lookup is case-insensitive. A name qualified with the schema's
/// own name (`u.id` on table `u`) resolves to the bare column. On merged
/// (join) schemas an unqualified name also matches any column named
/// `alias.name`, provided exactly one such column exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableSchema {
    pub table_name: String,
    pub columns: Vec<ColumnDefinition>,
}

impl TableSchema {
    pub fn new(table_name: impl Into<String>, columns: Vec<ColumnDefinition>) -> Self {
        Self {
            table_name: table_name.into(),
            columns,
        }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, index: usize) -> Option<&ColumnDefinition> {
        self.columns.get(index)
    }

    /// Resolves a (possibly qualified) column name to its position.
    pub fn column_index(&self, name: &str) -> EvalResult<usize> {
        // exact match first, covers both plain and qualified names
        if let Some(idx) = self
            .columns
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
        {
            return Ok(idx);
        }

        // "u.id" against a single table or alias named "u"
        if let Some((qualifier, column)) = name.split_once('.') {
            if qualifier.eq_ignore_ascii_case(&self.table_name) {
                if let Some(idx) = self
                    .columns
                    .iter()
                    .position(|c| c.name.eq_ignore_ascii_case(column))
                {
                    return Ok(idx);
                }
            }
        }

        // suffix match: bare "val" matches "b.val"
        let suffix = format!(".{}", name.to_ascii_uppercase());
        let mut found = None;
        for (i, col) in self.columns.iter().enumerate() {
            if col.name.to_ascii_uppercase().ends_with(&suffix) {
                if found.is_some() {
                    return Err(EvalError::AmbiguousColumn(name.to_string()));
                }
                found = Some(i);
            }
        }

        found.ok_or_else(|| EvalError::UnknownColumn(name.to_string()))
    }

    /// Same columns under another name, used for `FROM t AS alias`.
    pub fn renamed(&self, table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            columns: self.columns.clone(),
        }
    }

    /// Builds the schema of a join: every column is renamed `alias.column`.
    pub fn merge(
        left_alias: &str,
        left: &TableSchema,
        right_alias: &str,
        right: &TableSchema,
    ) -> Self {
        let qualify = |alias: &str, col: &ColumnDefinition| ColumnDefinition {
            name: format!("{}.{}", alias, col.name),
            column_type: col.column_type,
            max_length: col.max_length,
        };

        let mut columns = Vec::with_capacity(left.columns.len() + right.columns.len());
        columns.extend(left.columns.iter().map(|c| qualify(left_alias, c)));
        columns.extend(right.columns.iter().map(|c| qualify(right_alias, c)));

        Self {
            table_name: format!("{}_{}", left_alias, right_alias),
            columns,
        }
    }
}

// Represents a single cell value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i32),
    Float(f32),
    Bool(bool),
    Text(String),
    Null, // Equivalent to SQL NULL
}

impl Value {
    /// Returns the `ValueType` corresponding to this `Value` variant.
    pub fn vtype(&self) -> ValueType {
        match self {
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::Bool(_) => ValueType::Bool,
            Value::Text(_) => ValueType::Text,
            Value::Null => ValueType::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether a non-NULL value may be stored in a column of type `ty`.
    pub fn fits(&self, ty: ColumnType) -> bool {
        matches!(
            (self, ty),
            (Value::Null, _)
                | (Value::Int(_), ColumnType::Int)
                | (Value::Float(_), ColumnType::Float)
                | (Value::Bool(_), ColumnType::Boolean)
                | (Value::Text(_), ColumnType::Varchar | ColumnType::Text)
        )
    }
}

// Display implementation for pretty-printing values
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            // integral floats keep a trailing ".0" so they read as floats
            Value::Float(x) if x.is_finite() && x.fract() == 0.0 => write!(f, "{:.1}", x),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => write!(f, "{}", s),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Null => write!(f, "NULL"),
        }
    }
}

/// Enumerates the possible runtime types of values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Int,
    Float,
    Bool,
    Text,
    Null,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ValueType::Int => "INT",
            ValueType::Float => "FLOAT",
            ValueType::Bool => "BOOLEAN",
            ValueType::Text => "TEXT",
            ValueType::Null => "NULL",
        })
    }
}

/// One row, values aligned 1:1 with the columns of some schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Tuple {
    pub values: Vec<Value>,
}

impl Tuple {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    pub fn value(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    /// Concatenates a left and a right row into a joined row.
    pub fn merge(left: &Tuple, right: &Tuple) -> Tuple {
        let mut values = Vec::with_capacity(left.values.len() + right.values.len());
        values.extend(left.values.iter().cloned());
        values.extend(right.values.iter().cloned());
        Tuple { values }
    }
}

/// Physical address of a tuple inside one heap file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TupleId {
    pub page_index: u32,
    pub slot_index: u16,
}

impl TupleId {
    pub fn new(page_index: u32, slot_index: u16) -> Self {
        Self {
            page_index,
            slot_index,
        }
    }
}

impl fmt::Display for TupleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.page_index, self.slot_index)
    }
}
