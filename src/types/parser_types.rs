use crate::types::filter_types::CmpOp;

/// Syntax tree handed over by the SQL front end. It is already validated
/// syntactically; every semantic check happens in the executer.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// CREATE TABLE table_name (col1 type1, col2 type2, ...)
    CreateTable {
        table_name: String,
        columns: Vec<ColumnSpec>,
    },
    /// DROP TABLE table_name
    DropTable { table_name: String },
    /// INSERT INTO table VALUES (...), (...)
    Insert {
        table_name: String,
        rows: Vec<Vec<Expr>>,
    },
    /// SELECT ... FROM ... [WHERE ...]
    Select(Box<Select>),
    /// UPDATE table SET col = expr, ... [WHERE ...]
    Update {
        target: FromItem,
        column_names: Vec<String>,
        values: Vec<Expr>,
        filter: Option<Expr>,
    },
    /// DELETE FROM table [WHERE ...]
    Delete {
        target: FromItem,
        filter: Option<Expr>,
    },
    /// Any statement kind the front end recognised but the engine does not run
    Unsupported(String),
}

impl Statement {
    /// Short statement kind name, used in logs and error messages.
    pub fn kind(&self) -> &str {
        match self {
            Statement::CreateTable { .. } => "CREATE_TABLE",
            Statement::DropTable { .. } => "DROP_TABLE",
            Statement::Insert { .. } => "INSERT",
            Statement::Select(_) => "SELECT",
            Statement::Update { .. } => "UPDATE",
            Statement::Delete { .. } => "DELETE",
            Statement::Unsupported(kind) => kind,
        }
    }
}

/// Column declaration as written in CREATE TABLE; `type_name` is the raw
/// type token (`INT`, `VARCHAR`, `REAL`, ...).
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub name: String,
    pub type_name: String,
    pub length: Option<i64>,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            length: None,
        }
    }

    pub fn sized(name: impl Into<String>, type_name: impl Into<String>, length: i64) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
            length: Some(length),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Select {
    pub projection: Vec<SelectItem>,
    pub from: FromItem,
    pub filter: Option<Expr>,
}

impl Select {
    /// `SELECT * FROM <from>`
    pub fn star(from: FromItem) -> Self {
        Self {
            projection: vec![SelectItem::Wildcard],
            from,
            filter: None,
        }
    }

    pub fn columns(names: &[&str], from: FromItem) -> Self {
        Self {
            projection: names
                .iter()
                .map(|n| SelectItem::Expr(Expr::column(n)))
                .collect(),
            from,
            filter: None,
        }
    }

    pub fn filter(mut self, cond: Expr) -> Self {
        self.filter = Some(cond);
        self
    }

    pub fn is_star(&self) -> bool {
        matches!(self.projection.as_slice(), [SelectItem::Wildcard])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectItem {
    Wildcard,
    Expr(Expr),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    /// `FROM a, b`
    Comma,
    Left,
    Right,
    Full,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FromItem {
    Table {
        name: String,
        alias: Option<String>,
    },
    Subquery {
        query: Box<Select>,
        alias: Option<String>,
    },
    Join {
        left: Box<FromItem>,
        right: Box<FromItem>,
        kind: JoinKind,
        on: Option<Expr>,
    },
}

impl FromItem {
    pub fn table(name: impl Into<String>) -> Self {
        FromItem::Table {
            name: name.into(),
            alias: None,
        }
    }

    pub fn aliased(name: impl Into<String>, alias: impl Into<String>) -> Self {
        FromItem::Table {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }

    pub fn subquery(query: Select, alias: Option<&str>) -> Self {
        FromItem::Subquery {
            query: Box::new(query),
            alias: alias.map(str::to_string),
        }
    }

    pub fn join(left: FromItem, right: FromItem, kind: JoinKind, on: Option<Expr>) -> Self {
        FromItem::Join {
            left: Box::new(left),
            right: Box::new(right),
            kind,
            on,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// Numeric literal exactly as written; typed against the target column.
    Number(String),
    String(String),
    Boolean(bool),
    Null,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Column {
        table: Option<String>,
        name: String,
    },
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
    Compare {
        op: CmpOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    IsNull {
        expr: Box<Expr>,
        negated: bool,
    },
    InSubquery {
        expr: Box<Expr>,
        subquery: Box<Select>,
    },
}

impl Expr {
    /// Column reference; `"a.id"` becomes a qualified reference.
    pub fn column(name: &str) -> Self {
        match name.split_once('.') {
            Some((table, col)) => Expr::Column {
                table: Some(table.to_string()),
                name: col.to_string(),
            },
            None => Expr::Column {
                table: None,
                name: name.to_string(),
            },
        }
    }

    pub fn int(n: i64) -> Self {
        Expr::Literal(Literal::Number(n.to_string()))
    }

    pub fn number(text: &str) -> Self {
        Expr::Literal(Literal::Number(text.to_string()))
    }

    pub fn string(s: &str) -> Self {
        Expr::Literal(Literal::String(s.to_string()))
    }

    pub fn boolean(b: bool) -> Self {
        Expr::Literal(Literal::Boolean(b))
    }

    pub fn null() -> Self {
        Expr::Literal(Literal::Null)
    }

    pub fn cmp(self, op: CmpOp, right: Expr) -> Self {
        Expr::Compare {
            op,
            left: Box::new(self),
            right: Box::new(right),
        }
    }

    pub fn equals(self, right: Expr) -> Self {
        self.cmp(CmpOp::Eq, right)
    }

    pub fn and(self, right: Expr) -> Self {
        Expr::And(Box::new(self), Box::new(right))
    }

    pub fn or(self, right: Expr) -> Self {
        Expr::Or(Box::new(self), Box::new(right))
    }

    pub fn is_null(self) -> Self {
        Expr::IsNull {
            expr: Box::new(self),
            negated: false,
        }
    }

    pub fn is_not_null(self) -> Self {
        Expr::IsNull {
            expr: Box::new(self),
            negated: true,
        }
    }

    pub fn in_subquery(self, subquery: Select) -> Self {
        Expr::InSubquery {
            expr: Box::new(self),
            subquery: Box::new(subquery),
        }
    }

    /// Name used for schema lookup: `table.col` when qualified, else `col`.
    pub fn column_name(&self) -> Option<String> {
        match self {
            Expr::Column {
                table: Some(t),
                name,
            } => Some(format!("{}.{}", t, name)),
            Expr::Column { table: None, name } => Some(name.clone()),
            _ => None,
        }
    }
}
