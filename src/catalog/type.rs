use std::fmt::Display;
use std::fmt::Formatter;

use crate::error::Error;
use crate::error::Result;

/// A datatype
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub enum DataType {
    Boolean,
    Integer,
    Float,
    String,
    Null,
    /// A relation: an ordered list of labeled columns. Only set-returning
    /// function calls resolve to this type.
    Table(TableType),
}

impl DataType {
    pub fn is_table(&self) -> bool {
        matches!(self, DataType::Table(_))
    }
}

impl Default for DataType {
    fn default() -> Self {
        Self::String
    }
}

impl Display for DataType {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        match self {
            Self::Boolean => f.write_str("BOOLEAN"),
            Self::Integer => f.write_str("INTEGER"),
            Self::Float => f.write_str("FLOAT"),
            Self::String => f.write_str("TEXT"),
            Self::Null => f.write_str("NULL"),
            Self::Table(t) => write!(f, "{}", t),
        }
    }
}

/// The static type of a table-shaped expression.
///
/// `labels[i]` names the column whose type is `cols[i]`.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct TableType {
    labels: Vec<String>,
    cols: Vec<DataType>,
}

impl TableType {
    pub fn try_new(labels: Vec<String>, cols: Vec<DataType>) -> Result<Self> {
        if labels.len() != cols.len() {
            return Err(Error::internal(format!(
                "table type has {} labels but {} columns",
                labels.len(),
                cols.len()
            )));
        }
        if let Some(col) = cols.iter().find(|it| it.is_table()) {
            return Err(Error::internal(format!("table column can't be of type {}", col)));
        }
        Ok(Self { labels, cols })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn cols(&self) -> &[DataType] {
        &self.cols
    }

    pub fn len(&self) -> usize {
        self.cols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cols.is_empty()
    }
}

impl Display for TableType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "SETOF TUPLE{{")?;
        for (i, (label, col)) in self.labels.iter().zip(self.cols.iter()).enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} AS {}", col, label)?;
        }
        write!(f, "}}")
    }
}

/// A specific value of a data type
#[derive(Clone, Debug)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => {
                // Handle NaN equality - treat NaN as equal to NaN
                if a.is_nan() && b.is_nan() {
                    true
                } else {
                    a == b
                }
            }
            (Value::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Boolean(b) if *b => f.write_str("TRUE"),
            Value::Boolean(_) => f.write_str("FALSE"),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Float(v) => write!(f, "{:.2}", v),
            Value::String(s) => write!(f, "'{}'", s),
        }
    }
}
