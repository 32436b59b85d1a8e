use std::fmt::Debug;
use std::fmt::Display;

use crate::catalog::r#type::DataType;
use crate::catalog::r#type::Value;
use crate::error::Result;
use crate::sql::execution::context::Context;
use crate::sql::execution::generator::TableValue;

/// A normalized, statically typed expression, as produced by the analyzer.
///
/// The binder only inspects [`TypedExpr::resolved_type`]; evaluation is
/// deferred until the owning row source starts.
pub trait TypedExpr: Debug + Display + Send + Sync {
    /// The type inferred for this expression during analysis.
    fn resolved_type(&self) -> DataType;

    /// Evaluate the expression against the given context.
    fn evaluate(&self, ctx: &dyn Context) -> Result<Datum>;
}

/// The outcome of evaluating a [`TypedExpr`].
#[derive(Debug)]
pub enum Datum {
    Scalar(Value),
    /// A relation, i.e. the result of calling a set-returning function.
    Table(TableValue),
}

impl Datum {
    pub fn null() -> Self {
        Datum::Scalar(Value::Null)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Datum::Scalar(value) if value.is_null())
    }
}

impl From<Value> for Datum {
    fn from(value: Value) -> Self {
        Datum::Scalar(value)
    }
}

impl From<TableValue> for Datum {
    fn from(value: TableValue) -> Self {
        Datum::Table(value)
    }
}
