use std::sync::Arc;

use crate::catalog::r#type::DataType;
use crate::error::Result;
use crate::sql::execution::context::Context;
use crate::sql::execution::expr::TypedExpr;
use crate::sql::parser::ast::Function;
use crate::sql::plan::schema::LogicalSchema;
use crate::sql::udf::SearchPath;

/// What the analyzer is allowed to see while normalizing an expression.
pub struct AnalyzeContext<'a> {
    /// The clause the expression appears in, used in error messages.
    pub clause: &'static str,
    /// The columns of the row sources the expression may refer to.
    pub schema: &'a LogicalSchema,
    /// Columns of the enclosing query, for correlated references.
    pub outer_schema: Option<&'a LogicalSchema>,
    /// The type the caller expects, `None` for any type.
    pub desired: Option<DataType>,
    pub search_path: &'a SearchPath,
    /// Used for constant folding.
    pub eval_ctx: &'a dyn Context,
}

/// Name resolution, type inference and constant folding of expressions.
pub trait Analyzer: Send + Sync {
    /// Turns a raw function call into a normalized, typed expression.
    fn normalize(&self, func: &Function, ctx: &AnalyzeContext) -> Result<Arc<dyn TypedExpr>>;
}
