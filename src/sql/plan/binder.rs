use std::sync::Arc;

use log::debug;

use crate::catalog::r#type::DataType;
use crate::error::Error;
use crate::error::Result;
use crate::sql::execution::context::Context;
use crate::sql::execution::generator::GeneratorExec;
use crate::sql::parser::ast::Function;
use crate::sql::parser::ast::FunctionArg;
use crate::sql::plan::analyzer::AnalyzeContext;
use crate::sql::plan::analyzer::Analyzer;
use crate::sql::plan::schema::LogicalSchema;
use crate::sql::udf::FuncKind;
use crate::sql::udf::FuncRegistry;
use crate::sql::udf::SearchPath;

const FROM_CLAUSE: &str = "FROM";

/// Binds function calls appearing as row sources, e.g. the
/// `generate_series(1, 3)` in `SELECT * FROM generate_series(1, 3)`.
pub struct Binder {
    analyzer: Arc<dyn Analyzer>,
    func_registry: Arc<dyn FuncRegistry>,
}

impl Binder {
    pub fn new(analyzer: Arc<dyn Analyzer>, func_registry: Arc<dyn FuncRegistry>) -> Self {
        Self { analyzer, func_registry }
    }

    /// Bind a set-returning function call into an unstarted row source.
    ///
    /// The call must not contain aggregates or window functions, and its
    /// resolved type must be a table; the output schema of the node is
    /// taken from that table type. Nothing gets evaluated here besides
    /// whatever constant folding the analyzer does.
    pub fn bind_generator(
        &self,
        func: &Function,
        search_path: &SearchPath,
        ctx: &dyn Context,
    ) -> Result<GeneratorExec> {
        self.assert_no_aggregation_or_windowing(func, FROM_CLAUSE, search_path)?;

        // The call itself exposes no columns and can't see the outer query.
        let schema = LogicalSchema::empty();
        let analyze_ctx = AnalyzeContext {
            clause: FROM_CLAUSE,
            schema: &schema,
            outer_schema: None,
            desired: None,
            search_path,
            eval_ctx: ctx,
        };
        let normalized = self.analyzer.normalize(func, &analyze_ctx)?;

        let schema = match normalized.resolved_type() {
            DataType::Table(table) => LogicalSchema::from(&table),
            _ => {
                return Err(Error::type_mismatch(format!(
                    "{} expression is not a generator: {}",
                    FROM_CLAUSE, func
                )))
            }
        };
        debug!("bound generator {} with schema {}", normalized, schema);
        Ok(GeneratorExec::new(normalized, schema))
    }

    fn assert_no_aggregation_or_windowing(
        &self,
        func: &Function,
        clause: &str,
        search_path: &SearchPath,
    ) -> Result<()> {
        if func.over.is_some() {
            return Err(Error::binding(format!(
                "window functions are not allowed in {}: {}",
                clause, func
            )));
        }
        if let Some(FuncKind::Aggregate) = self.func_registry.func_kind(&func.name, search_path) {
            return Err(Error::binding(format!(
                "aggregate functions are not allowed in {}: {}",
                clause, func
            )));
        }
        for arg in &func.args {
            if let FunctionArg::Function(inner) = arg {
                self.assert_no_aggregation_or_windowing(inner, clause, search_path)?;
            }
        }
        Ok(())
    }
}
