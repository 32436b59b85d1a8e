//! A tiny analyzer resolving a handful of functions, enough to drive the
//! generator scan end to end.

use std::fmt::Display;
use std::fmt::Formatter;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use sboxgen::access::value::Tuple;
use sboxgen::catalog::r#type::DataType;
use sboxgen::catalog::r#type::TableType;
use sboxgen::catalog::r#type::Value;
use sboxgen::error::Error;
use sboxgen::error::Result;
use sboxgen::sql::execution::context::CancelChecker;
use sboxgen::sql::execution::context::Context;
use sboxgen::sql::execution::context::ExecContext;
use sboxgen::sql::execution::expr::Datum;
use sboxgen::sql::execution::expr::TypedExpr;
use sboxgen::sql::execution::generator::TableValue;
use sboxgen::sql::execution::generator::ValueGenerator;
use sboxgen::sql::parser::ast::Function;
use sboxgen::sql::parser::ast::FunctionArg;
use sboxgen::sql::plan::analyzer::AnalyzeContext;
use sboxgen::sql::plan::analyzer::Analyzer;
use sboxgen::sql::plan::binder::Binder;
use sboxgen::sql::udf::FuncKind;
use sboxgen::sql::udf::MemoryFuncRegistry;
use sboxgen::sql::udf::SearchPath;

pub fn search_path() -> SearchPath {
    SearchPath::from(vec!["pg_catalog", "public"])
}

pub fn exec_context() -> ExecContext {
    ExecContext::new(2, search_path())
}

/// Returns the binder together with the number of series generators
/// started through it and not yet closed.
pub fn binder() -> (Binder, Arc<AtomicUsize>) {
    let registry = MemoryFuncRegistry::new()
        .register("pg_catalog", "generate_series", FuncKind::Generator)
        .register("pg_catalog", "broken_series", FuncKind::Generator)
        .register("pg_catalog", "count", FuncKind::Aggregate)
        .register("pg_catalog", "abs", FuncKind::Scalar);
    let open = Arc::new(AtomicUsize::new(0));
    let analyzer = TestAnalyzer { open: Arc::clone(&open) };
    (Binder::new(Arc::new(analyzer), Arc::new(registry)), open)
}

struct TestAnalyzer {
    open: Arc<AtomicUsize>,
}

impl Analyzer for TestAnalyzer {
    fn normalize(&self, func: &Function, _ctx: &AnalyzeContext) -> Result<Arc<dyn TypedExpr>> {
        let args = func
            .args
            .iter()
            .map(|arg| match arg {
                FunctionArg::Value(v) => Ok(v.clone()),
                _ => Err(Error::analysis(format!("unsupported argument {}", arg))),
            })
            .collect::<Result<Vec<_>>>()?;
        match func.name.base() {
            "generate_series" | "broken_series" => {
                if args.len() != 2 {
                    return Err(Error::analysis(format!(
                        "{} expects 2 arguments, got {}",
                        func.name,
                        args.len()
                    )));
                }
                let broken = func.name.base() == "broken_series";
                Ok(Arc::new(SeriesExpr { args, broken, open: Arc::clone(&self.open) }))
            }
            "abs" => Ok(Arc::new(ScalarExpr { value: args.into_iter().next().unwrap_or_default() })),
            _ => Err(Error::analysis(format!("unknown function: {}", func.name))),
        }
    }
}

#[derive(Debug)]
struct ScalarExpr {
    value: Value,
}

impl Display for ScalarExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "abs({})", self.value)
    }
}

impl TypedExpr for ScalarExpr {
    fn resolved_type(&self) -> DataType {
        DataType::Integer
    }

    fn evaluate(&self, _ctx: &dyn Context) -> Result<Datum> {
        Ok(Datum::Scalar(self.value.clone()))
    }
}

/// `generate_series(start, stop)`, producing `(n, label)` rows.
#[derive(Debug)]
struct SeriesExpr {
    args: Vec<Value>,
    /// Fails on the third row.
    broken: bool,
    open: Arc<AtomicUsize>,
}

impl Display for SeriesExpr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = if self.broken { "broken_series" } else { "generate_series" };
        write!(f, "{}({}, {})", name, self.args[0], self.args[1])
    }
}

impl TypedExpr for SeriesExpr {
    fn resolved_type(&self) -> DataType {
        let table = TableType::try_new(
            vec!["n".to_string(), "label".to_string()],
            vec![DataType::Integer, DataType::String],
        );
        table.map(DataType::Table).unwrap_or(DataType::Null)
    }

    fn evaluate(&self, _ctx: &dyn Context) -> Result<Datum> {
        let (start, stop) = match (&self.args[0], &self.args[1]) {
            (Value::Null, _) | (_, Value::Null) => return Ok(Datum::null()),
            (Value::Integer(start), Value::Integer(stop)) => (*start, *stop),
            (a, b) => return Err(Error::evaluation(format!("invalid series bounds {}, {}", a, b))),
        };
        let generator = SeriesGenerator {
            start,
            stop,
            current: None,
            broken: self.broken,
            started: false,
            closed: false,
            open: Arc::clone(&self.open),
        };
        Ok(Datum::Table(TableValue::new(Box::new(generator))))
    }
}

#[derive(Debug)]
struct SeriesGenerator {
    start: i64,
    stop: i64,
    current: Option<i64>,
    broken: bool,
    started: bool,
    closed: bool,
    open: Arc<AtomicUsize>,
}

impl ValueGenerator for SeriesGenerator {
    fn start(&mut self) -> Result<()> {
        if self.stop.saturating_sub(self.start) > 1_000_000 {
            return Err(Error::generator_start("series is too long"));
        }
        self.open.fetch_add(1, Ordering::SeqCst);
        self.started = true;
        self.current = None;
        Ok(())
    }

    fn next(&mut self) -> Result<bool> {
        let next = self.current.map(|it| it + 1).unwrap_or(self.start);
        if self.broken && next - self.start == 2 {
            return Err(Error::generator_advance("series generator broke"));
        }
        self.current = Some(next);
        Ok(next <= self.stop)
    }

    fn values(&self) -> Tuple {
        match self.current {
            Some(n) => Tuple::from(vec![Value::Integer(n), Value::String(format!("#{}", n))]),
            None => Tuple::empty(),
        }
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Err(Error::internal("series generator closed twice"));
        }
        self.closed = true;
        if self.started {
            self.open.fetch_sub(1, Ordering::SeqCst);
        }
        Ok(())
    }
}

/// Reports cancellation from the given check on, 1-based.
pub struct CancelAt {
    at: usize,
    checks: AtomicUsize,
}

impl CancelAt {
    pub fn new(at: usize) -> Self {
        Self { at, checks: AtomicUsize::new(0) }
    }
}

impl CancelChecker for CancelAt {
    fn check(&self) -> Result<()> {
        let n = self.checks.fetch_add(1, Ordering::SeqCst) + 1;
        if n >= self.at {
            return Err(Error::Cancelled);
        }
        Ok(())
    }
}
