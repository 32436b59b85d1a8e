use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;
use std::sync::Arc;

use log::debug;
use log::trace;

use crate::access::value::Tuple;
use crate::error::Error;
use crate::error::Result;
use crate::sql::execution::context::CancelChecker;
use crate::sql::execution::context::Context;
use crate::sql::execution::expr::Datum;
use crate::sql::execution::expr::TypedExpr;
use crate::sql::execution::RowSource;
use crate::sql::plan::schema::LogicalSchema;

/// A stateful producer of rows, backing a set-returning function call.
///
/// Each family of generator functions provides its own implementation,
/// chosen when the call is evaluated. The owner drives it as
/// `start`, then `next`/`values` until `next` returns false, then `close`.
pub trait ValueGenerator: Debug + Send {
    /// Prepare the generator for producing rows.
    fn start(&mut self) -> Result<()>;

    /// Move to the next row, returns false once exhausted.
    fn next(&mut self) -> Result<bool>;

    /// The current row, only meaningful after `next` returned true.
    fn values(&self) -> Tuple;

    /// Release the resources held by the generator.
    fn close(&mut self) -> Result<()>;
}

/// A table value, i.e., the runtime result of calling a set-returning
/// function, wrapping the generator that produces its rows.
#[derive(Debug)]
pub struct TableValue {
    generator: Box<dyn ValueGenerator>,
}

impl TableValue {
    pub fn new(generator: Box<dyn ValueGenerator>) -> Self {
        Self { generator }
    }

    /// A table value without any row.
    pub fn empty() -> Self {
        Self::new(Box::new(EmptyGenerator {}))
    }

    pub fn into_generator(self) -> Box<dyn ValueGenerator> {
        self.generator
    }
}

/// The canonical generator that produces zero rows, substituted when a
/// generator call evaluates to NULL.
#[derive(Debug)]
pub struct EmptyGenerator {}

impl ValueGenerator for EmptyGenerator {
    fn start(&mut self) -> Result<()> {
        Ok(())
    }

    fn next(&mut self) -> Result<bool> {
        Ok(false)
    }

    fn values(&self) -> Tuple {
        Tuple::empty()
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Unstarted,
    Running,
    /// Start failed, or an advance failed or got cancelled. Only close
    /// is accepted from here.
    Halted,
    Closed,
}

impl Display for State {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            State::Unstarted => "unstarted",
            State::Running => "running",
            State::Halted => "halted",
            State::Closed => "closed",
        })
    }
}

/// Row source that produces the rows of a set-returning function call
/// in the FROM clause, e.g. `SELECT * FROM generate_series(1, 3)`.
///
/// Built by [`Binder::bind_generator`]. The generator is obtained when the
/// node starts and is owned by it until close.
///
/// [`Binder::bind_generator`]: crate::sql::plan::binder::Binder::bind_generator
#[derive(Debug)]
pub struct GeneratorExec {
    /// The normalized function call, evaluated at start to obtain the
    /// generator.
    expr: Arc<dyn TypedExpr>,
    /// Derived from the table type of `expr` at bind time.
    schema: LogicalSchema,

    generator: Option<Box<dyn ValueGenerator>>,
    state: State,
}

impl GeneratorExec {
    pub fn new(expr: Arc<dyn TypedExpr>, schema: LogicalSchema) -> Self {
        Self { expr, schema, generator: None, state: State::Unstarted }
    }

    fn obtain_generator(&self, ctx: &dyn Context) -> Result<Box<dyn ValueGenerator>> {
        match self.expr.evaluate(ctx)? {
            Datum::Table(table) => Ok(table.into_generator()),
            datum if datum.is_null() => {
                debug!("{} evaluated to NULL, producing no rows", self.expr);
                Ok(TableValue::empty().into_generator())
            }
            Datum::Scalar(value) => Err(Error::evaluation(format!(
                "generator {} evaluated to non-table value {}",
                self.expr, value
            ))),
        }
    }
}

impl RowSource for GeneratorExec {
    fn schema(&self) -> &LogicalSchema {
        &self.schema
    }

    fn start(&mut self, ctx: &dyn Context) -> Result<()> {
        if self.state != State::Unstarted {
            return Err(Error::internal(format!("can't start {} generator {}", self.state, self)));
        }
        // Anything failing from here on leaves the node unable to advance.
        self.state = State::Halted;

        let generator = self.obtain_generator(ctx)?;
        // Keep the generator before starting it, close has to release
        // it even if it fails to start.
        let generator = self.generator.insert(generator);
        generator.start()?;

        trace!("started generator {}", self.expr);
        self.state = State::Running;
        Ok(())
    }

    fn advance(&mut self, cancel: &dyn CancelChecker) -> Result<bool> {
        if self.state != State::Running {
            return Err(Error::internal(format!("can't advance {} generator {}", self.state, self)));
        }
        let generator = match self.generator.as_mut() {
            Some(generator) => generator,
            None => return Err(Error::internal(format!("generator {} is missing", self.expr))),
        };
        if let Err(err) = cancel.check() {
            debug!("generator {} canceled", self.expr);
            self.state = State::Halted;
            return Err(err);
        }
        generator.next().inspect_err(|_| self.state = State::Halted)
    }

    fn values(&self) -> Tuple {
        self.generator.as_ref().map(|it| it.values()).unwrap_or_default()
    }

    fn close(&mut self) -> Result<()> {
        self.state = State::Closed;
        match self.generator.take() {
            Some(mut generator) => {
                trace!("closing generator {}", self.expr);
                generator.close()
            }
            None => Ok(()),
        }
    }
}

impl Display for GeneratorExec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "GeneratorExec: {}", self.expr)
    }
}
