use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;

use log::debug;
use log::trace;

use crate::access::value::Tuple;
use crate::catalog::r#type::Value;
use crate::error::Error;
use crate::error::Result;
use crate::sql::execution::context::CancelChecker;
use crate::sql::execution::context::Context;
use crate::sql::execution::display::TabularDisplay;
use crate::sql::plan::schema::LogicalSchema;

pub mod context;
pub mod display;
pub mod expr;
pub mod generator;
pub mod query;

/// A physical node of the execution tree that produces rows.
///
/// This follows the Volcano model, i.e., a tuple-at-a-time iterator. A
/// single consumer drives every node as
/// `start` -> (`advance` -> `values`)* -> `close`, and must call `close`
/// exactly once on every node it built, whatever the outcome of the
/// other calls.
pub trait RowSource: Debug + Display {
    /// The output columns of this node.
    fn schema(&self) -> &LogicalSchema;

    /// Prepare the node for producing rows.
    fn start(&mut self, ctx: &dyn Context) -> Result<()>;

    /// Move to the next row. Returns false once the node is exhausted.
    fn advance(&mut self, cancel: &dyn CancelChecker) -> Result<bool>;

    /// The row produced by the latest `advance` that returned true.
    fn values(&self) -> Tuple;

    /// Release whatever the node holds. Calling it on a node that never
    /// started, or a second time, does nothing.
    fn close(&mut self) -> Result<()>;

    /// Get a list of children that act as inputs to this node.
    fn children(&self) -> Vec<&dyn RowSource> {
        vec![]
    }
}

pub struct Scheduler {}

impl Scheduler {
    /// Run the row source to completion and collect its rows. The
    /// source is closed on every path; if both running and closing
    /// fail, the error from running is reported.
    pub fn execute(
        ctx: &dyn Context,
        cancel: &dyn CancelChecker,
        source: &mut dyn RowSource,
    ) -> Result<ResultSet> {
        let polled = Self::poll(ctx, cancel, source);
        if let Err(err) = &polled {
            debug!("{} aborted: {}", source, err);
        }
        let closed = source.close();
        let rs = polled?;
        closed?;
        Ok(rs)
    }

    /// Poll the row source until exhausted.
    fn poll(
        ctx: &dyn Context,
        cancel: &dyn CancelChecker,
        source: &mut dyn RowSource,
    ) -> Result<ResultSet> {
        source.start(ctx)?;

        let vector_size = ctx.vector_size();
        let mut rs = ResultSet { schema: source.schema().clone(), rows: vec![] };
        let mut pending = 0;
        while source.advance(cancel)? {
            rs.rows.push(source.values());
            pending += 1;
            if pending >= vector_size {
                trace!("{} yields {} rows", source, pending);
                pending = 0;
            }
        }
        Ok(rs)
    }
}

#[derive(Debug)]
pub struct ResultSet {
    schema: LogicalSchema,
    rows: Vec<Tuple>,
}

impl ResultSet {
    pub fn schema(&self) -> &LogicalSchema {
        &self.schema
    }

    pub fn rows(&self) -> &[Tuple] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn columnar_values_at(&self, col_idx: usize) -> Result<Tuple> {
        self.rows
            .iter()
            .map(|row| {
                row.get(col_idx)
                    .cloned()
                    .ok_or(Error::internal(format!("value at column {} is out of bound", col_idx)))
            })
            .collect::<Result<Vec<Value>>>()
            .map(Tuple::from)
    }
}

impl Display for ResultSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        TabularDisplay::new(&self.schema, &self.rows).fmt(f)
    }
}
