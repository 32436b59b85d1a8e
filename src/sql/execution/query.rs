use std::fmt::Display;
use std::fmt::Formatter;

use crate::access::value::Tuple;
use crate::error::Result;
use crate::sql::execution::context::CancelChecker;
use crate::sql::execution::context::Context;
use crate::sql::execution::RowSource;
use crate::sql::plan::schema::LogicalSchema;

/// Skips the first `skip` rows of its input and yields at most `fetch`
/// rows after that. Stops pulling from the input as soon as the fetch
/// limit is reached, without exhausting it.
#[derive(Debug)]
pub struct LimitExec {
    input: Box<dyn RowSource>,
    skip: u64,
    fetch: Option<u64>,

    // mutable states across multiple advance
    skipped: bool,
    fetched: u64,
    /// The input returned false once, it is never advanced again.
    exhausted: bool,
}

impl LimitExec {
    pub fn new(input: Box<dyn RowSource>, skip: Option<u64>, fetch: Option<u64>) -> Self {
        let skip = skip.unwrap_or(0);
        Self { input, skip, fetch, skipped: skip == 0, fetched: 0, exhausted: false }
    }

    fn skip(&mut self, cancel: &dyn CancelChecker) -> Result<bool> {
        self.skipped = true;
        for _ in 0..self.skip {
            if !self.input.advance(cancel)? {
                self.exhausted = true;
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl RowSource for LimitExec {
    fn schema(&self) -> &LogicalSchema {
        self.input.schema()
    }

    fn start(&mut self, ctx: &dyn Context) -> Result<()> {
        self.input.start(ctx)
    }

    fn advance(&mut self, cancel: &dyn CancelChecker) -> Result<bool> {
        if self.exhausted {
            return Ok(false);
        }
        if let Some(fetch) = self.fetch {
            if self.fetched >= fetch {
                return Ok(false);
            }
        }
        if !self.skipped && !self.skip(cancel)? {
            return Ok(false);
        }
        let more = self.input.advance(cancel)?;
        if more {
            self.fetched += 1;
        } else {
            self.exhausted = true;
        }
        Ok(more)
    }

    fn values(&self) -> Tuple {
        self.input.values()
    }

    fn close(&mut self) -> Result<()> {
        self.input.close()
    }

    fn children(&self) -> Vec<&dyn RowSource> {
        vec![self.input.as_ref()]
    }
}

impl Display for LimitExec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "LimitExec: skip={}, fetch=", self.skip)?;
        match self.fetch {
            Some(fetch) => write!(f, "{}", fetch),
            None => write!(f, "None"),
        }
    }
}
