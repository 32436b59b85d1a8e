use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::error::Error;
use crate::error::Result;
use crate::sql::udf::SearchPath;

/// Context provides the evaluation environment for expressions and
/// physical operators.
///
/// It is handed explicitly to whoever needs it, e.g. the analyzer for
/// constant folding and [`GeneratorExec::start`] for evaluating the bound
/// call, so that no operator reads ambient state.
///
/// [`GeneratorExec::start`]: crate::sql::execution::generator::GeneratorExec
pub trait Context {
    /// Returns the configured batch size the scheduler pulls rows in.
    fn vector_size(&self) -> usize;

    /// Returns the schemas used to resolve unqualified names.
    fn search_path(&self) -> &SearchPath;
}

/// Runtime execution context for a single query.
#[derive(Clone, Debug)]
pub struct ExecContext {
    vector_size: usize,
    search_path: SearchPath,
}

impl ExecContext {
    pub fn new(vector_size: usize, search_path: SearchPath) -> Self {
        Self { vector_size: vector_size.max(1), search_path }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(cfg.vector_size, SearchPath::new(cfg.search_path.clone()))
    }
}

impl Context for ExecContext {
    fn vector_size(&self) -> usize {
        self.vector_size
    }

    fn search_path(&self) -> &SearchPath {
        &self.search_path
    }
}

/// A cooperative cancellation signal, polled by row sources.
///
/// `check` must not block; it returns [`Error::Cancelled`] once the
/// query has been abandoned.
pub trait CancelChecker {
    fn check(&self) -> Result<()>;
}

impl CancelChecker for CancellationToken {
    fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(Error::Cancelled);
        }
        Ok(())
    }
}

/// A checker that never reports cancellation, for callers that have
/// no way of abandoning a query.
#[derive(Debug, Clone, Copy, Default)]
pub struct NeverCancel;

impl CancelChecker for NeverCancel {
    fn check(&self) -> Result<()> {
        Ok(())
    }
}
