use std::fmt::Display;
use std::fmt::Formatter;

use config::ConfigError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A construct that is not allowed in the clause being bound,
    /// e.g., an aggregate in FROM.
    Binding(String),
    /// The resolved static type is not the one the clause requires.
    TypeMismatch(String),
    /// Name resolution or type inference failure reported by the analyzer.
    Analysis(String),
    /// Evaluating a bound expression failed.
    Evaluation(String),
    GeneratorStart(String),
    GeneratorAdvance(String),
    /// Cooperative cancellation was observed.
    Cancelled,
    Internal(String),
}

impl Error {
    pub fn binding(msg: impl Into<String>) -> Self {
        Error::Binding(msg.into())
    }

    pub fn type_mismatch(msg: impl Into<String>) -> Self {
        Error::TypeMismatch(msg.into())
    }

    pub fn analysis(msg: impl Into<String>) -> Self {
        Error::Analysis(msg.into())
    }

    pub fn evaluation(msg: impl Into<String>) -> Self {
        Error::Evaluation(msg.into())
    }

    pub fn generator_start(msg: impl Into<String>) -> Self {
        Error::GeneratorStart(msg.into())
    }

    pub fn generator_advance(msg: impl Into<String>) -> Self {
        Error::GeneratorAdvance(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Error::Internal(msg.into())
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Binding(s)
            | Error::TypeMismatch(s)
            | Error::Analysis(s)
            | Error::Evaluation(s)
            | Error::GeneratorStart(s)
            | Error::GeneratorAdvance(s)
            | Error::Internal(s) => {
                write!(f, "{}", s)
            }
            Error::Cancelled => write!(f, "query execution canceled"),
        }
    }
}

impl std::error::Error for Error {}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Error::Internal(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Internal(err.to_string())
    }
}
