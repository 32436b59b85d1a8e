pub mod execution;
pub mod format;
pub mod parser;
pub mod plan;
pub mod udf;
