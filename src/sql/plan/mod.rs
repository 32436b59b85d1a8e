pub mod analyzer;
pub mod binder;
pub mod schema;
