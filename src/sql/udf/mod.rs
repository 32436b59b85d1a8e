use std::collections::HashMap;

use crate::sql::parser::ast::ObjectName;

/// The family a resolved function belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuncKind {
    /// One value in, one value out, e.g. `upper(s)`.
    Scalar,
    /// Operates on a set of rows, returns one value per group, e.g. `count(*)`.
    Aggregate,
    /// Set-returning, produces zero or more rows per call,
    /// e.g. `generate_series(1, 3)`.
    Generator,
}

/// Ordered list of schemas an unqualified function name is resolved against.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchPath(Vec<String>);

impl SearchPath {
    pub fn new(schemas: Vec<String>) -> Self {
        Self(schemas)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|it| it.as_str())
    }
}

impl From<Vec<&str>> for SearchPath {
    fn from(schemas: Vec<&str>) -> Self {
        Self(schemas.into_iter().map(|it| it.to_string()).collect())
    }
}

/// Function registry, used for name resolution of function calls.
pub trait FuncRegistry: Send + Sync {
    /// Get the kind of the function defined under `schema` with the given name.
    fn lookup(&self, schema: &str, name: &str) -> Option<FuncKind>;

    /// Resolve the kind of the named function. A qualified name is looked up
    /// in its own schema only; an unqualified one is tried against each
    /// schema of the search path in order, first hit wins. Unquoted names
    /// are case-insensitive, double-quoted ones match exactly.
    fn func_kind(&self, name: &ObjectName, search_path: &SearchPath) -> Option<FuncKind> {
        let base = match name.0.last() {
            Some(ident) if ident.double_quoted => ident.value.clone(),
            Some(ident) => ident.value.to_lowercase(),
            None => return None,
        };
        match name.schema() {
            Some(schema) => self.lookup(schema, &base),
            None => search_path.iter().find_map(|schema| self.lookup(schema, &base)),
        }
    }
}

/// A registry backed by a plain map, populated up front.
#[derive(Debug, Default)]
pub struct MemoryFuncRegistry {
    funcs: HashMap<(String, String), FuncKind>,
}

impl MemoryFuncRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(mut self, schema: &str, name: &str, kind: FuncKind) -> Self {
        self.funcs.insert((schema.to_string(), name.to_lowercase()), kind);
        self
    }
}

impl FuncRegistry for MemoryFuncRegistry {
    fn lookup(&self, schema: &str, name: &str) -> Option<FuncKind> {
        self.funcs.get(&(schema.to_string(), name.to_string())).copied()
    }
}
