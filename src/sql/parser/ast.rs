//! The raw, unanalyzed shape of a function call as handed over by the
//! parser. Only the pieces the FROM-clause binder looks at are modeled.

use std::fmt::Display;
use std::fmt::Formatter;

use crate::catalog::r#type::Value;
use crate::sql::format::display_comma_separated;
use crate::sql::format::display_dot_separated;

/// An identifier, decomposed into its value or character data and the quote style.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ident {
    /// The value of the identifier without quotes.
    pub value: String,
    /// Whether the identifier is double-quoted.
    pub double_quoted: bool,
}

impl Ident {
    pub fn new(value: &str) -> Ident {
        Ident { value: value.to_string(), double_quoted: false }
    }
}

impl Display for Ident {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.double_quoted {
            write!(f, "\"{}\"", self.value)
        } else {
            f.write_str(&self.value)
        }
    }
}

/// A name of a function, optionally qualified by its schema,
/// e.g. `generate_series` or `pg_catalog.generate_series`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectName(pub Vec<Ident>);

impl ObjectName {
    pub fn new(name: &str) -> Self {
        Self(name.split('.').map(Ident::new).collect())
    }

    /// The unqualified part of the name.
    pub fn base(&self) -> &str {
        self.0.last().map(|it| it.value.as_str()).unwrap_or_default()
    }

    /// The schema qualifier, if any.
    pub fn schema(&self) -> Option<&str> {
        if self.0.len() < 2 {
            return None;
        }
        Some(self.0[self.0.len() - 2].value.as_str())
    }
}

impl Display for ObjectName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", display_dot_separated(&self.0))
    }
}

/// A function call
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: ObjectName,
    /// The arguments to the function, including any options specified within the
    /// delimiting parentheses.
    pub args: Vec<FunctionArg>,
    /// The `OVER (...)` clause that turns the call into a window function.
    pub over: Option<WindowSpec>,
}

impl Function {
    pub fn new(name: &str, args: Vec<FunctionArg>) -> Self {
        Self { name: ObjectName::new(name), args, over: None }
    }

    pub fn with_over(mut self, over: WindowSpec) -> Self {
        self.over = Some(over);
        self
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, display_comma_separated(&self.args))?;
        if let Some(over) = &self.over {
            write!(f, " OVER ({})", over)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FunctionArg {
    Value(Value),
    /// An unqualified `*`
    Asterisk,
    /// Identifier e.g. column name
    Identifier(Ident),
    Function(Function),
}

impl Display for FunctionArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FunctionArg::Value(v) => write!(f, "{v}"),
            FunctionArg::Asterisk => write!(f, "*"),
            FunctionArg::Identifier(s) => write!(f, "{s}"),
            FunctionArg::Function(func) => write!(f, "{func}"),
        }
    }
}

/// A window specification, i.e., the part inside `OVER (...)`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WindowSpec {
    pub partition_by: Vec<Ident>,
    pub order_by: Vec<Ident>,
}

impl Display for WindowSpec {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut delim = "";
        if !self.partition_by.is_empty() {
            write!(f, "PARTITION BY {}", display_comma_separated(&self.partition_by))?;
            delim = " ";
        }
        if !self.order_by.is_empty() {
            write!(f, "{delim}ORDER BY {}", display_comma_separated(&self.order_by))?;
        }
        Ok(())
    }
}
