use std::fmt::Display;
use std::fmt::Formatter;

use crate::access::value::Tuple;
use crate::catalog::r#type::Value;
use crate::sql::execution::RowSource;
use crate::sql::plan::schema::LogicalSchema;

/// Wraps a `RowSource` for formatting the tree it roots, one node per
/// line, children indented under their parent.
pub struct DisplayableRowSource<'a> {
    inner: &'a dyn RowSource,
}

impl<'a> DisplayableRowSource<'a> {
    pub fn new(inner: &'a dyn RowSource) -> Self {
        Self { inner }
    }

    fn fmt_node(node: &dyn RowSource, indent: usize, f: &mut Formatter<'_>) -> std::fmt::Result {
        if indent > 0 {
            writeln!(f)?;
        }
        write!(f, "{:indent$}{}", "", node, indent = indent * 2)?;
        for child in node.children() {
            Self::fmt_node(child, indent + 1, f)?;
        }
        Ok(())
    }
}

impl<'a> Display for DisplayableRowSource<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Self::fmt_node(self.inner, 0, f)
    }
}

/// Renders rows under their column names as a bordered text table.
pub struct TabularDisplay<'a, 'b> {
    schema: &'a LogicalSchema,
    tuples: &'b [Tuple],
}

impl<'a, 'b> TabularDisplay<'a, 'b> {
    pub fn new(schema: &'a LogicalSchema, tuples: &'b [Tuple]) -> Self {
        Self { schema, tuples }
    }

    fn cell(value: &Value) -> String {
        match value {
            Value::String(s) => s.clone(),
            _ => value.to_string(),
        }
    }

    fn write_border(f: &mut Formatter<'_>, widths: &[usize]) -> std::fmt::Result {
        write!(f, "+")?;
        for width in widths {
            write!(f, "{:-<width$}+", "", width = width + 2)?;
        }
        writeln!(f)
    }

    fn write_row(f: &mut Formatter<'_>, widths: &[usize], cells: &[String]) -> std::fmt::Result {
        write!(f, "|")?;
        for (i, width) in widths.iter().enumerate() {
            let cell = cells.get(i).map(|it| it.as_str()).unwrap_or("");
            write!(f, " {:width$} |", cell, width = width)?;
        }
        writeln!(f)
    }
}

impl<'a, 'b> Display for TabularDisplay<'a, 'b> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.tuples.is_empty() {
            return writeln!(f, "Empty result set");
        }
        let header =
            self.schema.fields().iter().map(|field| field.name.clone()).collect::<Vec<_>>();
        let rows = self
            .tuples
            .iter()
            .map(|tuple| tuple.iter().map(Self::cell).collect::<Vec<_>>())
            .collect::<Vec<_>>();

        // Each column is as wide as its widest cell, header included.
        let widths = header
            .iter()
            .enumerate()
            .map(|(i, name)| {
                rows.iter().filter_map(|row| row.get(i)).map(|it| it.len()).fold(name.len(), usize::max)
            })
            .collect::<Vec<_>>();

        Self::write_border(f, &widths)?;
        Self::write_row(f, &widths, &header)?;
        Self::write_border(f, &widths)?;
        for row in &rows {
            Self::write_row(f, &widths, row)?;
        }
        Self::write_border(f, &widths)
    }
}
