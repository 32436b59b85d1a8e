use std::fmt::Display;
use std::fmt::Formatter;
use std::ops::Deref;
use std::sync::Arc;

use crate::catalog::r#type::DataType;
use crate::catalog::r#type::TableType;

/// A reference counted [`Field`]
pub type FieldRef = Arc<Field>;

/// Describes a single column in a [`LogicalSchema`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Field {
    pub name: String,
    pub datatype: DataType,
}

impl Field {
    pub fn new(name: impl Into<String>, datatype: DataType) -> Self {
        Self { name: name.into(), datatype }
    }
}

impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.name, self.datatype)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Fields(Arc<[FieldRef]>);

impl Fields {
    /// Returns a new empty [`Fields`]
    pub fn empty() -> Self {
        Self(Arc::new([]))
    }

    pub fn find(&self, name: &str) -> Option<(usize, &FieldRef)> {
        self.0.iter().enumerate().find(|(_, c)| c.name == name)
    }
}

impl FromIterator<Field> for Fields {
    fn from_iter<T: IntoIterator<Item = Field>>(iter: T) -> Self {
        iter.into_iter().map(Arc::new).collect()
    }
}

impl FromIterator<FieldRef> for Fields {
    fn from_iter<T: IntoIterator<Item = FieldRef>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<Vec<Field>> for Fields {
    fn from(value: Vec<Field>) -> Self {
        value.into_iter().collect()
    }
}

impl Deref for Fields {
    type Target = [FieldRef];

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// The ordered output columns of a plan node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogicalSchema {
    fields: Fields,
}

impl LogicalSchema {
    pub fn new(fields: Fields) -> Self {
        Self { fields }
    }

    pub fn empty() -> Self {
        Self { fields: Fields::empty() }
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl From<&TableType> for LogicalSchema {
    /// Pairs each label of the table type with its column type, in
    /// declaration order.
    fn from(table: &TableType) -> Self {
        let fields = table
            .labels()
            .iter()
            .zip(table.cols().iter())
            .map(|(label, col)| Field::new(label.clone(), col.clone()))
            .collect::<Fields>();
        Self::new(fields)
    }
}

impl From<Vec<Field>> for LogicalSchema {
    fn from(fields: Vec<Field>) -> Self {
        Self::new(Fields::from(fields))
    }
}

impl Display for LogicalSchema {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, field) in self.fields.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", field)?;
        }
        write!(f, "]")
    }
}
