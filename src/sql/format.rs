use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result;

/// A value that displays a separated list of values.
pub struct DisplaySeparated<'a, T>
where
    T: Display,
{
    slice: &'a [T],
    sep: &'static str,
}

impl<'a, T: Display> Display for DisplaySeparated<'a, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for (i, t) in self.slice.iter().enumerate() {
            if i > 0 {
                f.write_str(self.sep)?;
            }
            t.fmt(f)?;
        }
        Ok(())
    }
}

pub fn display_comma_separated<T>(slice: &[T]) -> DisplaySeparated<'_, T>
where
    T: Display,
{
    DisplaySeparated { slice, sep: ", " }
}

pub fn display_dot_separated<T>(slice: &[T]) -> DisplaySeparated<'_, T>
where
    T: Display,
{
    DisplaySeparated { slice, sep: "." }
}
