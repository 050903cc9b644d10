mod error;
pub use error::ColumnError;

use csv::StringRecord;
use parser::ColumnMode;

/// A column an input table must provide, either found by name within the header, or at a fixed
/// 0-based position.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    pub name    : &'static str,
    pub aliases : &'static [&'static str],
    pub position: usize,
}

impl ColumnSpec {
    #[must_use]
    pub const fn new(name: &'static str, aliases: &'static [&'static str], position: usize) -> Self {
        Self{name, aliases, position}
    }

    fn matches(&self, label: &str) -> bool {
        std::iter::once(&self.name)
            .chain(self.aliases)
            .any(|candidate| candidate.eq_ignore_ascii_case(label))
    }

    /// Find the index of this column within `header`.
    ///
    /// # Errors
    /// - `ColumnError::Missing` if no header label matches the column name or its aliases (`Named` mode)
    /// - `ColumnError::OutOfBounds` if the header is too narrow (`Positional` mode)
    pub fn locate(&self, header: &StringRecord, mode: ColumnMode) -> Result<usize, ColumnError> {
        match mode {
            ColumnMode::Named => header.iter()
                .position(|label| self.matches(label))
                .ok_or_else(|| ColumnError::Missing{
                    name : self.name,
                    found: header.iter().map(ToString::to_string).collect()
                }),
            ColumnMode::Positional => match self.position < header.len() {
                true  => Ok(self.position),
                false => Err(ColumnError::OutOfBounds{name: self.name, position: self.position, width: header.len()}),
            }
        }
    }
}
