use std::fmt::{self, Display, Formatter};

/// Separator between the sample identifier and the field name within GenomeStudio column
/// labels, e.g. `200512345.GType`.
pub const LABEL_SEPARATOR: char = '.';

/// A genotyped individual, as found within the header of a GenomeStudio export.
/// # Fields
/// - `id`    : sample identifier (raw column label, truncated at its first '.')
/// - `column`: 0-based index of the column carrying the genotype calls of this sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleRecord {
    id    : String,
    column: usize,
}

impl SampleRecord {
    /// Instantiate a new `SampleRecord` from a raw column label.
    #[must_use]
    pub fn from_label(label: &str, column: usize) -> Self {
        let id = label.split(LABEL_SEPARATOR).next().unwrap_or(label).trim();
        Self{id: id.to_string(), column}
    }

    /// Return the identifier of the sample.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Return the column index of the sample.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }
}

impl Display for SampleRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.column)
    }
}
