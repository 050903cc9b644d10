mod column;
pub use column::{ColumnSpec, ColumnError};

mod sample;
pub use sample::SampleRecord;

mod manifest_reader;
pub use manifest_reader::{ManifestReader, ManifestRow, ManifestReaderError};

mod genotype_reader;
pub use genotype_reader::{GenotypeReader, GenotypeRow, MatrixLayout, GenotypeReaderError};

use std::io::Read;

/// Shared `csv` configuration of both input tables. Row widths are validated by the readers
/// themselves, in order to report line numbers and handle trailing manifest sections.
fn csv_reader<R: Read>(source: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source)
}
