use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenotypeReaderError {
    #[error("Failed to open genotype file '{0}'")]
    OpenFile(String, #[source] std::io::Error),

    #[error("Failed to parse genotype file header")]
    Header(#[source] csv::Error),

    #[error("Failed to read genotype record")]
    Record(#[source] csv::Error),

    #[error("Invalid sample layout: stride must be strictly positive")]
    ZeroStride,

    #[error("No sample column found at offset {offset} (header contains {width} fields)")]
    NoSamples{offset: usize, width: usize},

    #[error("Malformed genotype row at line {line}: expected {expected} fields, found {found}")]
    MalformedRow{line: u64, expected: usize, found: usize},
}
