use thiserror::Error;

#[derive(Error, Debug)]
pub enum ManifestReaderError {
    #[error("Failed to open manifest file '{0}'")]
    OpenFile(String, #[source] std::io::Error),

    #[error("Failed to read manifest")]
    Io(#[source] std::io::Error),

    #[error("Manifest contains a [Heading] section, but no subsequent [Assay] section")]
    MissingAssaySection,

    #[error("Failed to parse manifest header")]
    Header(#[source] csv::Error),

    #[error("Failed to read manifest record")]
    Record(#[source] csv::Error),

    #[error("Malformed manifest row at line {line}: expected {expected} fields, found {found}")]
    MalformedRow{line: u64, expected: usize, found: usize},
}
