use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Failed to parse '{0}' into a valid nucleotide (expected one of A, C, G, T)")]
pub struct ParseNucleotideError(pub char);
