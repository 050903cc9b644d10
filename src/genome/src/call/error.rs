use thiserror::Error;

use super::MISSING_CALL;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CallError {
    #[error("Invalid genotype call character '{0}'. Expected either 'A' or 'B'")]
    UnknownAllele(char),

    #[error("Invalid genotype call '{0}'. Expected a two-letter AB call, or '{}'", MISSING_CALL)]
    InvalidLength(String),
}
