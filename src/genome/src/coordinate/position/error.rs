use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Failed to parse physical position '{raw}' into a valid u32: {source}")]
pub struct ParsePositionError {
    pub raw: String,
    pub source: std::num::ParseIntError,
}
