use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
#[error("Invalid chromosome name '{0}'")]
pub struct ParseChromosomeError(pub String);
