use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseStrandError {
    #[error("Invalid Illumina strand '{0}'. Expected either 'TOP' or 'BOT'")]
    Illumina(String),

    #[error("Invalid reference strand '{0}'. Expected either '+' or '-'")]
    Reference(String),
}
