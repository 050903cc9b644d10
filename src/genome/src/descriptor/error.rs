use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseDescriptorError {
    #[error("Invalid SNP descriptor '{0}'. Expected a bracketed pair such as '[A/G]'")]
    Format(String),

    #[error("Unsupported SNP descriptor '{0}'")]
    UnknownPair(String),
}
