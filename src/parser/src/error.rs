use thiserror::Error;
use crate::FileEntity;

#[derive(Error, Debug)]
pub enum ParserError{
    #[error("{0} {1} does not exist")]
    MissingFileEntity(FileEntity, String),

    #[error("{1} is not a {0}")]
    InvalidFileEntity(FileEntity, String),

    #[error("Failed to create output directory {0}")]
    CreateOutputDir(String, #[source] std::io::Error),

    #[error("Expected a strictly positive integer, got '{0}'")]
    NotStrictlyPositive(String),

    #[error("Failed to generate an output file prefix. Note that file prefixes are generated from the input genotype filestem")]
    ParseOutputPrefix,

    #[error("Failed to serialize command line arguments")]
    Serialize(#[source] serde_yaml::Error),

    #[error("Unable to serialize arguments into {0}")]
    WriteConfig(String, #[source] std::io::Error),

    #[error("Unable to open configuration file {0}")]
    OpenConfig(String, #[source] std::io::Error),

    #[error("Failed to deserialize command line arguments from {0}")]
    Deserialize(String, #[source] serde_yaml::Error),
}
