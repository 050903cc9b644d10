use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ColumnError {
    #[error("Missing required column '{name}' within header. Found: {found:?}")]
    Missing{name: &'static str, found: Vec<String>},

    #[error("Column '{name}' is expected at position {position}, but the header only contains {width} fields")]
    OutOfBounds{name: &'static str, position: usize, width: usize},
}
