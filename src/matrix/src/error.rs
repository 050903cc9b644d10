use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatrixError {
    #[error("Failed to instantiate threadpool")]
    BuildThreadPool(#[source] rayon::ThreadPoolBuildError),

    #[error("Batch size must be strictly positive")]
    ZeroBatchSize,

    #[error("Expected {expected} genotype calls at line {line}, found {found}")]
    CallCount{line: u64, expected: usize, found: usize},
}
