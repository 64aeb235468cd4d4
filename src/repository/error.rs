use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No car is stored under the identifier.
    NotFound(String),
    /// A car is already stored under the identifier the saved car carried.
    DuplicateKey(String),
    /// Every identifier of the configured length is already in use.
    IdentifiersExhausted { length: usize },
}

impl fmt::Display for RepositoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepositoryError::NotFound(id) => write!(f, "car not found {}", id),
            RepositoryError::DuplicateKey(id) => write!(f, "duplicate car {:?}", id),
            RepositoryError::IdentifiersExhausted { length } => {
                write!(f, "no free car identifier of length {}", length)
            }
        }
    }
}

impl std::error::Error for RepositoryError {}
