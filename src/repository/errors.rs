use thiserror::Error;

use crate::domain::types::TypeConstraintError;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Identifier space exhausted")]
    IdExhausted,
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<TypeConstraintError> for RepositoryError {
    fn from(val: TypeConstraintError) -> Self {
        RepositoryError::ValidationError(val.to_string())
    }
}
