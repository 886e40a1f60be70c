//! Form definitions backing the dashboard dialogs.

use thiserror::Error;
use validator::ValidationErrors;

pub mod leads;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid name")]
    InvalidName,

    #[error("invalid company")]
    InvalidCompany,

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid stage: {0}")]
    InvalidStage(String),
}

impl FormError {
    /// Missing required contact fields. The add dialog declines these silently.
    pub fn is_missing_required(&self) -> bool {
        matches!(
            self,
            FormError::Validation(_)
                | FormError::InvalidName
                | FormError::InvalidCompany
                | FormError::InvalidEmail
        )
    }
}
