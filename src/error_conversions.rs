//! Error conversion glue between the domain and the service layer.
//!
//! The domain layer must not depend on service error types, so the
//! conversion lives here and is only compiled with the `app` feature.

use crate::domain::types::TypeConstraintError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::TypeConstraint(val.to_string())
    }
}
