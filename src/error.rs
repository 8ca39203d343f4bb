use thiserror::Error;

use crate::models::PlantId;

/// Errors returned by [`PlantStore`](crate::store::PlantStore) operations.
///
/// Every failing operation leaves the store exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// A field was blank or held a value outside its recognized set.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
    /// No plant with this id is held by the store.
    #[error("plant {0} not found")]
    NotFound(PlantId),
}

impl StoreError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
