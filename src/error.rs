use thiserror::Error;

/// Errors raised when sampling or standardization parameters are out of domain.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CltError {
    /// A parameter violates its domain; `field` names the offending input.
    #[error("invalid parameter `{field}`: {reason}")]
    InvalidParameter { field: &'static str, reason: String },
}

impl CltError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        CltError::InvalidParameter {
            field,
            reason: reason.into(),
        }
    }

    /// Name of the parameter that was rejected.
    pub fn field(&self) -> &'static str {
        match self {
            CltError::InvalidParameter { field, .. } => field,
        }
    }
}
