//! Error taxonomy for the ROI engine
//!
//! Every failure is either a problem with the caller's assumptions (a 400-class
//! condition at the HTTP boundary) or an internal computation failure (500-class).

/// Errors produced while normalizing assumptions or computing a projection
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RoiError {
    /// Input has the wrong shape or a value outside its allowed range
    #[error("invalid assumptions: {field}: {reason}")]
    InvalidAssumptions {
        field: String,
        reason: String,
    },

    /// The engine produced a non-finite figure
    #[error("computation error: {0}")]
    Computation(String),
}

impl RoiError {
    pub fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAssumptions {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// HTTP status the transport layer should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            RoiError::InvalidAssumptions { .. } => 400,
            RoiError::Computation(_) => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, RoiError>;
