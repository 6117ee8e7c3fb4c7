use thiserror::Error;

/// Core error types for Dentiq domain operations
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid visit state: {0}")]
    InvalidVisitState(String),

    #[error("Invalid staff role: {0}")]
    InvalidStaffRole(String),

    #[error("Invalid invoice status: {0}")]
    InvalidInvoiceStatus(String),

    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Time parsing error: {0}")]
    TimeError(#[from] time::error::Parse),

    #[error("UUID error: {0}")]
    UuidError(#[from] uuid::Error),

    #[error("Invalid entity data: {message}")]
    InvalidEntity { message: String },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl CoreError {
    /// Create a new InvalidVisitState error
    pub fn invalid_visit_state(state: impl Into<String>) -> Self {
        Self::InvalidVisitState(state.into())
    }

    /// Create a new InvalidStaffRole error
    pub fn invalid_staff_role(role: impl Into<String>) -> Self {
        Self::InvalidStaffRole(role.into())
    }

    /// Create a new InvalidInvoiceStatus error
    pub fn invalid_invoice_status(status: impl Into<String>) -> Self {
        Self::InvalidInvoiceStatus(status.into())
    }

    /// Create a new InvalidEntity error
    pub fn invalid_entity(message: impl Into<String>) -> Self {
        Self::InvalidEntity {
            message: message.into(),
        }
    }

    /// Create a new Configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Check if this error is a client error (4xx category)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidVisitState(_)
                | Self::InvalidStaffRole(_)
                | Self::InvalidInvoiceStatus(_)
                | Self::InvalidEntity { .. }
                | Self::JsonError(_)
        )
    }

    /// Check if this error is a server error (5xx category)
    pub fn is_server_error(&self) -> bool {
        !self.is_client_error()
    }
}

pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::invalid_visit_state("SOMEWHERE");
        assert_eq!(err.to_string(), "Invalid visit state: SOMEWHERE");

        let err = CoreError::invalid_entity("missing appointment id");
        assert_eq!(err.to_string(), "Invalid entity data: missing appointment id");
    }

    #[test]
    fn test_error_categories() {
        assert!(CoreError::invalid_visit_state("X").is_client_error());
        assert!(CoreError::invalid_staff_role("X").is_client_error());
        assert!(!CoreError::configuration("bad").is_client_error());
        assert!(CoreError::configuration("bad").is_server_error());
    }
}
