use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    /// Missing or malformed input. The caller should re-prompt.
    #[error("Validation: {0}")]
    Validation(String),

    /// The acting user's role does not permit the operation.
    #[error("Forbidden: {0}")]
    Authorization(String),

    /// A state-machine or billing rule was violated.
    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Insufficient stock for {item}: available {available}, requested {requested}")]
    InsufficientStock {
        item: String,
        available: f64,
        requested: f64,
    },

    #[error("Already exists: {0}")]
    Conflict(String),

    /// Transactional commit failed. The whole operation was rolled back and
    /// is safe to retry.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl DomainError {
    /// Whether this error is likely transient (e.g. DB connection lost)
    /// and the operation may succeed if retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::Persistence(_))
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        let msg = e.to_string();
        if msg.contains("UNIQUE") || msg.contains("duplicate") {
            DomainError::Conflict(msg)
        } else {
            DomainError::Persistence(msg)
        }
    }
}

impl From<bcrypt::BcryptError> for DomainError {
    fn from(e: bcrypt::BcryptError) -> Self {
        DomainError::Persistence(format!("password hashing failed: {e}"))
    }
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
