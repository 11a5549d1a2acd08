use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by repositories and the unit of work.
///
/// Store failures are classified into one of these kinds and returned
/// unchanged; nothing below the HTTP boundary retries or swallows them.
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: Uuid },

    #[error("{entity} {id} is already deleted")]
    AlreadyDeleted { entity: &'static str, id: Uuid },

    #[error("{entity} {id} is not deleted")]
    NotDeleted { entity: &'static str, id: Uuid },

    #[error("Business rule violation: {0}")]
    BusinessRuleViolation(String),

    #[error("Duplicate key: {0}")]
    DuplicateKey(String),

    #[error("Concurrency conflict: {entity} {id} was modified by another writer")]
    ConcurrencyConflict { entity: &'static str, id: Uuid },

    #[error("A transaction is already active")]
    TransactionAlreadyActive,

    #[error("No active transaction")]
    NoActiveTransaction,

    #[error("Operation cancelled")]
    Cancelled,

    /// A query filter names a column the entity does not have
    #[error("Invalid criteria: {0}")]
    InvalidCriteria(String),

    #[error("Persistence error: {0}")]
    Persistence(String),
}

/// Kind of a [`RepositoryError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    AlreadyDeleted,
    NotDeleted,
    BusinessRuleViolation,
    DuplicateKey,
    ConcurrencyConflict,
    TransactionAlreadyActive,
    NoActiveTransaction,
    Cancelled,
    InvalidCriteria,
    Persistence,
}

impl ErrorKind {
    /// Stable machine-readable code, used when the error crosses the HTTP boundary.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::AlreadyDeleted => "ALREADY_DELETED",
            ErrorKind::NotDeleted => "NOT_DELETED",
            ErrorKind::BusinessRuleViolation => "BUSINESS_RULE_VIOLATION",
            ErrorKind::DuplicateKey => "DUPLICATE_KEY",
            ErrorKind::ConcurrencyConflict => "CONCURRENCY_CONFLICT",
            ErrorKind::TransactionAlreadyActive => "TRANSACTION_ALREADY_ACTIVE",
            ErrorKind::NoActiveTransaction => "NO_ACTIVE_TRANSACTION",
            ErrorKind::Cancelled => "CANCELLED",
            ErrorKind::InvalidCriteria => "INVALID_CRITERIA",
            ErrorKind::Persistence => "PERSISTENCE_ERROR",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl RepositoryError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RepositoryError::NotFound { .. } => ErrorKind::NotFound,
            RepositoryError::AlreadyDeleted { .. } => ErrorKind::AlreadyDeleted,
            RepositoryError::NotDeleted { .. } => ErrorKind::NotDeleted,
            RepositoryError::BusinessRuleViolation(_) => ErrorKind::BusinessRuleViolation,
            RepositoryError::DuplicateKey(_) => ErrorKind::DuplicateKey,
            RepositoryError::ConcurrencyConflict { .. } => ErrorKind::ConcurrencyConflict,
            RepositoryError::TransactionAlreadyActive => ErrorKind::TransactionAlreadyActive,
            RepositoryError::NoActiveTransaction => ErrorKind::NoActiveTransaction,
            RepositoryError::Cancelled => ErrorKind::Cancelled,
            RepositoryError::InvalidCriteria(_) => ErrorKind::InvalidCriteria,
            RepositoryError::Persistence(_) => ErrorKind::Persistence,
        }
    }

    pub fn code(&self) -> &'static str {
        self.kind().code()
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for RepositoryError {
    fn from(error: sqlx::Error) -> Self {
        use sqlx::error::{DatabaseError, ErrorKind as DbErrorKind};

        match error.as_database_error().map(DatabaseError::kind) {
            Some(DbErrorKind::UniqueViolation) => {
                RepositoryError::DuplicateKey(error.to_string())
            }
            Some(DbErrorKind::ForeignKeyViolation) => RepositoryError::BusinessRuleViolation(
                format!("referential constraint failed: {error}"),
            ),
            _ => RepositoryError::Persistence(error.to_string()),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_and_code() {
        let id = Uuid::new_v4();
        let error = RepositoryError::AlreadyDeleted {
            entity: "Customer",
            id,
        };
        assert_eq!(error.kind(), ErrorKind::AlreadyDeleted);
        assert_eq!(error.code(), "ALREADY_DELETED");
        assert_eq!(error.to_string(), format!("Customer {id} is already deleted"));

        assert_eq!(
            RepositoryError::TransactionAlreadyActive.code(),
            "TRANSACTION_ALREADY_ACTIVE"
        );
        assert_eq!(
            RepositoryError::Persistence("disk full".to_string()).kind(),
            ErrorKind::Persistence
        );
        assert_eq!(
            RepositoryError::InvalidCriteria("unknown column 'x'".to_string()).code(),
            "INVALID_CRITERIA"
        );
    }

    #[test]
    fn test_error_kind_display_uses_code() {
        assert_eq!(ErrorKind::ConcurrencyConflict.to_string(), "CONCURRENCY_CONFLICT");
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_row_not_found_is_persistence() {
        let error: RepositoryError = sqlx::Error::RowNotFound.into();
        assert_eq!(error.kind(), ErrorKind::Persistence);

        let error: RepositoryError = sqlx::Error::PoolTimedOut.into();
        assert_eq!(error.kind(), ErrorKind::Persistence);
    }
}
