//! # Persistence Errors
//!
//! Error types cho persistence layer, wrapping sqlx errors.
//! Chi tiết driver không leak ra ngoài message; caller chỉ thấy entity + id.

use thiserror::Error;

/// Persistence layer errors
#[derive(Debug, Error)]
pub enum PersistenceError {
    // === Database errors ===
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    // === Ledger errors ===
    #[error("Insufficient balance for user {user_id}: need {needed}")]
    InsufficientBalance { user_id: i64, needed: i64 },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    // === Configuration errors ===
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type alias cho PersistenceError
pub type PersistenceResult<T> = Result<T, PersistenceError>;

impl PersistenceError {
    /// Tạo NotFound error
    pub fn not_found(entity: &str, id: impl ToString) -> Self {
        Self::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    /// Kiểm tra có phải lỗi not found không
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Kiểm tra có phải lỗi insufficient balance không
    pub fn is_insufficient_balance(&self) -> bool {
        matches!(self, Self::InsufficientBalance { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = PersistenceError::not_found("User", 17);
        assert_eq!(err.to_string(), "Record not found: User with id 17");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_insufficient_balance_check() {
        let err = PersistenceError::InsufficientBalance {
            user_id: 1,
            needed: 50,
        };
        assert!(err.is_insufficient_balance());
        assert!(!err.is_not_found());
    }
}
