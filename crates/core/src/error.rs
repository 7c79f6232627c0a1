//! # Error Module
//!
//! Định nghĩa các domain errors cho Bookswap sử dụng thiserror.

use thiserror::Error;

/// Core domain errors.
///
/// Các lỗi nghiệp vụ cốt lõi, không liên quan đến infrastructure.
#[derive(Debug, Error)]
pub enum CoreError {
    // === Point errors ===
    #[error("Insufficient balance: need {needed}, available {available}")]
    InsufficientBalance { needed: i64, available: i64 },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    // === Lookup errors ===
    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("Cart not found: {0}")]
    CartNotFound(String),

    // === Validation errors ===
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid ID format: {0}")]
    InvalidIdFormat(String),

    #[error("Unknown cart status: {0}")]
    UnknownCartStatus(String),
}

/// Result type alias với CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Kiểm tra có phải lỗi insufficient balance không
    pub fn is_insufficient_balance(&self) -> bool {
        matches!(self, CoreError::InsufficientBalance { .. })
    }

    /// Kiểm tra có phải lỗi not found không
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::UserNotFound(_) | CoreError::BookNotFound(_) | CoreError::CartNotFound(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::InsufficientBalance {
            needed: 100,
            available: 49,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient balance: need 100, available 49"
        );

        let err = CoreError::UserNotFound("17".to_string());
        assert_eq!(err.to_string(), "User not found: 17");
    }

    #[test]
    fn test_error_checks() {
        let err = CoreError::InsufficientBalance {
            needed: 100,
            available: 50,
        };
        assert!(err.is_insufficient_balance());

        let err = CoreError::BookNotFound("3".to_string());
        assert!(err.is_not_found());
        assert!(!err.is_insufficient_balance());
    }
}
