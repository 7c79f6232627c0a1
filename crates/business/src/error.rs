//! Business layer errors
//!
//! thiserror cho từng loại lỗi nghiệp vụ, anyhow để aggregate ở boundary.

use thiserror::Error;

/// Business operation errors
#[derive(Debug, Error)]
pub enum BusinessError {
    // === Validation errors ===
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Insufficient points for user {user_id}: need {needed}")]
    InsufficientPoints { user_id: i64, needed: i64 },

    // === Auth errors ===
    #[error("Invalid email or password")]
    InvalidCredentials,

    // === Not found errors ===
    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("Book not found: {0}")]
    BookNotFound(i64),

    #[error("Cart not found: {0}")]
    CartNotFound(i64),

    #[error("Unknown cart status: {0}")]
    UnknownCartStatus(String),

    // === Wrapped errors ===
    #[error("Persistence error: {0}")]
    Persistence(#[from] bookswap_persistence::PersistenceError),

    #[error("Core error: {0}")]
    Core(#[from] bookswap_core::CoreError),

    #[error("Payment error: {0}")]
    Payment(#[from] bookswap_payment::PaymentError),
}

/// Result type alias for business operations
pub type BusinessResult<T> = anyhow::Result<T>;

impl BusinessError {
    /// Map lỗi persistence của một lần debit sang lỗi nghiệp vụ
    pub fn from_debit(err: bookswap_persistence::PersistenceError, user_id: i64, needed: i64) -> Self {
        if err.is_insufficient_balance() {
            Self::InsufficientPoints { user_id, needed }
        } else {
            Self::Persistence(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_points_display() {
        let err = BusinessError::InsufficientPoints {
            user_id: 3,
            needed: 120,
        };
        assert!(err.to_string().contains("user 3"));
        assert!(err.to_string().contains("120"));
    }

    #[test]
    fn test_from_debit_maps_insufficient() {
        let inner = bookswap_persistence::PersistenceError::InsufficientBalance {
            user_id: 3,
            needed: 120,
        };
        let err = BusinessError::from_debit(inner, 3, 120);
        assert!(matches!(err, BusinessError::InsufficientPoints { .. }));

        let inner = bookswap_persistence::PersistenceError::not_found("User", 3);
        let err = BusinessError::from_debit(inner, 3, 120);
        assert!(matches!(err, BusinessError::Persistence(_)));
    }
}
