//! Error types cho payment gateway.

use thiserror::Error;

/// Lỗi khi dựng hoặc kiểm tra request thanh toán.
#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Signature mismatch on payment callback")]
    SignatureMismatch,
}

/// Result type alias với PaymentError
pub type PaymentResult<T> = Result<T, PaymentError>;
