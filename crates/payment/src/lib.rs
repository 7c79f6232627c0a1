//! # Bookswap Payment
//!
//! Tích hợp gateway VNPay: dựng URL redirect đã ký HMAC-SHA512 và kiểm tra
//! chữ ký callback trả về. Toàn bộ logic là pure function trên map tham số;
//! không có IO.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use bookswap_payment::{PaymentRequest, VnpayConfig, validate_callback};
//!
//! let config = VnpayConfig::sandbox("TMNCODE", "SECRET", "https://app/return");
//! let request = PaymentRequest::for_order(&config, "ORDER123", 100_000, ip, now)?;
//! let url = request.build_payment_url(&config.payment_url, &config.hash_secret)?;
//!
//! // ... sau khi gateway redirect về:
//! let ok = validate_callback(query_pairs, &config.hash_secret);
//! ```

pub mod callback;
pub mod canonical;
pub mod config;
pub mod error;
pub mod request;

pub use callback::{process_callback, validate_callback, CallbackOutcome, RESPONSE_CODE_SUCCESS};
pub use canonical::{canonical_query, hmac_sha512_hex, sign_params};
pub use config::VnpayConfig;
pub use error::{PaymentError, PaymentResult};
pub use request::{PaymentRequest, REQUIRED_FIELDS, SECURE_HASH_FIELD, SECURE_HASH_TYPE_FIELD};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    /// Ký một URL rồi parse lại query và validate: hai chiều phải khớp nhau.
    #[test]
    fn test_signed_url_roundtrips_through_validator() {
        let config = VnpayConfig::sandbox("TESTTMN1", "SECRETKEY", "https://example.com/return");
        let created_at = Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap();

        let request =
            PaymentRequest::for_order(&config, "ORDER123", 100_000, "203.0.113.7", created_at)
                .unwrap();
        let url = request
            .build_payment_url(&config.payment_url, &config.hash_secret)
            .unwrap();

        let (_, query) = url.split_once('?').unwrap();
        let pairs: Vec<(String, String)> = query
            .split('&')
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap();
                (
                    key.to_string(),
                    urlencoding::decode(value).unwrap().into_owned(),
                )
            })
            .collect();

        let refs: Vec<(&str, &str)> = pairs
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();

        assert!(validate_callback(refs.clone(), &config.hash_secret));
        assert!(!validate_callback(refs, "other-secret"));
    }
}
