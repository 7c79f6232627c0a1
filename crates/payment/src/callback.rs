//! Kiểm tra callback từ VNPay.
//!
//! Gateway redirect về return URL kèm toàn bộ tham số và `vnp_SecureHash`.
//! Phía server re-derive chữ ký trên các trường còn lại và so sánh
//! constant-time; thiếu hash hay hash sai đều là invalid, không bao giờ panic.

use crate::canonical::sign_params;
use crate::error::{PaymentError, PaymentResult};
use crate::request::{SECURE_HASH_FIELD, SECURE_HASH_TYPE_FIELD};
use std::collections::BTreeMap;
use subtle::ConstantTimeEq;

/// Mã response VNPay báo thanh toán thành công.
pub const RESPONSE_CODE_SUCCESS: &str = "00";

/// Kết quả xử lý một callback đã xác thực.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// Chữ ký đúng; chứa `vnp_ResponseCode` gateway trả về
    Valid { response_code: String },
    /// Chữ ký sai hoặc thiếu
    Invalid,
}

impl CallbackOutcome {
    /// Response code của callback hợp lệ, `SignatureMismatch` nếu không.
    pub fn response_code(self) -> PaymentResult<String> {
        match self {
            CallbackOutcome::Valid { response_code } => Ok(response_code),
            CallbackOutcome::Invalid => Err(PaymentError::SignatureMismatch),
        }
    }
}

/// Kiểm tra chữ ký của bộ tham số callback.
///
/// Trả về `true` chỉ khi `vnp_SecureHash` khớp chữ ký re-derive trên các
/// trường còn lại (bỏ cả `vnp_SecureHashType`). So sánh không phân biệt
/// hoa thường và constant-time.
pub fn validate_callback<'a, I>(params: I, secret: &str) -> bool
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut signed: BTreeMap<String, String> = BTreeMap::new();
    let mut received_hash: Option<String> = None;

    for (key, value) in params {
        if key == SECURE_HASH_FIELD {
            received_hash = Some(value.to_string());
        } else if key != SECURE_HASH_TYPE_FIELD {
            signed.insert(key.to_string(), value.to_string());
        }
    }

    let received = match received_hash {
        Some(hash) if !hash.is_empty() => hash.to_lowercase(),
        _ => return false,
    };

    let expected = sign_params(&signed, secret);
    expected.as_bytes().ct_eq(received.as_bytes()).unwrap_u8() == 1
}

/// Xác thực callback rồi lấy response code.
pub fn process_callback<'a, I>(params: I, secret: &str) -> CallbackOutcome
where
    I: IntoIterator<Item = (&'a str, &'a str)> + Clone,
{
    if !validate_callback(params.clone(), secret) {
        return CallbackOutcome::Invalid;
    }

    let response_code = params
        .into_iter()
        .find(|(key, _)| *key == "vnp_ResponseCode")
        .map(|(_, value)| value.to_string())
        .unwrap_or_default();

    CallbackOutcome::Valid { response_code }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonical::sign_params;

    const SECRET: &str = "SECRETKEY";

    fn signed_params() -> Vec<(String, String)> {
        let mut fields: BTreeMap<String, String> = BTreeMap::new();
        fields.insert("vnp_Amount".to_string(), "10000000".to_string());
        fields.insert("vnp_TxnRef".to_string(), "ORDER123".to_string());
        fields.insert("vnp_ResponseCode".to_string(), "00".to_string());
        fields.insert("vnp_TmnCode".to_string(), "TESTTMN1".to_string());

        let hash = sign_params(&fields, SECRET);
        let mut out: Vec<(String, String)> = fields.into_iter().collect();
        out.push((SECURE_HASH_FIELD.to_string(), hash));
        out
    }

    fn as_refs(pairs: &[(String, String)]) -> Vec<(&str, &str)> {
        pairs
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }

    #[test]
    fn test_sign_then_validate_roundtrip() {
        let pairs = signed_params();
        assert!(validate_callback(as_refs(&pairs), SECRET));
    }

    #[test]
    fn test_validate_is_insertion_order_independent() {
        let mut pairs = signed_params();
        pairs.reverse();
        assert!(validate_callback(as_refs(&pairs), SECRET));
    }

    #[test]
    fn test_uppercase_hash_accepted() {
        let mut pairs = signed_params();
        for (key, value) in pairs.iter_mut() {
            if key == SECURE_HASH_FIELD {
                *value = value.to_uppercase();
            }
        }
        assert!(validate_callback(as_refs(&pairs), SECRET));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let pairs = signed_params();
        assert!(!validate_callback(as_refs(&pairs), "SECRETKEz"));
    }

    #[test]
    fn test_tampered_value_rejected() {
        let mut pairs = signed_params();
        for (key, value) in pairs.iter_mut() {
            if key == "vnp_Amount" {
                *value = "10000001".to_string();
            }
        }
        assert!(!validate_callback(as_refs(&pairs), SECRET));
    }

    #[test]
    fn test_missing_hash_is_invalid_not_error() {
        let pairs: Vec<(String, String)> = signed_params()
            .into_iter()
            .filter(|(key, _)| key != SECURE_HASH_FIELD)
            .collect();
        assert!(!validate_callback(as_refs(&pairs), SECRET));
    }

    #[test]
    fn test_hash_type_field_excluded_from_signing() {
        let mut pairs = signed_params();
        pairs.push((SECURE_HASH_TYPE_FIELD.to_string(), "SHA512".to_string()));
        assert!(validate_callback(as_refs(&pairs), SECRET));
    }

    #[test]
    fn test_process_callback_outcomes() {
        let pairs = signed_params();
        assert_eq!(
            process_callback(as_refs(&pairs), SECRET),
            CallbackOutcome::Valid {
                response_code: "00".to_string()
            }
        );

        assert_eq!(
            process_callback(as_refs(&pairs), "wrong"),
            CallbackOutcome::Invalid
        );
    }

    #[test]
    fn test_response_code_accessor() {
        let outcome = CallbackOutcome::Valid {
            response_code: "00".to_string(),
        };
        assert_eq!(outcome.response_code().unwrap(), "00");

        assert!(matches!(
            CallbackOutcome::Invalid.response_code(),
            Err(PaymentError::SignatureMismatch)
        ));
    }
}
