//! Canonical hóa tham số và ký HMAC-SHA512.
//!
//! Chuỗi ký phải giống hệt nhau ở cả hai chiều (tạo URL và kiểm tra callback):
//! bỏ giá trị rỗng, sort key theo thứ tự byte, `key=urlencode(value)` nối bằng `&`.

use hmac::{Hmac, Mac};
use sha2::Sha512;
use std::collections::BTreeMap;

type HmacSha512 = Hmac<Sha512>;

/// Dựng chuỗi canonical từ map tham số.
///
/// BTreeMap đảm bảo thứ tự key theo byte; thứ tự insert không bao giờ
/// ảnh hưởng kết quả. Entry có giá trị rỗng bị loại trước khi ký.
pub fn canonical_query(params: &BTreeMap<String, String>) -> String {
    params
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// HMAC-SHA512 của `data` với `secret`, trả về hex lowercase.
pub fn hmac_sha512_hex(secret: &str, data: &str) -> String {
    // HMAC chấp nhận key mọi độ dài nên new_from_slice không thể fail
    let mut mac =
        HmacSha512::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(data.as_bytes());
    hex::encode(mac.finalize().into_bytes())
}

/// Chữ ký của một bộ tham số: canonical hóa rồi ký.
pub fn sign_params(params: &BTreeMap<String, String>, secret: &str) -> String {
    hmac_sha512_hex(secret, &canonical_query(params))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_canonical_sorted_and_encoded() {
        let p = params(&[
            ("vnp_TxnRef", "ORDER123"),
            ("vnp_Amount", "10000000"),
            ("vnp_OrderInfo", "Thanh toan don hang ORDER123"),
        ]);
        assert_eq!(
            canonical_query(&p),
            "vnp_Amount=10000000&vnp_OrderInfo=Thanh%20toan%20don%20hang%20ORDER123&vnp_TxnRef=ORDER123"
        );
    }

    #[test]
    fn test_canonical_skips_empty_values() {
        let p = params(&[("vnp_Amount", "100"), ("vnp_BankCode", "")]);
        assert_eq!(canonical_query(&p), "vnp_Amount=100");
    }

    #[test]
    fn test_sign_deterministic_and_order_independent() {
        // BTreeMap sort key nên hai thứ tự insert khác nhau cho cùng chữ ký
        let mut a = BTreeMap::new();
        a.insert("vnp_TxnRef".to_string(), "ORDER123".to_string());
        a.insert("vnp_Amount".to_string(), "10000000".to_string());

        let mut b = BTreeMap::new();
        b.insert("vnp_Amount".to_string(), "10000000".to_string());
        b.insert("vnp_TxnRef".to_string(), "ORDER123".to_string());

        assert_eq!(sign_params(&a, "secret"), sign_params(&b, "secret"));
        assert_eq!(sign_params(&a, "secret"), sign_params(&a, "secret"));
    }

    #[test]
    fn test_sign_sensitive_to_secret_and_value() {
        let p = params(&[("vnp_Amount", "100")]);
        let base = sign_params(&p, "secret");
        assert_ne!(base, sign_params(&p, "secreT"));

        let changed = params(&[("vnp_Amount", "101")]);
        assert_ne!(base, sign_params(&changed, "secret"));
    }

    #[test]
    fn test_hex_digest_shape() {
        let digest = hmac_sha512_hex("key", "data");
        assert_eq!(digest.len(), 128);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(digest, digest.to_lowercase());
    }
}
