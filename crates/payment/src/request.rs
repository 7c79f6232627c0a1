//! Dựng request thanh toán và URL redirect đã ký.

use crate::canonical::{canonical_query, hmac_sha512_hex};
use crate::config::VnpayConfig;
use crate::error::{PaymentError, PaymentResult};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Các trường bắt buộc theo đặc tả VNPay v2.1.0.
pub const REQUIRED_FIELDS: &[&str] = &[
    "vnp_Version",
    "vnp_Command",
    "vnp_TmnCode",
    "vnp_Amount",
    "vnp_CurrCode",
    "vnp_TxnRef",
    "vnp_OrderInfo",
    "vnp_OrderType",
    "vnp_Locale",
    "vnp_CreateDate",
    "vnp_IpAddr",
    "vnp_ReturnUrl",
];

/// Tên trường chữ ký trong query string.
pub const SECURE_HASH_FIELD: &str = "vnp_SecureHash";

/// Trường phụ ghi loại hash, cũng phải loại khỏi chuỗi ký.
pub const SECURE_HASH_TYPE_FIELD: &str = "vnp_SecureHashType";

/// Bộ tham số thanh toán trước khi ký.
///
/// BTreeMap giữ bất biến: chữ ký không phụ thuộc thứ tự insert.
#[derive(Debug, Clone, Default)]
pub struct PaymentRequest {
    params: BTreeMap<String, String>,
}

impl PaymentRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Dựng request chuẩn cho một đơn hàng: các trường cố định lấy từ config,
    /// thời điểm và IP client do caller cung cấp. Amount nhân 100 (đơn vị nhỏ
    /// nhất của VND theo gateway).
    pub fn for_order(
        config: &VnpayConfig,
        txn_ref: &str,
        amount: i64,
        client_ip: &str,
        created_at: DateTime<Utc>,
    ) -> PaymentResult<Self> {
        if txn_ref.is_empty() {
            return Err(PaymentError::MissingField("vnp_TxnRef"));
        }
        if amount <= 0 {
            return Err(PaymentError::InvalidAmount(amount.to_string()));
        }

        let mut request = Self::new();
        request
            .set("vnp_Version", "2.1.0")
            .set("vnp_Command", "pay")
            .set("vnp_TmnCode", &config.tmn_code)
            .set("vnp_Amount", &(amount * 100).to_string())
            .set("vnp_CurrCode", "VND")
            .set("vnp_TxnRef", txn_ref)
            .set(
                "vnp_OrderInfo",
                &format!("Thanh toan don hang {}", txn_ref),
            )
            .set("vnp_OrderType", "other")
            .set("vnp_Locale", "vn")
            .set("vnp_CreateDate", &created_at.format("%Y%m%d%H%M%S").to_string())
            .set("vnp_IpAddr", client_ip)
            .set("vnp_ReturnUrl", &config.return_url);

        Ok(request)
    }

    /// Gán một tham số, trả về self để chain.
    pub fn set(&mut self, key: &str, value: &str) -> &mut Self {
        self.params.insert(key.to_string(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn params(&self) -> &BTreeMap<String, String> {
        &self.params
    }

    /// Kiểm tra đủ trường bắt buộc và amount là số nguyên dương.
    pub fn validate(&self) -> PaymentResult<()> {
        for field in REQUIRED_FIELDS {
            match self.params.get(*field) {
                Some(value) if !value.is_empty() => {}
                _ => return Err(PaymentError::MissingField(field)),
            }
        }

        let raw_amount = &self.params["vnp_Amount"];
        match raw_amount.parse::<i64>() {
            Ok(amount) if amount > 0 => Ok(()),
            _ => Err(PaymentError::InvalidAmount(raw_amount.clone())),
        }
    }

    /// Dựng URL redirect đã ký: query canonical + `vnp_SecureHash=<hex>`.
    ///
    /// Chuỗi được ký và query string hiển thị dùng cùng một encoding nên
    /// gateway re-derive được chữ ký từ chính URL.
    pub fn build_payment_url(&self, base_url: &str, secret: &str) -> PaymentResult<String> {
        self.validate()?;

        let query = canonical_query(&self.params);
        let secure_hash = hmac_sha512_hex(secret, &query);

        Ok(format!(
            "{}?{}&{}={}",
            base_url, query, SECURE_HASH_FIELD, secure_hash
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sandbox_config() -> VnpayConfig {
        VnpayConfig::sandbox(
            "TESTTMN1",
            "SECRETKEY",
            "https://example.com/payment_return",
        )
    }

    fn sample_request() -> PaymentRequest {
        let created_at = Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap();
        PaymentRequest::for_order(&sandbox_config(), "ORDER123", 100000, "203.0.113.7", created_at)
            .unwrap()
    }

    #[test]
    fn test_for_order_fills_required_fields() {
        let request = sample_request();
        assert!(request.validate().is_ok());
        assert_eq!(request.get("vnp_Version"), Some("2.1.0"));
        assert_eq!(request.get("vnp_Command"), Some("pay"));
        // 100000 VND -> 10000000 đơn vị nhỏ nhất
        assert_eq!(request.get("vnp_Amount"), Some("10000000"));
        assert_eq!(request.get("vnp_CreateDate"), Some("20240315103000"));
        assert_eq!(
            request.get("vnp_OrderInfo"),
            Some("Thanh toan don hang ORDER123")
        );
    }

    #[test]
    fn test_for_order_rejects_bad_input() {
        let config = sandbox_config();
        let now = Utc::now();
        assert!(matches!(
            PaymentRequest::for_order(&config, "", 1000, "1.2.3.4", now),
            Err(PaymentError::MissingField("vnp_TxnRef"))
        ));
        assert!(matches!(
            PaymentRequest::for_order(&config, "ORDER123", 0, "1.2.3.4", now),
            Err(PaymentError::InvalidAmount(_))
        ));
        assert!(matches!(
            PaymentRequest::for_order(&config, "ORDER123", -5, "1.2.3.4", now),
            Err(PaymentError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_validate_missing_field() {
        let mut request = sample_request();
        request.params.remove("vnp_IpAddr");
        assert!(matches!(
            request.validate(),
            Err(PaymentError::MissingField("vnp_IpAddr"))
        ));
    }

    #[test]
    fn test_validate_non_numeric_amount() {
        let mut request = sample_request();
        request.set("vnp_Amount", "abc");
        assert!(matches!(
            request.validate(),
            Err(PaymentError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_build_payment_url_shape() {
        let request = sample_request();
        let url = request
            .build_payment_url(&sandbox_config().payment_url, "SECRETKEY")
            .unwrap();

        assert!(url.starts_with("https://sandbox.vnpayment.vn/paymentv2/vpcpay.html?"));
        assert!(url.contains("vnp_TxnRef=ORDER123"));

        let (_, hash) = url.rsplit_once("vnp_SecureHash=").unwrap();
        assert_eq!(hash.len(), 128);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
