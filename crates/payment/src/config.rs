//! Cấu hình gateway VNPay.

use serde::{Deserialize, Serialize};

/// Thông tin kết nối với VNPay: mã merchant, secret ký HMAC và các URL.
///
/// `hash_secret` dùng chung cho cả ký URL đi và kiểm tra callback về.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VnpayConfig {
    /// Mã merchant/terminal do VNPay cấp
    pub tmn_code: String,
    /// Secret ký HMAC-SHA512
    pub hash_secret: String,
    /// URL trang thanh toán (sandbox hoặc production)
    pub payment_url: String,
    /// URL VNPay redirect về sau khi thanh toán
    pub return_url: String,
}

impl VnpayConfig {
    /// Cấu hình sandbox mặc định, secret truyền từ ngoài vào.
    pub fn sandbox(tmn_code: &str, hash_secret: &str, return_url: &str) -> Self {
        Self {
            tmn_code: tmn_code.to_string(),
            hash_secret: hash_secret.to_string(),
            payment_url: "https://sandbox.vnpayment.vn/paymentv2/vpcpay.html".to_string(),
            return_url: return_url.to_string(),
        }
    }
}
