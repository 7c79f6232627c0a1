//! Payment operations - dựng URL thanh toán VNPay và xử lý callback

use crate::error::BusinessResult;
use bookswap_payment::{process_callback, CallbackOutcome, PaymentRequest, VnpayConfig};
use chrono::Utc;
use tracing::{info, warn};

/// Payment Service - wrapper nghiệp vụ quanh crate payment
pub struct PaymentService {
    config: VnpayConfig,
}

impl PaymentService {
    pub fn new(config: VnpayConfig) -> Self {
        Self { config }
    }

    /// Dựng URL redirect đã ký cho một đơn nạp điểm.
    /// `amount` là số tiền VND; crate payment tự nhân 100 theo chuẩn gateway.
    pub fn create_payment_url(
        &self,
        txn_ref: &str,
        amount: i64,
        client_ip: &str,
    ) -> BusinessResult<String> {
        let request =
            PaymentRequest::for_order(&self.config, txn_ref, amount, client_ip, Utc::now())?;
        let url = request.build_payment_url(&self.config.payment_url, &self.config.hash_secret)?;
        info!(txn_ref, amount, "payment url created");
        Ok(url)
    }

    /// Kiểm tra chữ ký callback và trả về kết quả.
    /// Chữ ký sai trả `Invalid`, không bao giờ là error.
    pub fn process_return<'a, I>(&self, params: I) -> CallbackOutcome
    where
        I: IntoIterator<Item = (&'a str, &'a str)> + Clone,
    {
        let outcome = process_callback(params, &self.config.hash_secret);
        match &outcome {
            CallbackOutcome::Valid { response_code } => {
                info!(response_code = %response_code, "payment callback verified");
            }
            CallbackOutcome::Invalid => {
                warn!("payment callback signature mismatch");
            }
        }
        outcome
    }
}
