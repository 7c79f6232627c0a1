//! OTP mail - gửi mã xác thực qua email

use crate::error::{BusinessError, BusinessResult};
use tracing::info;

/// Subject cố định của mail OTP
pub const OTP_SUBJECT: &str = "Code Otp";

/// Cổng gửi mail. Implementation thật nói chuyện với SMTP relay;
/// mặc định ở đây chỉ ghi log, tests dùng mailer ghi lại nội dung.
pub trait Mailer: Send + Sync {
    fn send(&self, to: &str, subject: &str, body: &str) -> BusinessResult<()>;
}

/// Mailer mặc định: ghi mail ra log thay vì gửi thật
pub struct TracingMailer;

impl Mailer for TracingMailer {
    fn send(&self, to: &str, subject: &str, body: &str) -> BusinessResult<()> {
        info!(to, subject, body, "mail dispatched");
        Ok(())
    }
}

/// Gửi mã OTP tới `email`. Thiếu email hoặc code là lỗi validation.
pub fn send_otp(mailer: &dyn Mailer, email: &str, code: &str) -> BusinessResult<()> {
    if email.trim().is_empty() {
        return Err(BusinessError::Validation("email must not be empty".to_string()).into());
    }
    if code.trim().is_empty() {
        return Err(BusinessError::Validation("otp code must not be empty".to_string()).into());
    }

    let body = format!("Mã OTP của bạn là: {code}");
    mailer.send(email, OTP_SUBJECT, &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mailer ghi lại mọi mail đã gửi
    #[derive(Default)]
    struct RecordingMailer {
        sent: Mutex<Vec<(String, String, String)>>,
    }

    impl Mailer for RecordingMailer {
        fn send(&self, to: &str, subject: &str, body: &str) -> BusinessResult<()> {
            self.sent
                .lock()
                .unwrap()
                .push((to.to_string(), subject.to_string(), body.to_string()));
            Ok(())
        }
    }

    #[test]
    fn test_send_otp_formats_message() {
        let mailer = RecordingMailer::default();
        send_otp(&mailer, "user@example.com", "483920").unwrap();

        let sent = mailer.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let (to, subject, body) = &sent[0];
        assert_eq!(to, "user@example.com");
        assert_eq!(subject, "Code Otp");
        assert_eq!(body, "Mã OTP của bạn là: 483920");
    }

    #[test]
    fn test_send_otp_requires_email_and_code() {
        let mailer = RecordingMailer::default();
        assert!(send_otp(&mailer, "", "123456").is_err());
        assert!(send_otp(&mailer, "user@example.com", "  ").is_err());
        assert!(mailer.sent.lock().unwrap().is_empty());
    }
}
