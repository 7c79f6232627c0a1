//! # Bookswap Business
//!
//! Business layer cho hệ thống trao đổi sách cũ: tài khoản, danh mục và
//! tin đăng, đơn hàng, Point Ledger, thanh toán VNPay, ảnh upload và OTP.
//! Mỗi service mượn một `ServiceContext` chứa connection pool.

pub mod accounts;
pub mod catalog;
pub mod error;
pub mod ledger;
pub mod media;
pub mod orders;
pub mod otp;
pub mod payments;
pub mod services;

pub use accounts::AccountService;
pub use catalog::CatalogService;
pub use error::{BusinessError, BusinessResult};
pub use ledger::PointService;
pub use media::{book_image_name, sanitize_file_name, MediaService, UPLOAD_ROOT};
pub use orders::OrderService;
pub use otp::{send_otp, Mailer, TracingMailer, OTP_SUBJECT};
pub use payments::PaymentService;
pub use services::ServiceContext;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::services::ServiceContext;
    use bookswap_core::{NewBook, NewTypeBook, NewUser};
    use bookswap_persistence::init_database;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    /// Database tạm trên đĩa (chia sẻ được giữa các connection của pool)
    pub async fn test_context() -> (TempDir, ServiceContext) {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}/test.db", dir.path().display());
        let pool = init_database(&url).await.unwrap();
        (dir, ServiceContext::new(pool))
    }

    pub fn sample_user(name: &str, point: i64) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: format!("{name}@example.com"),
            password: "secret".to_string(),
            cccd: "123456789012".to_string(),
            dob: NaiveDate::from_ymd_opt(1995, 6, 15).unwrap(),
            gender: "male".to_string(),
            address: "Hà Nội".to_string(),
            point,
            token: String::new(),
        }
    }

    pub fn sample_type_book(name: &str) -> NewTypeBook {
        NewTypeBook {
            name_book: name.to_string(),
            type_book: "Kỹ năng sống".to_string(),
            price: 85_000,
            image: String::new(),
            description: "Bản in 2019".to_string(),
        }
    }

    pub fn sample_book(id_user: i64, id_type_book: i64, price: i64, quantity: i64) -> NewBook {
        NewBook {
            date_purchase: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            price,
            description: "Sách cũ, tình trạng tốt".to_string(),
            status: 1,
            quantity,
            image: String::new(),
            id_user,
            id_type_book,
        }
    }
}
