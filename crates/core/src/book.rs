//! # Book Module
//!
//! Định nghĩa TypeBook (danh mục sách) và Book (tin đăng bán sách cũ).
//! Book tham chiếu TypeBook qua `id_type_book`; chợ sách chỉ hiển thị
//! tin có status Available và quantity > 0.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trạng thái tin đăng sách.
///
/// Lưu trong DB dưới dạng integer: 1 = còn bán, 0 = đã bán.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookStatus {
    Available,
    Sold,
}

impl BookStatus {
    /// Trả về code integer cho DB
    pub fn as_i64(&self) -> i64 {
        match self {
            BookStatus::Available => 1,
            BookStatus::Sold => 0,
        }
    }

    /// Parse từ integer
    pub fn from_i64(v: i64) -> Option<Self> {
        match v {
            1 => Some(BookStatus::Available),
            0 => Some(BookStatus::Sold),
            _ => None,
        }
    }
}

impl fmt::Display for BookStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookStatus::Available => write!(f, "available"),
            BookStatus::Sold => write!(f, "sold"),
        }
    }
}

/// Danh mục sách (bảng `type_books`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeBook {
    pub id: i64,
    pub name_book: String,
    pub type_book: String,
    pub price: i64,
    pub image: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Danh mục sách mới (chưa có id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTypeBook {
    pub name_book: String,
    pub type_book: String,
    pub price: i64,
    pub image: String,
    pub description: String,
}

impl NewTypeBook {
    pub fn validate(&self) -> Result<(), String> {
        if self.name_book.trim().is_empty() {
            return Err("name_book must not be empty".to_string());
        }
        if self.price < 0 {
            return Err(format!("price must not be negative: {}", self.price));
        }
        Ok(())
    }
}

/// Tin đăng bán sách (bảng `book`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub date_purchase: NaiveDate,
    pub price: i64,
    pub description: String,
    pub status: i64,
    pub quantity: i64,
    /// Đường dẫn ảnh tương đối (ví dụ `public/image_book_client/x.jpg`)
    pub image: String,
    pub id_user: i64,
    pub id_type_book: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Tin đăng mới (chưa có id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBook {
    pub date_purchase: NaiveDate,
    pub price: i64,
    pub description: String,
    pub status: i64,
    pub quantity: i64,
    pub image: String,
    pub id_user: i64,
    pub id_type_book: i64,
}

impl NewBook {
    pub fn validate(&self) -> Result<(), String> {
        if self.price < 0 {
            return Err(format!("price must not be negative: {}", self.price));
        }
        if self.quantity < 0 {
            return Err(format!("quantity must not be negative: {}", self.quantity));
        }
        if BookStatus::from_i64(self.status).is_none() {
            return Err(format!("unknown status: {}", self.status));
        }
        Ok(())
    }
}

/// Tin đăng kèm thông tin danh mục, dùng cho màn chợ sách và "sách của tôi".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookListing {
    pub id: i64,
    pub name_book: String,
    pub type_book: String,
    pub date_purchase: NaiveDate,
    pub price: i64,
    pub description: String,
    pub image: String,
    pub id_user: i64,
    pub id_type_book: i64,
    pub status: i64,
    pub quantity: i64,
}
