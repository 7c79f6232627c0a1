//! # User Module
//!
//! Định nghĩa User và Gender cho hệ thống trao đổi sách cũ.
//! Mỗi User có một số dư `point` (integer) dùng để mua bán sách.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Giới tính của người dùng.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Trả về code string cho DB
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    /// Parse từ string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            _ => None,
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Người dùng của hệ thống.
///
/// `point` là số dư điểm, chỉ được thay đổi qua Point Ledger.
/// `dob` luôn được serialize dưới dạng ISO date (`YYYY-MM-DD`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    /// Trạng thái tài khoản (mặc định "4" khi đăng ký)
    pub status: String,
    /// Số căn cước công dân
    pub cccd: String,
    /// Ngày sinh
    pub dob: NaiveDate,
    pub gender: String,
    /// Nơi sinh (để trống khi đăng ký)
    pub pob: String,
    pub address: String,
    /// Số dư điểm hiện tại
    pub point: i64,
    /// Device token cho push notification
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Thông tin đăng ký tài khoản mới.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub cccd: String,
    pub dob: NaiveDate,
    pub gender: String,
    pub address: String,
    pub point: i64,
    pub token: String,
}

impl NewUser {
    /// Trạng thái mặc định khi đăng ký
    pub const DEFAULT_STATUS: &'static str = "4";

    /// Kiểm tra các trường bắt buộc trước khi insert
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(format!("invalid email: {}", self.email));
        }
        if self.password.is_empty() {
            return Err("password must not be empty".to_string());
        }
        if self.point < 0 {
            return Err(format!("initial point must not be negative: {}", self.point));
        }
        Ok(())
    }
}

impl User {
    /// Ngày sinh dưới dạng ISO string cho client
    pub fn dob_iso(&self) -> String {
        self.dob.format("%Y-%m-%d").to_string()
    }
}
