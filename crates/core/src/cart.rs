//! # Cart Module
//!
//! Định nghĩa Cart (đơn hàng theo từng người bán) và các kiểu checkout.
//! Một lần checkout có thể sinh nhiều Cart, mỗi Cart thuộc một người bán.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trạng thái đơn hàng.
///
/// Giá trị lưu DB giữ nguyên chuỗi tiếng Việt mà mobile client hiển thị.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CartStatus {
    /// Xác nhận đơn
    Confirmed,
    /// Đang giao
    Delivering,
    /// Đã chuyển - người bán được cộng điểm khi chuyển sang trạng thái này
    Delivered,
    /// Đã hủy
    Cancelled,
}

impl CartStatus {
    /// Trả về chuỗi lưu DB / hiển thị client
    pub fn as_str(&self) -> &'static str {
        match self {
            CartStatus::Confirmed => "Xác nhận đơn",
            CartStatus::Delivering => "Đang giao",
            CartStatus::Delivered => "Đã chuyển",
            CartStatus::Cancelled => "Đã hủy",
        }
    }

    /// Parse từ chuỗi DB
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Xác nhận đơn" => Some(CartStatus::Confirmed),
            "Đang giao" => Some(CartStatus::Delivering),
            "Đã chuyển" => Some(CartStatus::Delivered),
            "Đã hủy" => Some(CartStatus::Cancelled),
            _ => None,
        }
    }

    /// Người bán chỉ được cộng điểm khi đơn đã chuyển
    pub fn credits_seller(&self) -> bool {
        matches!(self, CartStatus::Delivered)
    }
}

impl fmt::Display for CartStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Đơn hàng (bảng `cart`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    pub id: i64,
    pub status: String,
    pub address: String,
    pub total: i64,
    /// Người mua
    pub id_user: i64,
    /// Người bán
    pub id_seller: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Một dòng checkout: sách + số lượng, gom theo người bán.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckoutItem {
    pub id_book: i64,
    pub quantity: i64,
}

/// Nhóm hàng của một người bán trong lần checkout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerOrder {
    pub id_seller: i64,
    pub total: i64,
    pub items: Vec<CheckoutItem>,
}

impl SellerOrder {
    pub fn validate(&self) -> Result<(), String> {
        if self.items.is_empty() {
            return Err(format!("seller {} has no items", self.id_seller));
        }
        if self.total < 0 {
            return Err(format!("total must not be negative: {}", self.total));
        }
        for item in &self.items {
            if item.quantity <= 0 {
                return Err(format!(
                    "quantity must be positive for book {}: {}",
                    item.id_book, item.quantity
                ));
            }
        }
        Ok(())
    }
}

/// Dòng lịch sử đơn hàng (join với bảng users để lấy tên đối tác).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartSummary {
    pub id: i64,
    pub status: String,
    pub address: String,
    pub total: i64,
    /// Tên người bán (lịch sử mua) hoặc người mua (lịch sử bán)
    pub counterparty: String,
}

/// Chi tiết một dòng đơn hàng (join book + type_books).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemDetail {
    pub id: i64,
    pub quantity: i64,
    pub id_book: i64,
    pub date_purchase: NaiveDate,
    pub price: i64,
    pub description: String,
    pub image: String,
    pub name_book: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_status_roundtrip() {
        for status in [
            CartStatus::Confirmed,
            CartStatus::Delivering,
            CartStatus::Delivered,
            CartStatus::Cancelled,
        ] {
            assert_eq!(CartStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(CartStatus::parse("unknown"), None);
    }

    #[test]
    fn test_credits_seller() {
        assert!(CartStatus::Delivered.credits_seller());
        assert!(!CartStatus::Confirmed.credits_seller());
        assert!(!CartStatus::Cancelled.credits_seller());
    }

    #[test]
    fn test_seller_order_validate() {
        let order = SellerOrder {
            id_seller: 2,
            total: 50000,
            items: vec![CheckoutItem {
                id_book: 5,
                quantity: 2,
            }],
        };
        assert!(order.validate().is_ok());

        let empty = SellerOrder {
            id_seller: 2,
            total: 0,
            items: vec![],
        };
        assert!(empty.validate().is_err());

        let bad_qty = SellerOrder {
            id_seller: 2,
            total: 100,
            items: vec![CheckoutItem {
                id_book: 5,
                quantity: 0,
            }],
        };
        assert!(bad_qty.validate().is_err());
    }
}
