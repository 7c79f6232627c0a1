//! Database schema definitions
//!
//! Row types cho sqlx mapping từ SQLite tables. Schema được tạo trong
//! `repos::init_database`.

use bookswap_core::{Book, BookListing, Cart, CartItemDetail, CartSummary, TypeBook, User};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Row type cho bảng `users`
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct UserRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub password: String,
    pub status: String,
    pub cccd: String,
    pub dob: NaiveDate,
    pub gender: String,
    pub pob: String,
    pub address: String,
    pub point: i64,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row type cho bảng `type_books`
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct TypeBookRow {
    pub id: i64,
    pub name_book: String,
    pub type_book: String,
    pub price: i64,
    pub image: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row type cho bảng `book`
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct BookRow {
    pub id: i64,
    pub date_purchase: NaiveDate,
    pub price: i64,
    pub description: String,
    pub status: i64,
    pub quantity: i64,
    pub image: String,
    pub id_user: i64,
    pub id_type_book: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row type cho query chợ sách / sách của tôi (JOIN type_books)
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct BookListingRow {
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

/// Row type cho bảng `cart`
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct CartRow {
    pub id: i64,
    pub status: String,
    pub address: String,
    pub total: i64,
    pub id_user: i64,
    pub id_seller: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row type cho lịch sử đơn hàng (JOIN users lấy tên đối tác)
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct CartSummaryRow {
    pub id: i64,
    pub status: String,
    pub address: String,
    pub total: i64,
    pub counterparty: String,
}

/// Row type cho chi tiết dòng đơn hàng (JOIN book + type_books)
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct CartItemDetailRow {
    pub id: i64,
    pub quantity: i64,
    pub id_book: i64,
    pub date_purchase: NaiveDate,
    pub price: i64,
    pub description: String,
    pub image: String,
    pub name_book: String,
}

/// Row type cho bảng `transactions`
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct TransactionRow {
    pub id: i64,
    pub transaction_date: DateTime<Utc>,
    pub price: i64,
    pub state: String,
    pub id_user: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row type cho bảng `images`
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct ImageRow {
    pub id: i64,
    pub path: String,
    pub status: String,
    pub id_user: i64,
}

// === Conversion implementations ===

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            password: row.password,
            status: row.status,
            cccd: row.cccd,
            dob: row.dob,
            gender: row.gender,
            pob: row.pob,
            address: row.address,
            point: row.point,
            token: row.token,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<TypeBookRow> for TypeBook {
    fn from(row: TypeBookRow) -> Self {
        TypeBook {
            id: row.id,
            name_book: row.name_book,
            type_book: row.type_book,
            price: row.price,
            image: row.image,
            description: row.description,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<BookRow> for Book {
    fn from(row: BookRow) -> Self {
        Book {
            id: row.id,
            date_purchase: row.date_purchase,
            price: row.price,
            description: row.description,
            status: row.status,
            quantity: row.quantity,
            image: row.image,
            id_user: row.id_user,
            id_type_book: row.id_type_book,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<BookListingRow> for BookListing {
    fn from(row: BookListingRow) -> Self {
        BookListing {
            id: row.id,
            name_book: row.name_book,
            type_book: row.type_book,
            date_purchase: row.date_purchase,
            price: row.price,
            description: row.description,
            image: row.image,
            id_user: row.id_user,
            id_type_book: row.id_type_book,
            status: row.status,
            quantity: row.quantity,
        }
    }
}

impl From<CartRow> for Cart {
    fn from(row: CartRow) -> Self {
        Cart {
            id: row.id,
            status: row.status,
            address: row.address,
            total: row.total,
            id_user: row.id_user,
            id_seller: row.id_seller,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<CartSummaryRow> for CartSummary {
    fn from(row: CartSummaryRow) -> Self {
        CartSummary {
            id: row.id,
            status: row.status,
            address: row.address,
            total: row.total,
            counterparty: row.counterparty,
        }
    }
}

impl From<CartItemDetailRow> for CartItemDetail {
    fn from(row: CartItemDetailRow) -> Self {
        CartItemDetail {
            id: row.id,
            quantity: row.quantity,
            id_book: row.id_book,
            date_purchase: row.date_purchase,
            price: row.price,
            description: row.description,
            image: row.image,
            name_book: row.name_book,
        }
    }
}
