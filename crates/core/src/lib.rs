//! # Bookswap Core
//!
//! Domain types cho hệ thống trao đổi sách cũ: User, TypeBook, Book, Cart
//! và số học Point Ledger. Crate này không phụ thuộc infrastructure.

pub mod book;
pub mod cart;
pub mod error;
pub mod point;
pub mod user;

pub use book::{Book, BookListing, BookStatus, NewBook, NewTypeBook, TypeBook};
pub use cart::{Cart, CartItemDetail, CartStatus, CartSummary, CheckoutItem, SellerOrder};
pub use error::{CoreError, CoreResult};
pub use point::{
    parse_receiver_cccd, parse_receiver_list, parse_total_list, split_shares, Share,
    POINTS_PER_CORRECT_ANSWER,
};
pub use user::{Gender, NewUser, User};
