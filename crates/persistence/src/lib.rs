//! # Bookswap Persistence
//!
//! Persistence layer cho hệ thống trao đổi sách cũ: SQLite repositories
//! và Point Ledger. Mọi thay đổi số dư điểm đi qua `PointLedger`; các
//! write operation nhận `&mut SqliteConnection` để tham gia transaction
//! của business layer.

pub mod error;
pub mod sqlite;

pub use error::{PersistenceError, PersistenceResult};
pub use sqlite::{
    create_pool, create_schema, init_database, BookRepo, CartRepo, ImageRepo, PointLedger,
    TransactionRepo, TypeBookRepo, UserRepo,
};
