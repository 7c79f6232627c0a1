//! SQLite persistence backend

pub mod ledger;
pub mod repos;
pub mod schema;

pub use ledger::PointLedger;
pub use repos::{
    create_pool, create_schema, init_database, BookRepo, CartRepo, ImageRepo, TransactionRepo,
    TypeBookRepo, UserRepo,
};
pub use schema::{
    BookListingRow, BookRow, CartItemDetailRow, CartRow, CartSummaryRow, ImageRow, TransactionRow,
    TypeBookRow, UserRow,
};
