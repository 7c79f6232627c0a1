//! CLI command handlers

pub mod cart;
pub mod catalog;
pub mod payment;
pub mod point;
pub mod user;
