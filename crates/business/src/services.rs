//! Service context
//!
//! Mỗi service nghiệp vụ mượn một `ServiceContext` chứa connection pool.

use sqlx::SqlitePool;

/// Context cho các business operations - chứa database access
pub struct ServiceContext {
    pool: SqlitePool,
}

impl ServiceContext {
    /// Tạo context từ pool
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get database pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}
