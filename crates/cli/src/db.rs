//! Database initialization and status

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use std::path::Path;

/// Initialize the database with schema and seed data
pub async fn init_database(db_path: &Path, force: bool) -> Result<()> {
    if force && db_path.exists() {
        std::fs::remove_file(db_path).context("Failed to remove existing database")?;
        println!("🗑️  Removed existing database");
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());
    // init_database tạo file nếu chưa có và chạy create_schema
    let pool = bookswap_persistence::init_database(&db_url)
        .await
        .context("Failed to initialize database")?;

    seed_data(&pool).await?;

    pool.close().await;
    Ok(())
}

/// Show database status
pub async fn show_status(db_path: &Path) -> Result<()> {
    if !db_path.exists() {
        println!("❌ Database not found at {:?}", db_path);
        println!("   Run 'bookswap init' to create the database");
        return Ok(());
    }

    let pool = connect(db_path).await?;

    println!("📊 Database Status");
    println!("   Path: {:?}", db_path);
    println!();

    for (label, table) in [
        ("Users:       ", "users"),
        ("Type books:  ", "type_books"),
        ("Books:       ", "book"),
        ("Carts:       ", "cart"),
        ("Transactions:", "transactions"),
        ("Images:      ", "images"),
    ] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or((0,));
        println!("   {} {}", label, count.0);
    }

    pool.close().await;
    Ok(())
}

/// Seed reference data - danh mục sách mặc định
async fn seed_data(pool: &SqlitePool) -> Result<()> {
    println!("🌱 Seeding reference data...");

    sqlx::query(
        r#"
        INSERT OR IGNORE INTO type_books (id, name_book, type_book, price, image, description)
        VALUES
            (1, 'Đắc Nhân Tâm', 'Kỹ năng sống', 86000, '', 'Dale Carnegie'),
            (2, 'Toán cao cấp tập 1', 'Giáo trình', 55000, '', 'Giáo trình đại học'),
            (3, 'Nhà Giả Kim', 'Văn học', 69000, '', 'Paulo Coelho')
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Connect to database pool
pub async fn connect(db_path: &Path) -> Result<SqlitePool> {
    let db_url = format!("sqlite:{}", db_path.display());
    SqlitePool::connect(&db_url)
        .await
        .context("Failed to connect to database. Run 'bookswap init' first.")
}
