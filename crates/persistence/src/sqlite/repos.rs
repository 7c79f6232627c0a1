//! Repository implementations cho SQLite
//!
//! CRUD operations cho tất cả các tables. Read queries nhận `&SqlitePool`;
//! write operations nhận `&mut SqliteConnection` để có thể tham gia
//! transaction của caller (`&mut *tx`).

use crate::error::{PersistenceError, PersistenceResult};
use crate::sqlite::schema::*;
use bookswap_core::{NewBook, NewTypeBook, NewUser};
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{SqliteConnection, SqlitePool};
use std::str::FromStr;

// ============================================================================
// User Repository
// ============================================================================

/// Repository cho users table
pub struct UserRepo;

impl UserRepo {
    /// Lấy user theo ID
    pub async fn get_by_id(pool: &SqlitePool, id: i64) -> PersistenceResult<UserRow> {
        sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| PersistenceError::not_found("User", id))
    }

    /// Lấy user theo email + password (login)
    pub async fn get_by_credentials(
        pool: &SqlitePool,
        email: &str,
        password: &str,
    ) -> PersistenceResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT * FROM users WHERE email = ? AND password = ?",
        )
        .bind(email)
        .bind(password)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }

    /// Lấy tất cả users
    pub async fn get_all(pool: &SqlitePool) -> PersistenceResult<Vec<UserRow>> {
        let rows = sqlx::query_as::<_, UserRow>("SELECT * FROM users")
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    /// Lấy tất cả users trừ một id (màn danh bạ chuyển điểm)
    pub async fn get_all_except(
        pool: &SqlitePool,
        excluded_id: i64,
    ) -> PersistenceResult<Vec<UserRow>> {
        let rows = sqlx::query_as::<_, UserRow>("SELECT * FROM users WHERE id <> ?")
            .bind(excluded_id)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    /// Thêm user mới, trả về id
    pub async fn insert(conn: &mut SqliteConnection, user: &NewUser) -> PersistenceResult<i64> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO users
                (name, email, password, status, cccd, dob, gender, pob, address, point, token, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(NewUser::DEFAULT_STATUS)
        .bind(&user.cccd)
        .bind(user.dob)
        .bind(&user.gender)
        .bind("")
        .bind(&user.address)
        .bind(user.point)
        .bind(&user.token)
        .bind(now)
        .bind(now)
        .execute(conn)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Số dư điểm hiện tại
    pub async fn get_point(pool: &SqlitePool, id: i64) -> PersistenceResult<i64> {
        let row: Option<(i64,)> = sqlx::query_as("SELECT point FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?;
        row.map(|(point,)| point)
            .ok_or_else(|| PersistenceError::not_found("User", id))
    }
}

// ============================================================================
// TypeBook Repository
// ============================================================================

/// Repository cho type_books table
pub struct TypeBookRepo;

impl TypeBookRepo {
    /// Lấy tất cả danh mục sách
    pub async fn get_all(pool: &SqlitePool) -> PersistenceResult<Vec<TypeBookRow>> {
        let rows = sqlx::query_as::<_, TypeBookRow>("SELECT * FROM type_books")
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    /// Lấy danh mục theo ID
    pub async fn get_by_id(pool: &SqlitePool, id: i64) -> PersistenceResult<TypeBookRow> {
        sqlx::query_as::<_, TypeBookRow>("SELECT * FROM type_books WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| PersistenceError::not_found("TypeBook", id))
    }

    /// Thêm danh mục mới, trả về id
    pub async fn insert(
        conn: &mut SqliteConnection,
        type_book: &NewTypeBook,
    ) -> PersistenceResult<i64> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO type_books (name_book, type_book, price, image, description, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&type_book.name_book)
        .bind(&type_book.type_book)
        .bind(type_book.price)
        .bind(&type_book.image)
        .bind(&type_book.description)
        .bind(now)
        .bind(now)
        .execute(conn)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Cập nhật danh mục
    pub async fn update(
        conn: &mut SqliteConnection,
        id: i64,
        type_book: &NewTypeBook,
    ) -> PersistenceResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE type_books SET
                name_book = ?,
                type_book = ?,
                price = ?,
                image = ?,
                description = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&type_book.name_book)
        .bind(&type_book.type_book)
        .bind(type_book.price)
        .bind(&type_book.image)
        .bind(&type_book.description)
        .bind(Utc::now())
        .bind(id)
        .execute(conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(PersistenceError::not_found("TypeBook", id));
        }
        Ok(())
    }

    /// Xóa danh mục
    pub async fn delete(conn: &mut SqliteConnection, id: i64) -> PersistenceResult<()> {
        let result = sqlx::query("DELETE FROM type_books WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PersistenceError::not_found("TypeBook", id));
        }
        Ok(())
    }
}

// ============================================================================
// Book Repository
// ============================================================================

/// Repository cho book table (tin đăng)
pub struct BookRepo;

impl BookRepo {
    const LISTING_COLUMNS: &'static str = r#"
        book.id,
        type_books.name_book,
        type_books.type_book,
        book.date_purchase,
        book.price,
        book.description,
        book.image,
        book.id_user,
        book.id_type_book,
        book.status,
        book.quantity
    "#;

    /// Lấy tin đăng theo ID
    pub async fn get_by_id(pool: &SqlitePool, id: i64) -> PersistenceResult<BookRow> {
        sqlx::query_as::<_, BookRow>("SELECT * FROM book WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| PersistenceError::not_found("Book", id))
    }

    /// Tin đăng của chính người dùng (kèm tên danh mục)
    pub async fn get_mine(
        pool: &SqlitePool,
        id_user: i64,
    ) -> PersistenceResult<Vec<BookListingRow>> {
        let sql = format!(
            "SELECT {} FROM book JOIN type_books ON book.id_type_book = type_books.id \
             WHERE book.id_user = ?",
            Self::LISTING_COLUMNS
        );
        let rows = sqlx::query_as::<_, BookListingRow>(&sql)
            .bind(id_user)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    /// Chợ sách: tin còn bán, còn hàng, của người khác
    pub async fn get_market(
        pool: &SqlitePool,
        excluded_user: i64,
    ) -> PersistenceResult<Vec<BookListingRow>> {
        let sql = format!(
            "SELECT {} FROM book JOIN type_books ON book.id_type_book = type_books.id \
             WHERE book.status = 1 AND book.quantity > 0 AND book.id_user != ?",
            Self::LISTING_COLUMNS
        );
        let rows = sqlx::query_as::<_, BookListingRow>(&sql)
            .bind(excluded_user)
            .fetch_all(pool)
            .await?;
        Ok(rows)
    }

    /// Thêm tin đăng mới, trả về id
    pub async fn insert(conn: &mut SqliteConnection, book: &NewBook) -> PersistenceResult<i64> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO book
                (date_purchase, price, description, status, quantity, image, id_user, id_type_book, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(book.date_purchase)
        .bind(book.price)
        .bind(&book.description)
        .bind(book.status)
        .bind(book.quantity)
        .bind(&book.image)
        .bind(book.id_user)
        .bind(book.id_type_book)
        .bind(now)
        .bind(now)
        .execute(conn)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Cập nhật tin đăng (các trường người bán được sửa)
    pub async fn update(
        conn: &mut SqliteConnection,
        id: i64,
        date_purchase: chrono::NaiveDate,
        price: i64,
        description: &str,
        quantity: i64,
    ) -> PersistenceResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE book SET
                date_purchase = ?,
                price = ?,
                description = ?,
                quantity = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(date_purchase)
        .bind(price)
        .bind(description)
        .bind(quantity)
        .bind(Utc::now())
        .bind(id)
        .execute(conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(PersistenceError::not_found("Book", id));
        }
        Ok(())
    }

    /// Xóa tin đăng
    pub async fn delete(conn: &mut SqliteConnection, id: i64) -> PersistenceResult<()> {
        let result = sqlx::query("DELETE FROM book WHERE id = ?")
            .bind(id)
            .execute(conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PersistenceError::not_found("Book", id));
        }
        Ok(())
    }
}

// ============================================================================
// Cart Repository
// ============================================================================

/// Repository cho cart + detail_cart tables
pub struct CartRepo;

impl CartRepo {
    /// Lấy đơn hàng theo ID
    pub async fn get_by_id(pool: &SqlitePool, id: i64) -> PersistenceResult<CartRow> {
        sqlx::query_as::<_, CartRow>("SELECT * FROM cart WHERE id = ?")
            .bind(id)
            .fetch_optional(pool)
            .await?
            .ok_or_else(|| PersistenceError::not_found("Cart", id))
    }

    /// Thêm đơn hàng mới, trả về id
    pub async fn insert(
        conn: &mut SqliteConnection,
        status: &str,
        address: &str,
        total: i64,
        id_user: i64,
        id_seller: i64,
    ) -> PersistenceResult<i64> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO cart (status, address, total, id_user, id_seller, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(status)
        .bind(address)
        .bind(total)
        .bind(id_user)
        .bind(id_seller)
        .bind(now)
        .bind(now)
        .execute(conn)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Thêm một dòng detail_cart
    pub async fn insert_item(
        conn: &mut SqliteConnection,
        quantity: i64,
        id_book: i64,
        id_cart: i64,
    ) -> PersistenceResult<i64> {
        let result = sqlx::query(
            "INSERT INTO detail_cart (quantity, id_book, id_cart) VALUES (?, ?, ?)",
        )
        .bind(quantity)
        .bind(id_book)
        .bind(id_cart)
        .execute(conn)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Cập nhật trạng thái đơn hàng
    pub async fn update_status(
        conn: &mut SqliteConnection,
        id: i64,
        status: &str,
    ) -> PersistenceResult<()> {
        let result = sqlx::query("UPDATE cart SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status)
            .bind(Utc::now())
            .bind(id)
            .execute(conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PersistenceError::not_found("Cart", id));
        }
        Ok(())
    }

    /// Lịch sử mua của buyer (tên đối tác = tên người bán)
    pub async fn get_purchases(
        pool: &SqlitePool,
        id_user: i64,
    ) -> PersistenceResult<Vec<CartSummaryRow>> {
        let rows = sqlx::query_as::<_, CartSummaryRow>(
            r#"
            SELECT cart.id, cart.status, cart.address, cart.total, users.name AS counterparty
            FROM cart JOIN users ON cart.id_seller = users.id
            WHERE cart.id_user = ?
            "#,
        )
        .bind(id_user)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    /// Lịch sử bán của seller (tên đối tác = tên người mua)
    pub async fn get_sales(
        pool: &SqlitePool,
        id_seller: i64,
    ) -> PersistenceResult<Vec<CartSummaryRow>> {
        let rows = sqlx::query_as::<_, CartSummaryRow>(
            r#"
            SELECT cart.id, cart.status, cart.address, cart.total, users.name AS counterparty
            FROM cart JOIN users ON cart.id_user = users.id
            WHERE cart.id_seller = ?
            "#,
        )
        .bind(id_seller)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

    /// Chi tiết các dòng của một đơn hàng
    pub async fn get_items(
        pool: &SqlitePool,
        id_cart: i64,
    ) -> PersistenceResult<Vec<CartItemDetailRow>> {
        let rows = sqlx::query_as::<_, CartItemDetailRow>(
            r#"
            SELECT
                detail_cart.id,
                detail_cart.quantity,
                detail_cart.id_book,
                book.date_purchase,
                book.price,
                book.description,
                book.image,
                type_books.name_book
            FROM detail_cart
            JOIN book ON detail_cart.id_book = book.id
            JOIN type_books ON book.id_type_book = type_books.id
            WHERE detail_cart.id_cart = ?
            "#,
        )
        .bind(id_cart)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }
}

// ============================================================================
// Transaction Repository
// ============================================================================

/// Repository cho transactions table (lịch sử nạp điểm)
pub struct TransactionRepo;

impl TransactionRepo {
    /// Thêm bản ghi giao dịch, trả về id
    pub async fn insert(
        conn: &mut SqliteConnection,
        transaction_date: DateTime<Utc>,
        price: i64,
        state: &str,
        id_user: i64,
    ) -> PersistenceResult<i64> {
        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO transactions (transaction_date, price, state, id_user, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(transaction_date)
        .bind(price)
        .bind(state)
        .bind(id_user)
        .bind(now)
        .bind(now)
        .execute(conn)
        .await?;
        Ok(result.last_insert_rowid())
    }

    /// Lịch sử giao dịch của một user
    pub async fn get_by_user(
        pool: &SqlitePool,
        id_user: i64,
    ) -> PersistenceResult<Vec<TransactionRow>> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            "SELECT * FROM transactions WHERE id_user = ? ORDER BY created_at DESC",
        )
        .bind(id_user)
        .fetch_all(pool)
        .await?;
        Ok(rows)
    }

}

// ============================================================================
// Image Repository
// ============================================================================

/// Repository cho images table (avatar upload)
pub struct ImageRepo;

impl ImageRepo {
    /// Ghi lại đường dẫn ảnh đã upload, trả về id
    pub async fn insert(
        conn: &mut SqliteConnection,
        path: &str,
        status: &str,
        id_user: i64,
    ) -> PersistenceResult<i64> {
        let result = sqlx::query("INSERT INTO images (path, status, id_user) VALUES (?, ?, ?)")
            .bind(path)
            .bind(status)
            .bind(id_user)
            .execute(conn)
            .await?;
        Ok(result.last_insert_rowid())
    }

    /// Ảnh mới nhất của user (id lớn nhất)
    pub async fn get_latest_for_user(
        pool: &SqlitePool,
        id_user: i64,
    ) -> PersistenceResult<Option<ImageRow>> {
        let row = sqlx::query_as::<_, ImageRow>(
            "SELECT * FROM images WHERE id_user = ? ORDER BY id DESC LIMIT 1",
        )
        .bind(id_user)
        .fetch_optional(pool)
        .await?;
        Ok(row)
    }
}

// ============================================================================
// Database initialization
// ============================================================================

/// Khởi tạo database connection pool
pub async fn create_pool(database_url: &str) -> PersistenceResult<SqlitePool> {
    let pool = SqlitePool::connect(database_url).await?;
    Ok(pool)
}

/// Tạo database mới (file nếu chưa có) với schema
pub async fn init_database(database_url: &str) -> PersistenceResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .map_err(|e| PersistenceError::Configuration(e.to_string()))?
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new().connect_with(options).await?;

    create_schema(&pool).await?;
    Ok(pool)
}

/// Tạo schema (idempotent)
pub async fn create_schema(pool: &SqlitePool) -> PersistenceResult<()> {
    sqlx::query(
        r#"
        -- Người dùng với số dư điểm
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            password TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT '4',
            cccd TEXT NOT NULL,
            dob DATE NOT NULL,
            gender TEXT NOT NULL,
            pob TEXT NOT NULL DEFAULT '',
            address TEXT NOT NULL,
            point INTEGER NOT NULL DEFAULT 0,
            token TEXT NOT NULL DEFAULT '',
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );

        -- Danh mục sách
        CREATE TABLE IF NOT EXISTS type_books (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name_book TEXT NOT NULL,
            type_book TEXT NOT NULL,
            price INTEGER NOT NULL DEFAULT 0,
            image TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL DEFAULT '',
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP
        );

        -- Tin đăng bán sách
        CREATE TABLE IF NOT EXISTS book (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            date_purchase DATE NOT NULL,
            price INTEGER NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            status INTEGER NOT NULL DEFAULT 1,
            quantity INTEGER NOT NULL DEFAULT 0,
            image TEXT NOT NULL DEFAULT '',
            id_user INTEGER NOT NULL,
            id_type_book INTEGER NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (id_user) REFERENCES users(id),
            FOREIGN KEY (id_type_book) REFERENCES type_books(id)
        );

        -- Đơn hàng theo từng người bán
        CREATE TABLE IF NOT EXISTS cart (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            status TEXT NOT NULL,
            address TEXT NOT NULL DEFAULT '',
            total INTEGER NOT NULL DEFAULT 0,
            id_user INTEGER NOT NULL,
            id_seller INTEGER NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (id_user) REFERENCES users(id),
            FOREIGN KEY (id_seller) REFERENCES users(id)
        );

        -- Dòng đơn hàng
        CREATE TABLE IF NOT EXISTS detail_cart (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            quantity INTEGER NOT NULL,
            id_book INTEGER NOT NULL,
            id_cart INTEGER NOT NULL,
            FOREIGN KEY (id_book) REFERENCES book(id),
            FOREIGN KEY (id_cart) REFERENCES cart(id)
        );

        -- Lịch sử nạp điểm
        CREATE TABLE IF NOT EXISTS transactions (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            transaction_date DATETIME NOT NULL,
            price INTEGER NOT NULL,
            state TEXT NOT NULL,
            id_user INTEGER NOT NULL,
            created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            updated_at DATETIME DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY (id_user) REFERENCES users(id)
        );

        -- Ảnh đã upload
        CREATE TABLE IF NOT EXISTS images (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            path TEXT NOT NULL,
            status TEXT NOT NULL DEFAULT '',
            id_user INTEGER NOT NULL,
            FOREIGN KEY (id_user) REFERENCES users(id)
        );
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
