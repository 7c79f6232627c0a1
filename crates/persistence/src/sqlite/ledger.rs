//! Point Ledger
//!
//! Mọi thay đổi số dư điểm đi qua module này. Debit dùng conditional
//! UPDATE (`point >= ?` ngay trong câu lệnh) nên hai lần trừ chạy song
//! song không bao giờ đưa số dư xuống âm. Các thao tác nhiều bước chạy
//! trong một transaction duy nhất.

use crate::error::{PersistenceError, PersistenceResult};
use bookswap_core::Share;
use sqlx::{SqliteConnection, SqlitePool};

/// Point Ledger trên bảng users
pub struct PointLedger;

impl PointLedger {
    /// Cộng điểm cho user. `amount` phải dương.
    pub async fn credit(
        conn: &mut SqliteConnection,
        user_id: i64,
        amount: i64,
    ) -> PersistenceResult<()> {
        if amount <= 0 {
            return Err(PersistenceError::InvalidAmount(format!(
                "credit amount must be positive, got {amount}"
            )));
        }

        let result = sqlx::query("UPDATE users SET point = point + ? WHERE id = ?")
            .bind(amount)
            .bind(user_id)
            .execute(conn)
            .await?;

        if result.rows_affected() == 0 {
            return Err(PersistenceError::not_found("User", user_id));
        }
        Ok(())
    }

    /// Trừ điểm của user. Điều kiện `point >= amount` nằm trong chính
    /// câu UPDATE; rows_affected == 0 nghĩa là không đủ số dư (hoặc
    /// user không tồn tại).
    pub async fn debit(
        conn: &mut SqliteConnection,
        user_id: i64,
        amount: i64,
    ) -> PersistenceResult<()> {
        if amount <= 0 {
            return Err(PersistenceError::InvalidAmount(format!(
                "debit amount must be positive, got {amount}"
            )));
        }

        let result = sqlx::query("UPDATE users SET point = point - ? WHERE id = ? AND point >= ?")
            .bind(amount)
            .bind(user_id)
            .bind(amount)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            let exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE id = ?")
                .bind(user_id)
                .fetch_optional(conn)
                .await?;
            return match exists {
                Some(_) => Err(PersistenceError::InsufficientBalance {
                    user_id,
                    needed: amount,
                }),
                None => Err(PersistenceError::not_found("User", user_id)),
            };
        }
        Ok(())
    }

    /// Chuyển điểm một-một trong transaction riêng.
    pub async fn transfer(
        pool: &SqlitePool,
        from: i64,
        to: i64,
        amount: i64,
    ) -> PersistenceResult<()> {
        let mut tx = pool.begin().await?;
        Self::debit(&mut tx, from, amount).await?;
        Self::credit(&mut tx, to, amount).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Chia một khoản cho nhiều người nhận trong một transaction:
    /// trừ người gửi đúng tổng, cộng từng người nhận phần của họ.
    /// Bất kỳ bước nào lỗi thì toàn bộ rollback.
    pub async fn split_transfer(
        pool: &SqlitePool,
        from: i64,
        shares: &[Share],
    ) -> PersistenceResult<()> {
        let total: i64 = shares.iter().map(|s| s.amount).sum();
        if total <= 0 {
            return Err(PersistenceError::InvalidAmount(format!(
                "split total must be positive, got {total}"
            )));
        }

        let mut tx = pool.begin().await?;
        Self::debit(&mut tx, from, total).await?;
        for share in shares {
            Self::credit(&mut tx, share.receiver_id, share.amount).await?;
        }
        tx.commit().await?;
        Ok(())
    }
}
