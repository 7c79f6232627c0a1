//! Point operations - chuyển điểm, cộng điểm quiz, nạp điểm

use crate::error::{BusinessError, BusinessResult};
use crate::services::ServiceContext;
use anyhow::Context;
use bookswap_core::{
    parse_receiver_cccd, parse_receiver_list, split_shares, POINTS_PER_CORRECT_ANSWER,
};
use bookswap_persistence::{PointLedger, TransactionRepo, UserRepo};
use bookswap_persistence::sqlite::TransactionRow;
use chrono::Utc;
use tracing::info;

/// Point Service - mọi nghiệp vụ chạm vào số dư điểm
pub struct PointService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PointService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Chia `total` điểm cho danh sách người nhận dạng `"2_3_4"`.
    /// Trừ người gửi, cộng từng người nhận, tất cả trong một transaction.
    pub async fn split_transfer(
        &self,
        sender_id: i64,
        receivers_raw: &str,
        total: i64,
    ) -> BusinessResult<()> {
        let receiver_ids = parse_receiver_list(receivers_raw);
        let shares = split_shares(&receiver_ids, total).map_err(BusinessError::Core)?;

        PointLedger::split_transfer(self.ctx.pool(), sender_id, &shares)
            .await
            .map_err(|e| BusinessError::from_debit(e, sender_id, total))?;

        info!(
            sender_id,
            total,
            receivers = receiver_ids.len(),
            "split transfer completed"
        );
        Ok(())
    }

    /// Chuyển điểm cho một người nhận dạng `"id-cccd"`.
    pub async fn transfer_one(
        &self,
        sender_id: i64,
        receiver_raw: &str,
        total: i64,
    ) -> BusinessResult<()> {
        let (receiver_id, _cccd) = parse_receiver_cccd(receiver_raw).map_err(BusinessError::Core)?;
        if total <= 0 {
            return Err(BusinessError::InvalidAmount(format!(
                "transfer amount must be positive: {total}"
            ))
            .into());
        }

        PointLedger::transfer(self.ctx.pool(), sender_id, receiver_id, total)
            .await
            .map_err(|e| BusinessError::from_debit(e, sender_id, total))?;

        info!(sender_id, receiver_id, total, "transfer completed");
        Ok(())
    }

    /// Cộng điểm quiz: `correct × 10`, trả về số dư mới.
    /// `correct == 0` thì không đổi gì, chỉ trả số dư hiện tại.
    pub async fn award_quiz_points(&self, user_id: i64, correct: i64) -> BusinessResult<i64> {
        if correct < 0 {
            return Err(BusinessError::InvalidAmount(format!(
                "correct answer count must not be negative: {correct}"
            ))
            .into());
        }

        let earned = correct * POINTS_PER_CORRECT_ANSWER;
        if earned > 0 {
            let mut conn = self
                .ctx
                .pool()
                .acquire()
                .await
                .context("Failed to acquire connection")?;
            PointLedger::credit(&mut conn, user_id, earned).await?;
            info!(user_id, earned, "quiz points awarded");
        }

        let balance = UserRepo::get_point(self.ctx.pool(), user_id).await?;
        Ok(balance)
    }

    /// Nạp điểm sau thanh toán: ghi bản ghi `transactions` và cộng điểm
    /// trong cùng một transaction.
    pub async fn record_topup(
        &self,
        user_id: i64,
        price: i64,
        state: &str,
    ) -> BusinessResult<i64> {
        if price <= 0 {
            return Err(BusinessError::InvalidAmount(format!(
                "topup amount must be positive: {price}"
            ))
            .into());
        }

        let mut tx = self
            .ctx
            .pool()
            .begin()
            .await
            .context("Failed to begin transaction")?;
        let txn_id = TransactionRepo::insert(&mut tx, Utc::now(), price, state, user_id).await?;
        PointLedger::credit(&mut tx, user_id, price).await?;
        tx.commit().await.context("Failed to commit topup")?;

        info!(user_id, price, txn_id, "topup recorded");
        Ok(txn_id)
    }

    /// Lịch sử nạp điểm của một user
    pub async fn topup_history(&self, user_id: i64) -> BusinessResult<Vec<TransactionRow>> {
        let rows = TransactionRepo::get_by_user(self.ctx.pool(), user_id).await?;
        Ok(rows)
    }
}
