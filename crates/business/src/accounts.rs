//! Account operations - register, login, profile

use crate::error::{BusinessError, BusinessResult};
use crate::services::ServiceContext;
use anyhow::Context;
use bookswap_core::{NewUser, User};
use bookswap_persistence::UserRepo;
use tracing::info;

/// Account Service - đăng ký, đăng nhập, tra cứu người dùng
pub struct AccountService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccountService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Đăng ký tài khoản mới. Status mặc định "4", pob để trống.
    pub async fn register(&self, user: &NewUser) -> BusinessResult<i64> {
        user.validate().map_err(BusinessError::Validation)?;

        let mut conn = self
            .ctx
            .pool()
            .acquire()
            .await
            .context("Failed to acquire connection")?;
        let id = UserRepo::insert(&mut conn, user)
            .await
            .context("Failed to insert user")?;

        info!(user_id = id, email = %user.email, "registered new user");
        Ok(id)
    }

    /// Đăng nhập bằng email + password. Sai thông tin thì InvalidCredentials.
    pub async fn login(&self, email: &str, password: &str) -> BusinessResult<User> {
        let row = UserRepo::get_by_credentials(self.ctx.pool(), email, password)
            .await
            .context("Failed to query credentials")?;

        match row {
            Some(row) => {
                info!(user_id = row.id, "login successful");
                Ok(row.into())
            }
            None => Err(BusinessError::InvalidCredentials.into()),
        }
    }

    /// Lấy một user theo id
    pub async fn get_user(&self, id: i64) -> BusinessResult<User> {
        let row = UserRepo::get_by_id(self.ctx.pool(), id)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    anyhow::Error::from(BusinessError::UserNotFound(id))
                } else {
                    anyhow::Error::from(e)
                }
            })?;
        Ok(row.into())
    }

    /// Danh sách người dùng. `requester_id == 0` nghĩa là lấy tất cả;
    /// ngược lại loại chính người gọi khỏi danh sách (màn chuyển điểm).
    pub async fn list_users(&self, requester_id: i64) -> BusinessResult<Vec<User>> {
        let rows = if requester_id == 0 {
            UserRepo::get_all(self.ctx.pool()).await?
        } else {
            UserRepo::get_all_except(self.ctx.pool(), requester_id).await?
        };
        Ok(rows.into_iter().map(User::from).collect())
    }

    /// Số dư điểm hiện tại
    pub async fn balance(&self, id: i64) -> BusinessResult<i64> {
        let point = UserRepo::get_point(self.ctx.pool(), id)
            .await
            .context("Failed to read balance")?;
        Ok(point)
    }
}
