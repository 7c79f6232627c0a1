//! Media operations - lưu ảnh upload và tra cứu avatar

use crate::error::{BusinessError, BusinessResult};
use crate::services::ServiceContext;
use anyhow::Context;
use bookswap_persistence::ImageRepo;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

/// Thư mục gốc chứa ảnh upload
pub const UPLOAD_ROOT: &str = "uploads";

/// Media Service - ảnh đại diện và ảnh sách
pub struct MediaService<'a> {
    ctx: &'a ServiceContext,
    root: PathBuf,
}

impl<'a> MediaService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self {
            ctx,
            root: PathBuf::from(UPLOAD_ROOT),
        }
    }

    /// Root khác (tests dùng thư mục tạm)
    pub fn with_root(ctx: &'a ServiceContext, root: impl Into<PathBuf>) -> Self {
        Self {
            ctx,
            root: root.into(),
        }
    }

    /// Lưu ảnh đại diện: ghi bytes vào `<root>/<user_id>/<tên đã làm sạch>`,
    /// ghi đường dẫn tương đối vào bảng images. Trả về đường dẫn đã lưu.
    pub async fn save_avatar(
        &self,
        user_id: i64,
        file_name: &str,
        bytes: &[u8],
    ) -> BusinessResult<String> {
        let name = sanitize_file_name(file_name);
        if name.is_empty() {
            return Err(BusinessError::Validation(format!(
                "invalid file name: {file_name}"
            ))
            .into());
        }

        let dir = self.root.join(user_id.to_string());
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create upload dir {}", dir.display()))?;

        let full_path = dir.join(&name);
        std::fs::write(&full_path, bytes)
            .with_context(|| format!("Failed to write {}", full_path.display()))?;

        let stored = format!("{}/{}/{}", UPLOAD_ROOT, user_id, name);
        let mut conn = self
            .ctx
            .pool()
            .acquire()
            .await
            .context("Failed to acquire connection")?;
        ImageRepo::insert(&mut conn, &stored, "", user_id).await?;

        info!(user_id, path = %stored, "avatar saved");
        Ok(stored)
    }

    /// Đường dẫn avatar mới nhất của user, nếu có
    pub async fn latest_avatar(&self, user_id: i64) -> BusinessResult<Option<String>> {
        let row = ImageRepo::get_latest_for_user(self.ctx.pool(), user_id).await?;
        Ok(row.map(|r| r.path))
    }

    /// Lưu ảnh bìa sách với tên sinh tự động, tránh ghi đè khi client
    /// gửi nhiều ảnh cùng tên. Trả về đường dẫn đã lưu.
    pub async fn save_book_image(
        &self,
        user_id: i64,
        original_name: &str,
        bytes: &[u8],
    ) -> BusinessResult<String> {
        let name = book_image_name(original_name);
        let dir = self.root.join(user_id.to_string());
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create upload dir {}", dir.display()))?;

        let full_path = dir.join(&name);
        std::fs::write(&full_path, bytes)
            .with_context(|| format!("Failed to write {}", full_path.display()))?;

        let stored = format!("{}/{}/{}", UPLOAD_ROOT, user_id, name);
        info!(user_id, path = %stored, "book image saved");
        Ok(stored)
    }
}

/// Làm sạch tên file client gửi lên: chỉ giữ chữ, số, `.`, `-`, `_`.
pub fn sanitize_file_name(raw: &str) -> String {
    let base = Path::new(raw)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("");
    base.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect()
}

/// Tên file duy nhất cho ảnh sách: `book_upload_<timestamp>_<uuid6>.<ext>`
pub fn book_image_name(original_name: &str) -> String {
    let ext = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| e.chars().all(|c| c.is_ascii_alphanumeric()))
        .unwrap_or("jpg");

    let uuid6: String = Uuid::new_v4().simple().to_string()[..6].to_string();
    format!("book_upload_{}_{}.{}", Utc::now().timestamp(), uuid6, ext)
}
