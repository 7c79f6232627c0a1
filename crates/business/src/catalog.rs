//! Catalog operations - danh mục sách và tin đăng

use crate::error::{BusinessError, BusinessResult};
use crate::services::ServiceContext;
use anyhow::Context;
use bookswap_core::{Book, BookListing, NewBook, NewTypeBook, TypeBook};
use bookswap_persistence::{BookRepo, TypeBookRepo};
use chrono::NaiveDate;
use std::path::Path;
use tracing::{info, warn};

/// Catalog Service - quản lý type_books và book
pub struct CatalogService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CatalogService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    // === TypeBook ===

    /// Danh sách toàn bộ danh mục sách
    pub async fn list_type_books(&self) -> BusinessResult<Vec<TypeBook>> {
        let rows = TypeBookRepo::get_all(self.ctx.pool()).await?;
        Ok(rows.into_iter().map(TypeBook::from).collect())
    }

    /// Một danh mục theo id
    pub async fn get_type_book(&self, id: i64) -> BusinessResult<TypeBook> {
        let row = TypeBookRepo::get_by_id(self.ctx.pool(), id).await?;
        Ok(row.into())
    }

    /// Thêm danh mục mới
    pub async fn add_type_book(&self, type_book: &NewTypeBook) -> BusinessResult<i64> {
        type_book.validate().map_err(BusinessError::Validation)?;

        let mut conn = self
            .ctx
            .pool()
            .acquire()
            .await
            .context("Failed to acquire connection")?;
        let id = TypeBookRepo::insert(&mut conn, type_book).await?;
        info!(type_book_id = id, name = %type_book.name_book, "type book added");
        Ok(id)
    }

    /// Cập nhật danh mục
    pub async fn update_type_book(&self, id: i64, type_book: &NewTypeBook) -> BusinessResult<()> {
        type_book.validate().map_err(BusinessError::Validation)?;

        let mut conn = self
            .ctx
            .pool()
            .acquire()
            .await
            .context("Failed to acquire connection")?;
        TypeBookRepo::update(&mut conn, id, type_book).await?;
        Ok(())
    }

    /// Xóa danh mục
    pub async fn delete_type_book(&self, id: i64) -> BusinessResult<()> {
        let mut conn = self
            .ctx
            .pool()
            .acquire()
            .await
            .context("Failed to acquire connection")?;
        TypeBookRepo::delete(&mut conn, id).await?;
        info!(type_book_id = id, "type book deleted");
        Ok(())
    }

    // === Book ===

    /// Một tin đăng theo id
    pub async fn get_book(&self, id: i64) -> BusinessResult<Book> {
        let row = BookRepo::get_by_id(self.ctx.pool(), id).await.map_err(|e| {
            if e.is_not_found() {
                anyhow::Error::from(BusinessError::BookNotFound(id))
            } else {
                anyhow::Error::from(e)
            }
        })?;
        Ok(row.into())
    }

    /// Tin đăng của chính người dùng
    pub async fn my_books(&self, user_id: i64) -> BusinessResult<Vec<BookListing>> {
        let rows = BookRepo::get_mine(self.ctx.pool(), user_id).await?;
        Ok(rows.into_iter().map(BookListing::from).collect())
    }

    /// Chợ sách: tin còn bán, còn hàng, của người khác
    pub async fn market(&self, user_id: i64) -> BusinessResult<Vec<BookListing>> {
        let rows = BookRepo::get_market(self.ctx.pool(), user_id).await?;
        Ok(rows.into_iter().map(BookListing::from).collect())
    }

    /// Đăng tin bán sách mới
    pub async fn add_book(&self, book: &NewBook) -> BusinessResult<i64> {
        book.validate().map_err(BusinessError::Validation)?;

        let mut conn = self
            .ctx
            .pool()
            .acquire()
            .await
            .context("Failed to acquire connection")?;
        let id = BookRepo::insert(&mut conn, book).await?;
        info!(book_id = id, id_user = book.id_user, "book listed");
        Ok(id)
    }

    /// Cập nhật tin đăng
    pub async fn update_book(
        &self,
        id: i64,
        date_purchase: NaiveDate,
        price: i64,
        description: &str,
        quantity: i64,
    ) -> BusinessResult<()> {
        if price < 0 {
            return Err(BusinessError::InvalidAmount(format!(
                "price must not be negative: {price}"
            ))
            .into());
        }
        if quantity < 0 {
            return Err(BusinessError::InvalidAmount(format!(
                "quantity must not be negative: {quantity}"
            ))
            .into());
        }

        let mut conn = self
            .ctx
            .pool()
            .acquire()
            .await
            .context("Failed to acquire connection")?;
        BookRepo::update(&mut conn, id, date_purchase, price, description, quantity).await?;
        Ok(())
    }

    /// Xóa tin đăng, kèm file ảnh trên đĩa nếu có
    pub async fn delete_book(&self, id: i64) -> BusinessResult<()> {
        let book = self.get_book(id).await?;

        let mut conn = self
            .ctx
            .pool()
            .acquire()
            .await
            .context("Failed to acquire connection")?;
        BookRepo::delete(&mut conn, id).await?;

        if !book.image.is_empty() {
            let path = Path::new(&book.image);
            if path.exists() {
                if let Err(e) = std::fs::remove_file(path) {
                    warn!(book_id = id, image = %book.image, error = %e, "could not remove image file");
                }
            }
        }

        info!(book_id = id, "book deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::AccountService;
    use crate::test_support::{sample_book, sample_type_book, sample_user, test_context};

    #[tokio::test]
    async fn test_type_book_crud() {
        let (_dir, ctx) = test_context().await;
        let svc = CatalogService::new(&ctx);

        let id = svc.add_type_book(&sample_type_book("Đắc Nhân Tâm")).await.unwrap();
        let fetched = svc.get_type_book(id).await.unwrap();
        assert_eq!(fetched.name_book, "Đắc Nhân Tâm");

        let mut updated = sample_type_book("Đắc Nhân Tâm");
        updated.price = 99_000;
        svc.update_type_book(id, &updated).await.unwrap();
        assert_eq!(svc.get_type_book(id).await.unwrap().price, 99_000);

        assert_eq!(svc.list_type_books().await.unwrap().len(), 1);

        svc.delete_type_book(id).await.unwrap();
        assert!(svc.get_type_book(id).await.is_err());
    }

    #[tokio::test]
    async fn test_market_excludes_own_and_sold_out() {
        let (_dir, ctx) = test_context().await;
        let accounts = AccountService::new(&ctx);
        let svc = CatalogService::new(&ctx);

        let seller = accounts.register(&sample_user("seller", 0)).await.unwrap();
        let buyer = accounts.register(&sample_user("buyer", 0)).await.unwrap();
        let type_id = svc.add_type_book(&sample_type_book("Sách")).await.unwrap();

        let mut listing = sample_book(seller, type_id, 50_000, 3);
        svc.add_book(&listing).await.unwrap();

        // Hết hàng thì không lên chợ
        listing.quantity = 0;
        svc.add_book(&listing).await.unwrap();

        let market = svc.market(buyer).await.unwrap();
        assert_eq!(market.len(), 1);
        assert_eq!(market[0].name_book, "Sách");

        // Chủ tin không thấy tin của chính mình trên chợ
        assert!(svc.market(seller).await.unwrap().is_empty());
        assert_eq!(svc.my_books(seller).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_book_update_and_delete() {
        let (_dir, ctx) = test_context().await;
        let accounts = AccountService::new(&ctx);
        let svc = CatalogService::new(&ctx);

        let seller = accounts.register(&sample_user("seller", 0)).await.unwrap();
        let type_id = svc.add_type_book(&sample_type_book("Sách")).await.unwrap();
        let id = svc
            .add_book(&sample_book(seller, type_id, 50_000, 3))
            .await
            .unwrap();

        let date = NaiveDate::from_ymd_opt(2023, 5, 1).unwrap();
        svc.update_book(id, date, 45_000, "đã đọc một lần", 2)
            .await
            .unwrap();

        let book = svc.get_book(id).await.unwrap();
        assert_eq!(book.price, 45_000);
        assert_eq!(book.quantity, 2);
        assert_eq!(book.date_purchase, date);

        svc.delete_book(id).await.unwrap();
        assert!(svc.get_book(id).await.is_err());
    }
}
