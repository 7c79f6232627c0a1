//! Order operations - checkout, trạng thái đơn, lịch sử mua bán

use crate::error::{BusinessError, BusinessResult};
use crate::services::ServiceContext;
use anyhow::Context;
use bookswap_core::{CartItemDetail, CartStatus, CartSummary, SellerOrder};
use bookswap_persistence::{CartRepo, PointLedger};
use tracing::info;

/// Order Service - đơn hàng và checkout
pub struct OrderService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> OrderService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Checkout giỏ hàng gom theo người bán. Với mỗi người bán: tạo cart,
    /// trừ điểm người mua đúng tổng của nhóm đó, ghi các dòng detail_cart.
    /// Mỗi nhóm là một transaction; nhóm nào lỗi thì rollback nguyên nhóm.
    ///
    /// Trả về danh sách id cart đã tạo.
    pub async fn checkout(
        &self,
        buyer_id: i64,
        address: &str,
        orders: &[SellerOrder],
    ) -> BusinessResult<Vec<i64>> {
        if orders.is_empty() {
            return Err(BusinessError::Validation("checkout has no seller groups".to_string()).into());
        }
        for order in orders {
            order.validate().map_err(BusinessError::Validation)?;
        }

        let mut cart_ids = Vec::with_capacity(orders.len());
        for order in orders {
            let mut tx = self
                .ctx
                .pool()
                .begin()
                .await
                .context("Failed to begin checkout transaction")?;

            let cart_id = CartRepo::insert(
                &mut tx,
                CartStatus::Confirmed.as_str(),
                address,
                order.total,
                buyer_id,
                order.id_seller,
            )
            .await?;

            if order.total > 0 {
                PointLedger::debit(&mut tx, buyer_id, order.total)
                    .await
                    .map_err(|e| BusinessError::from_debit(e, buyer_id, order.total))?;
            }

            for item in &order.items {
                CartRepo::insert_item(&mut tx, item.quantity, item.id_book, cart_id).await?;
            }

            tx.commit().await.context("Failed to commit checkout")?;
            info!(
                cart_id,
                buyer_id,
                seller_id = order.id_seller,
                total = order.total,
                "cart created"
            );
            cart_ids.push(cart_id);
        }

        Ok(cart_ids)
    }

    /// Đổi trạng thái đơn. Khi chuyển sang "Đã chuyển" thì cộng điểm
    /// cho người bán trong cùng transaction.
    pub async fn update_status(&self, cart_id: i64, status_raw: &str) -> BusinessResult<()> {
        let status = CartStatus::parse(status_raw)
            .ok_or_else(|| BusinessError::UnknownCartStatus(status_raw.to_string()))?;

        let cart = CartRepo::get_by_id(self.ctx.pool(), cart_id)
            .await
            .map_err(|e| {
                if e.is_not_found() {
                    anyhow::Error::from(BusinessError::CartNotFound(cart_id))
                } else {
                    anyhow::Error::from(e)
                }
            })?;

        let mut tx = self
            .ctx
            .pool()
            .begin()
            .await
            .context("Failed to begin status transaction")?;

        CartRepo::update_status(&mut tx, cart_id, status.as_str()).await?;

        if status.credits_seller() && cart.total > 0 {
            PointLedger::credit(&mut tx, cart.id_seller, cart.total).await?;
        }

        tx.commit().await.context("Failed to commit status update")?;
        info!(cart_id, status = %status, "cart status updated");
        Ok(())
    }

    /// Lịch sử mua của người mua (kèm tên người bán)
    pub async fn purchases(&self, buyer_id: i64) -> BusinessResult<Vec<CartSummary>> {
        let rows = CartRepo::get_purchases(self.ctx.pool(), buyer_id).await?;
        Ok(rows.into_iter().map(CartSummary::from).collect())
    }

    /// Lịch sử bán của người bán (kèm tên người mua)
    pub async fn sales(&self, seller_id: i64) -> BusinessResult<Vec<CartSummary>> {
        let rows = CartRepo::get_sales(self.ctx.pool(), seller_id).await?;
        Ok(rows.into_iter().map(CartSummary::from).collect())
    }

    /// Chi tiết các dòng của một đơn hàng
    pub async fn cart_items(&self, cart_id: i64) -> BusinessResult<Vec<CartItemDetail>> {
        let rows = CartRepo::get_items(self.ctx.pool(), cart_id).await?;
        Ok(rows.into_iter().map(CartItemDetail::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::AccountService;
    use crate::catalog::CatalogService;
    use crate::test_support::{sample_book, sample_type_book, sample_user, test_context};
    use bookswap_core::CheckoutItem;

    struct Fixture {
        buyer: i64,
        seller1: i64,
        seller2: i64,
        book1: i64,
        book2: i64,
    }

    async fn setup(ctx: &crate::services::ServiceContext, buyer_points: i64) -> Fixture {
        let accounts = AccountService::new(ctx);
        let catalog = CatalogService::new(ctx);

        let buyer = accounts
            .register(&sample_user("buyer", buyer_points))
            .await
            .unwrap();
        let seller1 = accounts.register(&sample_user("seller1", 0)).await.unwrap();
        let seller2 = accounts.register(&sample_user("seller2", 0)).await.unwrap();
        let type_id = catalog.add_type_book(&sample_type_book("Sách")).await.unwrap();
        let book1 = catalog
            .add_book(&sample_book(seller1, type_id, 50_000, 5))
            .await
            .unwrap();
        let book2 = catalog
            .add_book(&sample_book(seller2, type_id, 30_000, 5))
            .await
            .unwrap();

        Fixture {
            buyer,
            seller1,
            seller2,
            book1,
            book2,
        }
    }

    fn order(seller: i64, total: i64, book: i64, quantity: i64) -> SellerOrder {
        SellerOrder {
            id_seller: seller,
            total,
            items: vec![CheckoutItem {
                id_book: book,
                quantity,
            }],
        }
    }

    #[tokio::test]
    async fn test_checkout_debits_buyer_per_seller() {
        let (_dir, ctx) = test_context().await;
        let f = setup(&ctx, 100_000).await;
        let accounts = AccountService::new(&ctx);
        let orders = OrderService::new(&ctx);

        let cart_ids = orders
            .checkout(
                f.buyer,
                "12 Lý Thường Kiệt",
                &[
                    order(f.seller1, 50_000, f.book1, 1),
                    order(f.seller2, 30_000, f.book2, 1),
                ],
            )
            .await
            .unwrap();

        assert_eq!(cart_ids.len(), 2);
        assert_eq!(accounts.balance(f.buyer).await.unwrap(), 20_000);

        let items = orders.cart_items(cart_ids[0]).await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id_book, f.book1);
        assert_eq!(items[0].name_book, "Sách");
    }

    #[tokio::test]
    async fn test_checkout_insufficient_points_rolls_back() {
        let (_dir, ctx) = test_context().await;
        let f = setup(&ctx, 40_000).await;
        let accounts = AccountService::new(&ctx);
        let orders = OrderService::new(&ctx);

        let err = orders
            .checkout(
                f.buyer,
                "12 Lý Thường Kiệt",
                &[order(f.seller1, 50_000, f.book1, 1)],
            )
            .await
            .unwrap_err();
        assert!(err
            .downcast_ref::<BusinessError>()
            .map(|e| matches!(e, BusinessError::InsufficientPoints { .. }))
            .unwrap_or(false));

        // Không còn cart nào và số dư nguyên vẹn
        assert_eq!(accounts.balance(f.buyer).await.unwrap(), 40_000);
        assert!(orders.purchases(f.buyer).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delivered_status_credits_seller() {
        let (_dir, ctx) = test_context().await;
        let f = setup(&ctx, 100_000).await;
        let accounts = AccountService::new(&ctx);
        let orders = OrderService::new(&ctx);

        let cart_ids = orders
            .checkout(f.buyer, "addr", &[order(f.seller1, 50_000, f.book1, 1)])
            .await
            .unwrap();
        let cart_id = cart_ids[0];

        // Đang giao: chưa cộng điểm
        orders.update_status(cart_id, "Đang giao").await.unwrap();
        assert_eq!(accounts.balance(f.seller1).await.unwrap(), 0);

        // Đã chuyển: người bán nhận đủ tổng
        orders.update_status(cart_id, "Đã chuyển").await.unwrap();
        assert_eq!(accounts.balance(f.seller1).await.unwrap(), 50_000);

        assert!(orders.update_status(cart_id, "nonsense").await.is_err());
    }

    #[tokio::test]
    async fn test_histories_show_counterparty_names() {
        let (_dir, ctx) = test_context().await;
        let f = setup(&ctx, 100_000).await;
        let orders = OrderService::new(&ctx);

        orders
            .checkout(f.buyer, "addr", &[order(f.seller1, 50_000, f.book1, 1)])
            .await
            .unwrap();

        let purchases = orders.purchases(f.buyer).await.unwrap();
        assert_eq!(purchases.len(), 1);
        assert_eq!(purchases[0].counterparty, "seller1");
        assert_eq!(purchases[0].status, "Xác nhận đơn");

        let sales = orders.sales(f.seller1).await.unwrap();
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].counterparty, "buyer");
    }
}
