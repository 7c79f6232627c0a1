//! Cart commands: checkout, status, histories

use anyhow::{bail, Result};
use bookswap_business::{OrderService, ServiceContext};
use bookswap_core::{CheckoutItem, SellerOrder};
use std::path::Path;

use crate::db;
use crate::CartAction;

pub async fn handle(db_path: &Path, action: CartAction) -> Result<()> {
    let pool = db::connect(db_path).await?;
    let ctx = ServiceContext::new(pool.clone());
    let orders = OrderService::new(&ctx);

    match action {
        CartAction::Checkout {
            buyer,
            address,
            groups,
        } => {
            let seller_orders = parse_groups(&groups)?;
            let cart_ids = orders.checkout(buyer, &address, &seller_orders).await?;
            println!("✅ Checkout complete!");
            for (order, cart_id) in seller_orders.iter().zip(&cart_ids) {
                println!(
                    "   Cart {}: seller={} total={}",
                    cart_id, order.id_seller, order.total
                );
            }
        }

        CartAction::Status { cart_id, status } => {
            let status = status.to_core_status();
            orders.update_status(cart_id, status.as_str()).await?;
            println!("✅ Cart {} -> {}", cart_id, status);
        }

        CartAction::Purchases { user } => {
            let rows = orders.purchases(user).await?;
            for c in &rows {
                println!("{:>4}  {:<14} {:>8}đ  từ {}", c.id, c.status, c.total, c.counterparty);
            }
            println!("({} orders)", rows.len());
        }

        CartAction::Sales { user } => {
            let rows = orders.sales(user).await?;
            for c in &rows {
                println!("{:>4}  {:<14} {:>8}đ  cho {}", c.id, c.status, c.total, c.counterparty);
            }
            println!("({} orders)", rows.len());
        }

        CartAction::Items { cart_id } => {
            let items = orders.cart_items(cart_id).await?;
            for item in &items {
                println!(
                    "{:>4}  {:<32} x{:<3} {:>8}đ",
                    item.id_book, item.name_book, item.quantity, item.price
                );
            }
            println!("({} items)", items.len());
        }
    }

    pool.close().await;
    Ok(())
}

/// Parse chuỗi nhóm checkout: `"seller:total=bookxqty,bookxqty;seller:total=..."`.
///
/// Ví dụ `"2:50000=5x1,6x2;3:30000=7x1"`: người bán 2 tổng 50000 với sách 5 (x1)
/// và sách 6 (x2), người bán 3 tổng 30000 với sách 7 (x1).
pub fn parse_groups(raw: &str) -> Result<Vec<SellerOrder>> {
    let mut orders = Vec::new();

    for group in raw.split(';').filter(|g| !g.trim().is_empty()) {
        let Some((head, items_raw)) = group.split_once('=') else {
            bail!("group '{group}' is missing '=' between seller:total and items");
        };
        let Some((seller_raw, total_raw)) = head.split_once(':') else {
            bail!("group '{group}' is missing ':' between seller and total");
        };

        let id_seller: i64 = seller_raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid seller id '{seller_raw}'"))?;
        let total: i64 = total_raw
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid total '{total_raw}'"))?;

        let mut items = Vec::new();
        for item in items_raw.split(',').filter(|i| !i.trim().is_empty()) {
            let Some((book_raw, qty_raw)) = item.split_once('x') else {
                bail!("item '{item}' must look like <book>x<qty>");
            };
            let id_book: i64 = book_raw
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid book id '{book_raw}'"))?;
            let quantity: i64 = qty_raw
                .trim()
                .parse()
                .map_err(|_| anyhow::anyhow!("invalid quantity '{qty_raw}'"))?;
            items.push(CheckoutItem { id_book, quantity });
        }

        orders.push(SellerOrder {
            id_seller,
            total,
            items,
        });
    }

    if orders.is_empty() {
        bail!("no seller groups in '{raw}'");
    }
    Ok(orders)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_groups_two_sellers() {
        let orders = parse_groups("2:50000=5x1,6x2;3:30000=7x1").unwrap();
        assert_eq!(orders.len(), 2);

        assert_eq!(orders[0].id_seller, 2);
        assert_eq!(orders[0].total, 50000);
        assert_eq!(orders[0].items.len(), 2);
        assert_eq!(orders[0].items[1].id_book, 6);
        assert_eq!(orders[0].items[1].quantity, 2);

        assert_eq!(orders[1].id_seller, 3);
        assert_eq!(orders[1].items[0].id_book, 7);
    }

    #[test]
    fn test_parse_groups_rejects_malformed() {
        assert!(parse_groups("").is_err());
        assert!(parse_groups("2=5x1").is_err());
        assert!(parse_groups("2:50000").is_err());
        assert!(parse_groups("2:50000=5").is_err());
        assert!(parse_groups("x:50000=5x1").is_err());
    }
}
