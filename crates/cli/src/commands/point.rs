//! Point ledger commands

use anyhow::Result;
use bookswap_business::{PointService, ServiceContext};
use std::path::Path;

use crate::db;
use crate::PointAction;

pub async fn handle(db_path: &Path, action: PointAction) -> Result<()> {
    let pool = db::connect(db_path).await?;
    let ctx = ServiceContext::new(pool.clone());
    let points = PointService::new(&ctx);

    match action {
        PointAction::Split {
            sender,
            receivers,
            total,
        } => {
            points.split_transfer(sender, &receivers, total).await?;
            println!("✅ Split {} points from user {} to [{}]", total, sender, receivers);
        }

        PointAction::TransferOne {
            sender,
            receiver,
            total,
        } => {
            points.transfer_one(sender, &receiver, total).await?;
            println!("✅ Transferred {} points from user {} to {}", total, sender, receiver);
        }

        PointAction::Quiz { user, correct } => {
            let balance = points.award_quiz_points(user, correct).await?;
            println!("✅ Awarded {} points, new balance: {}", correct * 10, balance);
        }

        PointAction::Topup { user, price, state } => {
            let txn_id = points.record_topup(user, price, &state).await?;
            println!("✅ Top-up recorded!");
            println!("   Transaction: {}", txn_id);
            println!("   Amount:      {} points", price);
        }

        PointAction::History { user } => {
            let rows = points.topup_history(user).await?;
            for t in &rows {
                println!(
                    "{:>4}  {}  {:>8}  state={}",
                    t.id,
                    t.transaction_date.format("%Y-%m-%d %H:%M:%S"),
                    t.price,
                    t.state
                );
            }
            println!("({} transactions)", rows.len());
        }
    }

    pool.close().await;
    Ok(())
}
