//! Catalog commands: type books and book listings

use anyhow::Result;
use bookswap_business::{CatalogService, ServiceContext};
use bookswap_core::{BookListing, NewBook, NewTypeBook};
use std::path::Path;

use crate::db;
use crate::{BookAction, TypeBookAction};

pub async fn handle_typebook(db_path: &Path, action: TypeBookAction) -> Result<()> {
    let pool = db::connect(db_path).await?;
    let ctx = ServiceContext::new(pool.clone());
    let catalog = CatalogService::new(&ctx);

    match action {
        TypeBookAction::Add {
            name,
            category,
            price,
            image,
            description,
        } => {
            let id = catalog
                .add_type_book(&NewTypeBook {
                    name_book: name,
                    type_book: category,
                    price,
                    image,
                    description,
                })
                .await?;
            println!("✅ Type book added with id {id}");
        }

        TypeBookAction::List => {
            let type_books = catalog.list_type_books().await?;
            for tb in &type_books {
                println!("{:>4}  {:<32} {:<16} {:>8}", tb.id, tb.name_book, tb.type_book, tb.price);
            }
            println!("({} type books)", type_books.len());
        }

        TypeBookAction::Show { id } => {
            let tb = catalog.get_type_book(id).await?;
            println!("{}", serde_json::to_string_pretty(&tb)?);
        }

        TypeBookAction::Update {
            id,
            name,
            category,
            price,
            image,
            description,
        } => {
            catalog
                .update_type_book(
                    id,
                    &NewTypeBook {
                        name_book: name,
                        type_book: category,
                        price,
                        image,
                        description,
                    },
                )
                .await?;
            println!("✅ Type book {id} updated");
        }

        TypeBookAction::Delete { id } => {
            catalog.delete_type_book(id).await?;
            println!("✅ Type book {id} deleted");
        }
    }

    pool.close().await;
    Ok(())
}

pub async fn handle_book(db_path: &Path, action: BookAction) -> Result<()> {
    let pool = db::connect(db_path).await?;
    let ctx = ServiceContext::new(pool.clone());
    let catalog = CatalogService::new(&ctx);

    match action {
        BookAction::Add {
            user,
            typebook,
            date_purchase,
            price,
            quantity,
            description,
            image,
        } => {
            let id = catalog
                .add_book(&NewBook {
                    date_purchase,
                    price,
                    description,
                    status: 1,
                    quantity,
                    image,
                    id_user: user,
                    id_type_book: typebook,
                })
                .await?;
            println!("✅ Book listed with id {id}");
        }

        BookAction::Update {
            id,
            date_purchase,
            price,
            quantity,
            description,
        } => {
            catalog
                .update_book(id, date_purchase, price, &description, quantity)
                .await?;
            println!("✅ Book {id} updated");
        }

        BookAction::Delete { id } => {
            catalog.delete_book(id).await?;
            println!("✅ Book {id} deleted");
        }

        BookAction::Show { id } => {
            let book = catalog.get_book(id).await?;
            println!("{}", serde_json::to_string_pretty(&book)?);
        }

        BookAction::Mine { user } => {
            print_listings(&catalog.my_books(user).await?);
        }

        BookAction::Market { user } => {
            print_listings(&catalog.market(user).await?);
        }
    }

    pool.close().await;
    Ok(())
}

fn print_listings(listings: &[BookListing]) {
    for b in listings {
        println!(
            "{:>4}  {:<32} {:>8}đ  x{:<3} seller={}",
            b.id, b.name_book, b.price, b.quantity, b.id_user
        );
    }
    println!("({} listings)", listings.len());
}
