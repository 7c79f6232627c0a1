//! User commands: register, login, list, balance, avatar

use anyhow::{Context, Result};
use bookswap_business::{AccountService, MediaService, ServiceContext};
use bookswap_core::NewUser;
use std::path::Path;

use crate::db;
use crate::UserAction;

pub async fn handle(db_path: &Path, action: UserAction) -> Result<()> {
    let pool = db::connect(db_path).await?;
    let ctx = ServiceContext::new(pool.clone());
    let accounts = AccountService::new(&ctx);

    match action {
        UserAction::Register {
            name,
            email,
            password,
            cccd,
            dob,
            gender,
            address,
            point,
            token,
        } => {
            let user = NewUser {
                name,
                email,
                password,
                cccd,
                dob,
                gender: gender.as_str().to_string(),
                address,
                point,
                token,
            };
            let id = accounts.register(&user).await?;
            println!("✅ User registered!");
            println!("   Id:    {}", id);
            println!("   Email: {}", user.email);
        }

        UserAction::Login { email, password } => {
            let user = accounts.login(&email, &password).await?;
            println!("✅ Login successful!");
            println!("   Id:      {}", user.id);
            println!("   Name:    {}", user.name);
            println!("   Dob:     {}", user.dob_iso());
            println!("   Point:   {}", user.point);
        }

        UserAction::Show { id } => {
            let user = accounts.get_user(id).await?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }

        UserAction::List { requester } => {
            let users = accounts.list_users(requester).await?;
            for user in &users {
                println!("{:>4}  {:<24} {:<28} {:>8}", user.id, user.name, user.email, user.point);
            }
            println!("({} users)", users.len());
        }

        UserAction::Balance { id } => {
            let point = accounts.balance(id).await?;
            println!("User {} balance: {} points", id, point);
        }

        UserAction::Avatar { id, file } => {
            let bytes = std::fs::read(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let name = file
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or("avatar.jpg");

            let media = MediaService::new(&ctx);
            let stored = media.save_avatar(id, name, &bytes).await?;
            println!("✅ Avatar saved at {}", stored);
        }

        UserAction::AvatarShow { id } => {
            let media = MediaService::new(&ctx);
            match media.latest_avatar(id).await? {
                Some(path) => println!("{path}"),
                None => println!("(no avatar for user {id})"),
            }
        }
    }

    pool.close().await;
    Ok(())
}
