//! Bookswap CLI - secondhand-book exchange operations from command line
//!
//! Usage:
//! ```bash
//! bookswap init
//! bookswap user register --name "Alice" --email a@example.com --password secret \
//!     --cccd 123456789012 --dob 1995-06-15 --gender female --address "Hà Nội"
//! bookswap book market 1
//! bookswap cart checkout 1 --address "12 Lý Thường Kiệt" --groups "2:50000=5x1;3:30000=7x2"
//! bookswap point split 1 "2_3_4" 100
//! bookswap payment create-url ORDER123 100000 --tmn-code TESTTMN1 --secret KEY \
//!     --return-url https://app/return
//! ```

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod commands;
mod db;

use commands::{cart, catalog, payment, point, user};

/// Bookswap - secondhand-book exchange backend with a point ledger
#[derive(Parser)]
#[command(name = "bookswap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Database file path
    #[arg(long, default_value = "data/bookswap.db", global = true)]
    pub db: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// User accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Book categories
    Typebook {
        #[command(subcommand)]
        action: TypeBookAction,
    },

    /// Book listings
    Book {
        #[command(subcommand)]
        action: BookAction,
    },

    /// Carts and checkout
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },

    /// Point ledger operations
    Point {
        #[command(subcommand)]
        action: PointAction,
    },

    /// VNPay payment URLs and callbacks
    Payment {
        #[command(subcommand)]
        action: PaymentAction,
    },

    /// Send an OTP code by email
    Otp {
        /// Recipient email
        email: String,
        /// OTP code
        code: String,
    },

    /// Initialize database with schema and seed data
    Init {
        /// Force re-initialization (drops existing data)
        #[arg(long)]
        force: bool,
    },

    /// Show database status
    Status,
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Register a new user
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Citizen ID number
        #[arg(long)]
        cccd: String,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        dob: NaiveDate,
        #[arg(long)]
        gender: GenderArg,
        #[arg(long)]
        address: String,
        /// Initial point balance
        #[arg(long, default_value_t = 0)]
        point: i64,
        /// Device token for push notifications
        #[arg(long, default_value = "")]
        token: String,
    },
    /// Log in with email and password
    Login { email: String, password: String },
    /// Show one user
    Show { id: i64 },
    /// List users; 0 means everyone, otherwise everyone except that id
    List {
        #[arg(default_value_t = 0)]
        requester: i64,
    },
    /// Show point balance
    Balance { id: i64 },
    /// Upload an avatar image
    Avatar { id: i64, file: PathBuf },
    /// Show the newest avatar path
    AvatarShow { id: i64 },
}

#[derive(Subcommand)]
pub enum TypeBookAction {
    /// Add a category
    Add {
        #[arg(long)]
        name: String,
        /// Category group (e.g. "Giáo trình")
        #[arg(long)]
        category: String,
        #[arg(long, default_value_t = 0)]
        price: i64,
        #[arg(long, default_value = "")]
        image: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List all categories
    List,
    /// Show one category
    Show { id: i64 },
    /// Update a category
    Update {
        id: i64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: String,
        #[arg(long, default_value_t = 0)]
        price: i64,
        #[arg(long, default_value = "")]
        image: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Delete a category
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub enum BookAction {
    /// List a book for sale
    Add {
        /// Seller user id
        #[arg(long)]
        user: i64,
        /// Category id
        #[arg(long)]
        typebook: i64,
        /// Purchase date of the physical book (YYYY-MM-DD)
        #[arg(long)]
        date_purchase: NaiveDate,
        #[arg(long)]
        price: i64,
        #[arg(long, default_value_t = 1)]
        quantity: i64,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        image: String,
    },
    /// Update a listing
    Update {
        id: i64,
        #[arg(long)]
        date_purchase: NaiveDate,
        #[arg(long)]
        price: i64,
        #[arg(long)]
        quantity: i64,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Delete a listing (removes the image file too)
    Delete { id: i64 },
    /// Show one listing
    Show { id: i64 },
    /// My own listings
    Mine { user: i64 },
    /// Market: other people's available books
    Market { user: i64 },
}

#[derive(Subcommand)]
pub enum CartAction {
    /// Checkout: one cart per seller group
    ///
    /// Groups use the form "seller:total=bookxqty,bookxqty;seller:total=..."
    Checkout {
        /// Buyer user id
        buyer: i64,
        #[arg(long)]
        address: String,
        /// Seller groups, e.g. "2:50000=5x1;3:30000=7x2"
        #[arg(long)]
        groups: String,
    },
    /// Update cart status
    Status {
        cart_id: i64,
        status: CartStatusArg,
    },
    /// Purchase history of a buyer
    Purchases { user: i64 },
    /// Sales history of a seller
    Sales { user: i64 },
    /// Items of one cart
    Items { cart_id: i64 },
}

#[derive(Subcommand)]
pub enum PointAction {
    /// Split a transfer among receivers ("2_3_4")
    Split {
        sender: i64,
        /// Receiver ids joined by underscores
        receivers: String,
        total: i64,
    },
    /// Transfer to one receiver given as "id-cccd"
    TransferOne {
        sender: i64,
        /// Receiver as "id-cccd", e.g. "7-123456789012"
        receiver: String,
        total: i64,
    },
    /// Award quiz points (10 per correct answer)
    Quiz { user: i64, correct: i64 },
    /// Record a top-up: transaction row + credit, atomically
    Topup {
        user: i64,
        price: i64,
        #[arg(long, default_value = "00")]
        state: String,
    },
    /// Top-up history of a user
    History { user: i64 },
}

#[derive(Subcommand)]
pub enum PaymentAction {
    /// Build a signed VNPay redirect URL
    CreateUrl {
        /// Order reference (vnp_TxnRef)
        txn_ref: String,
        /// Amount in VND
        amount: i64,
        #[arg(long)]
        tmn_code: String,
        #[arg(long)]
        secret: String,
        #[arg(long)]
        return_url: String,
        #[arg(long, default_value = "127.0.0.1")]
        ip: String,
    },
    /// Verify a callback query string
    Verify {
        /// Raw query string as received from the gateway
        query: String,
        #[arg(long)]
        secret: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum GenderArg {
    Male,
    Female,
    Other,
}

impl GenderArg {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenderArg::Male => "male",
            GenderArg::Female => "female",
            GenderArg::Other => "other",
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum CartStatusArg {
    Confirmed,
    Delivering,
    Delivered,
    Cancelled,
}

impl CartStatusArg {
    pub fn to_core_status(&self) -> bookswap_core::CartStatus {
        match self {
            CartStatusArg::Confirmed => bookswap_core::CartStatus::Confirmed,
            CartStatusArg::Delivering => bookswap_core::CartStatus::Delivering,
            CartStatusArg::Delivered => bookswap_core::CartStatus::Delivered,
            CartStatusArg::Cancelled => bookswap_core::CartStatus::Cancelled,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Some(parent) = cli.db.parent() {
        std::fs::create_dir_all(parent).ok();
    }

    match cli.command {
        Commands::Init { force } => {
            db::init_database(&cli.db, force).await?;
            println!("✅ Database initialized at {:?}", cli.db);
        }

        Commands::Status => {
            db::show_status(&cli.db).await?;
        }

        Commands::User { action } => {
            user::handle(&cli.db, action).await?;
        }

        Commands::Typebook { action } => {
            catalog::handle_typebook(&cli.db, action).await?;
        }

        Commands::Book { action } => {
            catalog::handle_book(&cli.db, action).await?;
        }

        Commands::Cart { action } => {
            cart::handle(&cli.db, action).await?;
        }

        Commands::Point { action } => {
            point::handle(&cli.db, action).await?;
        }

        Commands::Payment { action } => {
            payment::handle(action)?;
        }

        Commands::Otp { email, code } => {
            let mailer = bookswap_business::TracingMailer;
            bookswap_business::send_otp(&mailer, &email, &code)?;
            println!("✅ OTP sent to {email}");
        }
    }

    Ok(())
}
