//! Heirloom CLI - catalog listings and local cart tools.
//!
//! # Usage
//!
//! ```bash
//! # Newest rings under ₹20,000, two pages deep
//! heirloom listing --category rings --max-price 20000 --pages 2
//!
//! # Replay a shared storefront link
//! heirloom listing --query "category=rings&status=available" --json
//!
//! # Local cart kept under $STOREFRONT_DATA_DIR
//! heirloom cart add gold-ring -q 2
//! heirloom cart list
//! heirloom cart checkout
//!
//! # Wishlist
//! heirloom wishlist toggle opal-pendant
//! ```
//!
//! # Commands
//!
//! - `listing` - Filter and paginate the catalog
//! - `cart` - Add, update, remove, list, clear, checkout
//! - `wishlist` - Toggle, list, clear

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

use commands::{Context, cart::CartAction, listing::ListingArgs, wishlist::WishlistAction};

#[derive(Parser)]
#[command(name = "heirloom")]
#[command(author, version, about = "Heirloom storefront tools")]
struct Cli {
    /// CMS product export (JSON)
    #[arg(long, global = true, env = "STOREFRONT_CATALOG_PATH", default_value = "catalog.json")]
    catalog: PathBuf,

    /// Directory holding local cart and wishlist state
    #[arg(long, global = true, env = "STOREFRONT_DATA_DIR", default_value = ".heirloom")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter and paginate the catalog
    Listing(ListingArgs),
    /// Manage the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Manage the local wishlist
    Wishlist {
        #[command(subcommand)]
        action: WishlistAction,
    },
}

#[tokio::main]
async fn main() {
    // Load .env before parsing so `env = ...` arguments see it
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Context::new(cli.catalog, cli.data_dir);
    match cli.command {
        Commands::Listing(args) => commands::listing::run(&ctx, args).await?,
        Commands::Cart { action } => commands::cart::run(&ctx, action).await?,
        Commands::Wishlist { action } => commands::wishlist::run(&ctx, action).await?,
    }
    Ok(())
}
