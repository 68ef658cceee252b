//! `heirloom wishlist` - the local wishlist.

use clap::Subcommand;
use heirloom_core::ProductSlug;
use heirloom_storefront::storage::Persisted;
use heirloom_storefront::wishlist::Wishlist;

use super::{CliError, Context};

#[derive(Debug, Subcommand)]
pub enum WishlistAction {
    /// Add a product, or remove it if already saved
    Toggle { slug: ProductSlug },
    /// Show saved products
    List,
    /// Remove everything
    Clear,
}

pub async fn run(ctx: &Context, action: WishlistAction) -> Result<(), CliError> {
    let mut storage = ctx.storage();
    let mut wishlist = Wishlist::load(&storage)?;

    match action {
        WishlistAction::Toggle { slug } => {
            let saved = if wishlist.contains(&slug) {
                wishlist.remove(&slug);
                false
            } else {
                wishlist.toggle(ctx.product(&slug).await?)
            };
            tracing::info!(%slug, saved, "wishlist toggled");
        }
        WishlistAction::List => {
            print_wishlist(&wishlist);
            return Ok(());
        }
        WishlistAction::Clear => wishlist.clear(),
    }

    wishlist.save(&mut storage)?;
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_wishlist(wishlist: &Wishlist) {
    if wishlist.is_empty() {
        println!("Wishlist is empty.");
    }
    for product in wishlist.items() {
        println!("{:<32} {:>12}  {}", product.title, product.effective_price(), product.slug);
    }
}
