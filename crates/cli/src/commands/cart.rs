//! `heirloom cart` - the local cart and WhatsApp checkout.

use clap::Subcommand;
use heirloom_core::ProductSlug;
use heirloom_storefront::cart::Cart;
use heirloom_storefront::checkout::WhatsAppCheckout;
use heirloom_storefront::storage::Persisted;

use super::{CliError, Context};

#[derive(Debug, Subcommand)]
pub enum CartAction {
    /// Add a product by slug
    Add {
        slug: ProductSlug,
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set a line's quantity (0 removes it)
    Update { slug: ProductSlug, quantity: u32 },
    /// Remove a line
    Remove { slug: ProductSlug },
    /// Show the cart
    List,
    /// Empty the cart
    Clear,
    /// Print a WhatsApp link prefilled with the order
    Checkout {
        /// Store WhatsApp number
        #[arg(long, env = "WHATSAPP_NUMBER")]
        number: String,
        /// Public storefront URL for product links
        #[arg(long, env = "STOREFRONT_BASE_URL")]
        base_url: Option<String>,
    },
}

pub async fn run(ctx: &Context, action: CartAction) -> Result<(), CliError> {
    let mut storage = ctx.storage();
    let mut cart = Cart::load(&storage)?;

    match action {
        CartAction::Add { slug, quantity } => {
            let product = ctx.product(&slug).await?;
            cart.add(product, quantity)?;
            tracing::info!(%slug, quantity, "added to cart");
        }
        CartAction::Update { slug, quantity } => cart.update_quantity(&slug, quantity),
        CartAction::Remove { slug } => {
            if !cart.remove(&slug) {
                tracing::warn!(%slug, "not in cart");
            }
        }
        CartAction::List => {
            print_cart(&cart);
            return Ok(());
        }
        CartAction::Clear => cart.clear(),
        CartAction::Checkout { number, base_url } => {
            let mut checkout = WhatsAppCheckout::new(&number)?;
            if let Some(url) = base_url {
                checkout = checkout.with_base_url(url);
            }
            print_line(&checkout.cart_link(&cart)?);
            return Ok(());
        }
    }

    cart.save(&mut storage)?;
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_line(line: &str) {
    println!("{line}");
}

#[allow(clippy::print_stdout)]
fn print_cart(cart: &Cart) {
    if cart.is_empty() {
        println!("Cart is empty.");
        return;
    }
    for (index, line) in cart.items().iter().enumerate() {
        println!(
            "{}. {} x{} - {}",
            index + 1,
            line.product.title,
            line.quantity,
            line.line_total()
        );
    }
    println!("Items: {}  Subtotal: {}", cart.item_count(), cart.subtotal());
}
