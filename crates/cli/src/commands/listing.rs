//! `heirloom listing` - filter and paginate the catalog.

use clap::Args;
use heirloom_core::{CategorySlug, CollectionSlug, Product, ProductStatus};
use heirloom_storefront::listing::{ListingSnapshot, ListingView, LoadMoreTrigger, UrlSync};

use super::{CliError, Context};

#[derive(Debug, Args)]
pub struct ListingArgs {
    /// Seed filters from a storefront query string (e.g. `category=rings&maxPrice=20000`)
    #[arg(long)]
    pub query: Option<String>,

    /// Case-insensitive substring of title, category name or collection title
    #[arg(short = 's', long)]
    pub search: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub collection: Option<String>,

    /// `available`, `reserved` or `sold`
    #[arg(long)]
    pub status: Option<ProductStatus>,

    #[arg(long)]
    pub min_price: Option<u64>,

    #[arg(long)]
    pub max_price: Option<u64>,

    /// Pages to show, counting the first
    #[arg(short, long, default_value_t = 1)]
    pub pages: usize,

    /// Print the listing as JSON
    #[arg(long)]
    pub json: bool,
}

/// Build the listing view the arguments describe.
pub fn build_view(products: Vec<Product>, args: &ListingArgs) -> ListingView<UrlSync> {
    let mut view = ListingView::from_query(products, args.query.as_deref().unwrap_or_default());

    let store = view.store_mut();
    if let Some(search) = &args.search {
        store.set_search_text(search.as_str());
    }
    if let Some(category) = &args.category {
        store.set_category(Some(CategorySlug::new(category.as_str())));
    }
    if let Some(collection) = &args.collection {
        store.set_collection(Some(CollectionSlug::new(collection.as_str())));
    }
    if let Some(status) = args.status {
        store.set_status(Some(status));
    }
    if let Some(min) = args.min_price {
        store.set_min_price(min);
    }
    if let Some(max) = args.max_price {
        store.set_max_price(max);
    }

    let mut trigger = LoadMoreTrigger::default();
    for _ in 1..args.pages {
        if !trigger.show_more(&mut view) {
            break;
        }
    }
    view
}

pub async fn run(ctx: &Context, args: ListingArgs) -> Result<(), CliError> {
    let catalog = ctx.catalog().await?;
    let mut view = build_view(catalog.recent().to_vec(), &args);
    let link = view.store().href("/products");
    let snapshot = view.snapshot();

    if args.json {
        print_json(&snapshot)?;
    } else {
        print_table(&snapshot, &link);
    }
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_json(snapshot: &ListingSnapshot<'_>) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(snapshot)?);
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_table(snapshot: &ListingSnapshot<'_>, link: &str) {
    if snapshot.products.is_empty() {
        println!("No products match these filters.");
    }
    for product in snapshot.products {
        println!(
            "{:<32} {:>12}  {}",
            product.title,
            product.effective_price(),
            product.product_status
        );
    }
    println!();
    println!(
        "Showing {} of {} (prices {} - {})",
        snapshot.products.len(),
        snapshot.total,
        snapshot.price_bounds.min(),
        snapshot.price_bounds.max()
    );
    if snapshot.has_more_products {
        println!("More available: pass --pages to load further batches.");
    }
    if snapshot.has_active_filters {
        println!("Share: {link}");
    }
}
