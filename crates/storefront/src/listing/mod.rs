//! Product listing engine: filtering, URL state and pagination.
//!
//! Data flows one way:
//!
//! ```text
//! Vec<Product> ──▶ predicates (pure) ──▶ FilterStore (state + cursor)
//!                                              │
//!                                              ▼
//!                  LoadMoreTrigger ◀──── ListingView (cached derived data)
//! ```
//!
//! - [`predicates`] - Max price, recency sort, multi-field filter
//! - [`state`] - `FilterState`, `PriceRange` and the composite `FilterKey`
//! - [`query`] - Query-string codec (`q`, `category`, `collection`, `status`, `minPrice`, `maxPrice`)
//! - [`store`] - Filter store with [`LocalOnly`] and [`UrlSync`] variants
//! - [`view`] - Composition of products and store into a `ListingSnapshot`
//! - [`load_more`] - Single-flight "show more" / infinite-scroll trigger

pub mod load_more;
pub mod predicates;
pub mod query;
pub mod state;
pub mod store;
pub mod view;

pub use load_more::{LOAD_DELAY, LOAD_MORE_BATCH, LoadMoreTrigger, LoadState, LoadTicket};
pub use predicates::{
    MAX_PRODUCTS, PRICE_FLOOR, calculate_max_price, filter_products, initial_price_range,
    sort_products_by_date,
};
pub use state::{FilterKey, FilterState, PRICE_STEP, PriceRange};
pub use store::{CountUpdate, FilterStore, FilterSync, INITIAL_PAGE_SIZE, LocalOnly, UrlSync};
pub use view::{ListingSnapshot, ListingView};
