//! Heirloom storefront library.
//!
//! Listing engine, local cart and wishlist, WhatsApp checkout and the HTTP
//! surface that serves them. The binary in `main.rs` wires these to a
//! listener; tests and the CLI use them directly.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod listing;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod storage;
pub mod wishlist;

pub use routes::app;
pub use state::AppState;
