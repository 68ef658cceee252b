//! Heirloom Core - Shared catalog types.
//!
//! This crate provides the types used across all Heirloom components:
//! - `storefront` - Listing engine, cart/wishlist state and the JSON API
//! - `cli` - Command-line tools for browsing a catalog export and managing a local cart
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! Products arrive already fetched from the CMS; this crate only describes
//! their shape.
//!
//! # Modules
//!
//! - [`types`] - Slugs, prices, statuses, products and cart lines

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
