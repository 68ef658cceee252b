//! Core types for Heirloom.
//!
//! This module provides type-safe wrappers for catalog concepts.

pub mod cart;
pub mod price;
pub mod product;
pub mod slug;
pub mod status;

pub use cart::CartLine;
pub use price::Price;
pub use product::{CategoryRef, CollectionRef, Product};
pub use slug::*;
pub use status::{ProductStatus, StatusParseError};
