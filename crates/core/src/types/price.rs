//! Whole-rupee price representation.
//!
//! The CMS stores prices as integers in rupees; there are no paise in the
//! catalog, so a `u64` is enough and keeps range comparisons exact.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A price in whole Indian rupees.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Price(u64);

impl Price {
    /// A zero price.
    pub const ZERO: Self = Self(0);

    /// Create a price from a rupee amount.
    #[must_use]
    pub const fn new(rupees: u64) -> Self {
        Self(rupees)
    }

    /// Get the amount in rupees.
    #[must_use]
    pub const fn rupees(self) -> u64 {
        self.0
    }

    /// Multiply by a quantity, saturating at `u64::MAX`.
    #[must_use]
    pub fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(u64::from(quantity)))
    }

    /// Format for display with Indian digit grouping (e.g., "₹1,25,000").
    #[must_use]
    pub fn display(self) -> String {
        format!("₹{}", group_indian(self.0))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<u64> for Price {
    fn from(rupees: u64) -> Self {
        Self(rupees)
    }
}

impl From<Price> for u64 {
    fn from(price: Price) -> Self {
        price.0
    }
}

/// Group digits the en-IN way: last three, then pairs.
fn group_indian(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    if !rest.is_empty() {
        groups.push(rest);
    }
    groups.reverse();

    format!("{},{tail}", groups.join(","))
}
