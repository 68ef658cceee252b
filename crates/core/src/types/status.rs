//! Product availability status.

use serde::{Deserialize, Serialize};

/// Availability of a one-of-a-kind resale piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    /// Listed and purchasable.
    #[default]
    Available,
    /// Held for a customer; still shown but cannot be added to a cart.
    Reserved,
    /// Gone.
    Sold,
}

impl ProductStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 3] = [Self::Available, Self::Reserved, Self::Sold];

    /// The wire token used in the CMS and in query strings.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Reserved => "reserved",
            Self::Sold => "sold",
        }
    }

    /// Whether a customer can still order this piece.
    #[must_use]
    pub const fn is_purchasable(self) -> bool {
        matches!(self, Self::Available)
    }
}

impl std::fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a status token is not one of the known values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid product status: {0}")]
pub struct StatusParseError(pub String);

impl std::str::FromStr for ProductStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "reserved" => Ok(Self::Reserved),
            "sold" => Ok(Self::Sold),
            _ => Err(StatusParseError(s.to_string())),
        }
    }
}
