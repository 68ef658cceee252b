//! Newtype slugs for type-safe catalog references.
//!
//! Use the `define_slug!` macro to create slug wrappers that prevent
//! accidentally filtering categories by a collection slug.

/// Macro to define a type-safe slug wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<&str>`, `From<String>` and `Display` implementations
///
/// # Example
///
/// ```rust
/// # use heirloom_core::define_slug;
/// define_slug!(BrandSlug);
/// define_slug!(TagSlug);
///
/// let brand = BrandSlug::new("cartier");
/// let tag = TagSlug::new("cartier");
///
/// // These are different types, so this won't compile:
/// // let _: BrandSlug = tag;
/// assert_eq!(brand.as_str(), tag.as_str());
/// ```
#[macro_export]
macro_rules! define_slug {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new slug from any string-like value.
            #[must_use]
            pub fn new(slug: impl Into<String>) -> Self {
                Self(slug.into())
            }

            /// Borrow the slug as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the slug and return the underlying string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(slug: &str) -> Self {
                Self(slug.to_string())
            }
        }

        impl From<String> for $name {
            fn from(slug: String) -> Self {
                Self(slug)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_slug!(ProductSlug);
define_slug!(CategorySlug);
define_slug!(CollectionSlug);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_serializes_transparently() {
        let slug = ProductSlug::new("emerald-drop-earrings");
        let json = serde_json::to_string(&slug).unwrap_or_default();
        assert_eq!(json, "\"emerald-drop-earrings\"");
    }

    #[test]
    fn test_slug_display_matches_inner() {
        let slug = CategorySlug::from("rings");
        assert_eq!(slug.to_string(), "rings");
        assert_eq!(slug.into_inner(), "rings");
    }
}
