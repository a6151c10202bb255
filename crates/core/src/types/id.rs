//! Typed wrappers around backend primary keys.
//!
//! The backend hands out integer primary keys for every resource. Use the
//! `define_id!` macro to wrap them so a product ID can never be passed where
//! an order ID is expected.

/// Declare a resource ID: a `#[serde(transparent)]` wrapper over the
/// backend's `i64` primary key.
///
/// Generated IDs are `Copy`, ordered and hashable, print as the bare number
/// (so they drop straight into `/api/products/{id}` style paths) and convert
/// to and from `i64`.
///
/// ```rust
/// # use pasta_house_core::define_id;
/// define_id!(DishId);
/// define_id!(TableId);
///
/// let dish = DishId::new(12);
/// assert_eq!(format!("/api/dishes/{dish}"), "/api/dishes/12");
/// assert_eq!(i64::from(dish), 12);
///
/// // A `TableId` is a different type:
/// // let table: TableId = dish;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw primary key.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// The raw primary key.
            #[must_use]
            pub const fn as_i64(&self) -> i64 {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Backend resource IDs
define_id!(UserId);
define_id!(ProductId);
define_id!(CategoryId);
define_id!(TagId);
define_id!(OrderId);
define_id!(CartItemId);
define_id!(ReviewId);
