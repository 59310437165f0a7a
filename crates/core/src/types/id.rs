//! Per-entity ID newtypes.
//!
//! Each table gets its own ID type so a `ProductId` cannot silently stand
//! in for an `OrderId` in a query or a session value.

/// Declare an ID newtype over `i64` (`SQLite` rowids are 64-bit).
///
/// The generated type is `Copy`, ordered (carts iterate their entries by
/// ascending product ID), hashable, transparent for serde, and converts
/// to and from the raw `i64` via `new()`/`as_i64()` and the `From` impls.
///
/// ```rust
/// # use lakkeriet_core::define_id;
/// define_id!(UserId);
/// define_id!(OrderId);
///
/// let user_id = UserId::new(1);
/// // A UserId is not an OrderId; assigning one to the other won't compile.
/// assert_eq!(user_id.as_i64(), 1);
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
            /// Wrap a raw database ID.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// The raw database ID.
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

define_id!(UserId);
define_id!(ProductId);
define_id!(OrderId);
define_id!(OrderLineId);
