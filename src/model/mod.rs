//! Plain records owned by the actors.
//!
//! Nothing in here talks to another actor; the behaviour lives in the `*_actor` modules.

/// Declares a `u32` newtype id with the conversions the framework needs.
macro_rules! record_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $name(pub u32);

        impl From<u32> for $name {
            fn from(id: u32) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "_{}"), self.0)
            }
        }
    };
}

pub mod menu_item;
pub mod order;
pub mod tracker;

pub use menu_item::*;
pub use order::*;
pub use tracker::*;
