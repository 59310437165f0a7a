//! Domain models for the storefront.

pub mod cart;
pub mod order;
pub mod product;
pub mod user;

pub use cart::Cart;
pub use order::{NewOrder, NewOrderLine, Order, OrderLine};
pub use product::{NewProduct, Product};
pub use user::{CurrentUser, User};

/// Session keys for data stored in the client session.
pub mod session_keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for storing the shopping cart.
    pub const CART: &str = "cart";
}
