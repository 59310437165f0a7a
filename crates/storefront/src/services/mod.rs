//! Business logic services.
//!
//! Services sit between the HTTP routes and the repositories: they own the
//! storefront's pipelines (cart resolution, checkout, feed import) and the
//! account logic, while the `db` layer owns the SQL.

pub mod auth;
pub mod cart;
pub mod checkout;
pub mod import;
pub mod translate;

pub use auth::{AuthError, AuthService};
pub use cart::{CartItem, CartService, CartSnapshot};
pub use checkout::{CheckoutError, CheckoutService};
pub use import::{ImportError, ImportService, ImportSummary};
