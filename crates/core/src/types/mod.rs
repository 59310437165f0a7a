//! Core types for Lakkeriet.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod code;
pub mod email;
pub mod id;

pub use code::{StockCode, StockCodeError};
pub use email::{Email, EmailError};
pub use id::*;
