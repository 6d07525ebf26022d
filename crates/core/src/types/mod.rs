//! Core types for Showroom.
//!
//! This module provides type-safe wrappers for the catalog domain.

pub mod admin;
pub mod category;
pub mod id;
pub mod price;
pub mod product;
pub mod username;

pub use admin::AdminAccount;
pub use category::{Category, UnknownCategory};
pub use id::*;
pub use price::final_price;
pub use product::{NewProduct, Product, ProductSort, ProductUpdate, ValidationError};
pub use username::{Username, UsernameError};
