//! Showroom Core - Shared types library.
//!
//! This crate provides the domain types used across all Showroom components:
//! - `server` - Catalog API and admin panel API
//! - `integration-tests` - End-to-end HTTP tests
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no locking,
//! no HTTP. Validation of caller-supplied product data lives here so every
//! entry point (admin API, seed files) applies the same rules.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, catalog categories, products, prices and admin accounts

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
