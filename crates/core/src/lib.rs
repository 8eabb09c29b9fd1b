//! ProScience Core - Shared types and catalog.
//!
//! This crate provides the domain types used by every ProScience component:
//! - `storefront` - Public-facing supplement shop
//! - `admin` - Back-office panel
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP,
//! no session handling. The product catalog is static seed data compiled
//! into the binary, so it lives here as well.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, prices, emails, statuses and the product record
//! - [`catalog`] - Seed products plus filtering, sorting and search

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod types;

pub use catalog::{Catalog, ProductQuery, SortOption, StockFilter};
pub use types::*;
