//! Core types for ProScience.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod price;
pub mod product;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use price::{CurrencyCode, Price, round_cents};
pub use product::{NutritionFact, NutritionFacts, Product, ProductCategory};
pub use status::*;
