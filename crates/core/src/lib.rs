//! `lavka-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no storage or HTTP
//! concerns): strongly typed identifiers, money, and the domain error model.

pub mod error;
pub mod id;
pub mod money;

pub use error::{DomainError, DomainResult};
pub use id::{CategoryId, ItemId, OrderId, ShopId, UserId};
pub use money::Money;
