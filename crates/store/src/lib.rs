//! `lavka-store` — persistence boundary and service orchestration.
//!
//! Store traits model the external managed backend (relational tables with
//! row-level scoping plus an object-storage bucket). Two implementations
//! exist per trait: in-memory (tests/dev) and Postgres (sqlx). The crate
//! also hosts the two services that coordinate multiple store writes:
//! order placement and owner-side order administration.

pub mod catalog_store;
pub mod error;
pub mod media_store;
pub mod memory;
pub mod order_admin;
pub mod order_store;
pub mod placement;
pub mod postgres;

#[cfg(test)]
mod integration_tests;

pub use catalog_store::{CatalogStore, DecrementOutcome};
pub use error::StoreError;
pub use media_store::{InMemoryMediaStore, MediaStore};
pub use memory::{InMemoryCatalogStore, InMemoryOrderStore};
pub use order_admin::{OrderAdmin, StatusUpdateError};
pub use order_store::OrderStore;
pub use placement::{OrderPlacement, PlaceOrderError};
pub use postgres::{PostgresCatalogStore, PostgresOrderStore, ensure_schema};
