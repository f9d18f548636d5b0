//! `lavka-orders` — order domain: the order record, its status state
//! machine, and validation of the anonymous purchase request.
//!
//! The orchestration that turns a `PlaceOrder` into a durable order plus a
//! stock decrement lives in `lavka-store`; this crate is pure.

pub mod order;
pub mod place;
pub mod status;

pub use order::Order;
pub use place::PlaceOrder;
pub use status::{InvalidTransition, OrderStatus};
