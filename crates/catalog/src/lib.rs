//! `lavka-catalog` — catalog domain: shops, categories, items.
//!
//! Pure domain types and their validation. Persistence lives in
//! `lavka-store`; this crate never performs IO.

pub mod category;
pub mod item;
pub mod shop;

pub use category::{Category, CategoryUpdate, NewCategory};
pub use item::{Item, ItemUpdate, NewItem};
pub use shop::{NewShop, Shop, ShopUpdate};
