pub mod categories;
pub mod items;
pub mod orders;
pub mod public;
pub mod shop;
