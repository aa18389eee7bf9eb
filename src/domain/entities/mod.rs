//! Core business entities.

pub mod item;

pub use item::{Item, ItemFilter, NewItem};
