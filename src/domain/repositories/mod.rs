//! Repository traits defining data access contracts.

pub mod item_repository;

pub use item_repository::ItemRepository;

#[cfg(test)]
pub use item_repository::MockItemRepository;
