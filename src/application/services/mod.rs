//! Application services orchestrating domain operations.

pub mod inventory_service;

pub use inventory_service::InventoryService;
