//! HTTP request handlers for API endpoints.

pub mod health;
pub mod items;

pub use health::health_handler;
pub use items::{
    create_item_handler, delete_item_handler, filter_items_handler, list_items_handler,
    read_item_handler, update_item_handler,
};
