//! PostgreSQL persistence: the concrete item repository and the pure
//! filter-query builder it delegates to.

pub mod pg_item_repository;
pub mod query_builder;

pub use pg_item_repository::PgItemRepository;
pub use query_builder::{FilterArg, FilterQuery, build_filter_query};
