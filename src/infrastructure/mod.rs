//! Infrastructure layer: PostgreSQL persistence and Redis caching.

pub mod cache;
pub mod persistence;
