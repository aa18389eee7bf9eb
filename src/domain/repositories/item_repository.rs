//! Repository trait for inventory item data access.

use crate::domain::entities::{Item, ItemFilter, NewItem};
use crate::error::AppError;
use async_trait::async_trait;
use uuid::Uuid;

/// Repository interface for inventory items: the five CRUD operations plus
/// a liveness probe.
///
/// Mutating operations (`create`, `update`, `delete`) run under an explicit
/// transaction at the store; reads do not.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgItemRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Inserts a new item and returns it with the store-generated id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] if the transaction cannot be opened,
    /// the insert fails, or the commit fails. The transaction is rolled
    /// back on every failure path.
    async fn create(&self, new_item: NewItem) -> Result<Item, AppError>;

    /// Looks up a single item by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no row matches, distinct from
    /// [`AppError::Store`] for connectivity or query failures.
    async fn read(&self, id: Uuid) -> Result<Item, AppError>;

    /// Returns every item in the store. Zero rows is an empty vec, not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn read_all(&self) -> Result<Vec<Item>, AppError>;

    /// Returns items matching the filter.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidArgument`] for the empty filter, without
    /// touching the store. Returns [`AppError::Store`] on database errors.
    async fn read_by(&self, filter: &ItemFilter) -> Result<Vec<Item>, AppError>;

    /// Overwrites all mutable fields of the item keyed by `item.id` and
    /// returns the caller-supplied item on success, so callers can re-cache
    /// without a re-read.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no row matches the id.
    /// Returns [`AppError::Store`] on database errors.
    async fn update(&self, item: &Item) -> Result<Item, AppError>;

    /// Deletes the item keyed by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the id does not exist, including
    /// a repeated delete of the same id.
    /// Returns [`AppError::Store`] on database errors.
    async fn delete(&self, id: Uuid) -> Result<(), AppError>;

    /// Checks connectivity to the store. Used for health reporting.
    async fn ping(&self) -> Result<(), AppError>;
}
