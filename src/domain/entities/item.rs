//! Item entity and filter criteria for inventory records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tracked inventory record.
///
/// The `id` is generated by the store on insert and immutable thereafter.
/// `amount` carries no sign or range constraint; negative and zero amounts
/// are stored as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Item {
    pub id: Uuid,
    pub name: String,
    pub unit: String,
    pub amount: f64,
    pub expires_at: DateTime<Utc>,
}

impl Item {
    /// Attaches a store-generated id to creation input.
    pub fn from_new(id: Uuid, new_item: NewItem) -> Self {
        Self {
            id,
            name: new_item.name,
            unit: new_item.unit,
            amount: new_item.amount,
            expires_at: new_item.expires_at,
        }
    }

    /// Cache key for this item: the string form of its id.
    pub fn cache_key(&self) -> String {
        self.id.to_string()
    }
}

/// Input data for creating a new item. The store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub name: String,
    pub unit: String,
    pub amount: f64,
    pub expires_at: DateTime<Utc>,
}

/// Optional equality criteria used to narrow a filtered read.
///
/// `None` means the field does not participate in the filter. A filter with
/// all fields unset is the "empty filter" sentinel; filtered reads reject it
/// so the filter endpoint can never turn into a full-table dump
/// (`read_all` is the explicit unfiltered path).
///
/// Matching is exact equality on every field, including `amount` and
/// `expires_at`. This is the documented existing contract, fragile as it is
/// for floats and timestamps.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ItemFilter {
    pub name: Option<String>,
    pub unit: Option<String>,
    pub amount: Option<f64>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl ItemFilter {
    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.unit.is_none()
            && self.amount.is_none()
            && self.expires_at.is_none()
    }
}
