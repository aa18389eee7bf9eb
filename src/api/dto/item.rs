//! DTOs for item endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::entities::{Item, ItemFilter, NewItem};

/// Request to create a new item. All fields required; the id is assigned
/// by the store.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateItemRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,

    #[validate(length(min = 1, message = "unit must not be empty"))]
    pub unit: String,

    /// No sign or range constraint on amounts.
    pub amount: f64,

    pub expires_at: DateTime<Utc>,
}

impl CreateItemRequest {
    pub fn into_new_item(self) -> NewItem {
        NewItem {
            name: self.name,
            unit: self.unit,
            amount: self.amount,
            expires_at: self.expires_at,
        }
    }
}

/// Request to fully update an existing item. The id comes from the path;
/// every mutable field is overwritten.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateItemRequest {
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,

    #[validate(length(min = 1, message = "unit must not be empty"))]
    pub unit: String,

    pub amount: f64,

    pub expires_at: DateTime<Utc>,
}

impl UpdateItemRequest {
    pub fn into_item(self, id: Uuid) -> Item {
        Item {
            id,
            name: self.name,
            unit: self.unit,
            amount: self.amount,
            expires_at: self.expires_at,
        }
    }
}

/// Equality criteria for filtered reads. Omitted fields do not participate;
/// at least one field must be set.
#[derive(Debug, Default, Deserialize)]
pub struct FilterItemsRequest {
    pub name: Option<String>,
    pub unit: Option<String>,
    pub amount: Option<f64>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl FilterItemsRequest {
    pub fn into_filter(self) -> ItemFilter {
        ItemFilter {
            name: self.name,
            unit: self.unit,
            amount: self.amount,
            expires_at: self.expires_at,
        }
    }
}

/// JSON representation of an item.
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: Uuid,
    pub name: String,
    pub unit: String,
    pub amount: f64,
    pub expires_at: DateTime<Utc>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            name: item.name,
            unit: item.unit,
            amount: item.amount,
            expires_at: item.expires_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_validation() {
        let request = CreateItemRequest {
            name: "rice".to_string(),
            unit: "kg".to_string(),
            amount: 2.0,
            expires_at: Utc::now(),
        };
        assert!(request.validate().is_ok());

        let request = CreateItemRequest {
            name: String::new(),
            unit: "kg".to_string(),
            amount: 2.0,
            expires_at: Utc::now(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_negative_amount_is_accepted() {
        // Amounts carry no validation by design.
        let request = CreateItemRequest {
            name: "rice".to_string(),
            unit: "kg".to_string(),
            amount: -1.0,
            expires_at: Utc::now(),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_filter_request_maps_omitted_fields_to_unset() {
        let request: FilterItemsRequest = serde_json::from_str(r#"{"name": "rice"}"#).unwrap();
        let filter = request.into_filter();

        assert_eq!(filter.name.as_deref(), Some("rice"));
        assert!(filter.unit.is_none());
        assert!(filter.amount.is_none());
        assert!(filter.expires_at.is_none());
    }
}
