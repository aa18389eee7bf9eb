//! Dynamic filter-query construction for the inventory table.
//!
//! Pure and deterministic: the same filter always yields the same SQL text,
//! so generated queries are testable by string equality. Conditions are
//! appended in the fixed order name, unit, amount, expires_at with
//! sequential positional placeholders; skipped fields leave no gaps in the
//! numbering.

use chrono::{DateTime, Utc};

use crate::domain::entities::ItemFilter;

/// Unfiltered base select. Column order (id, name, unit, amount,
/// expires_at) is part of the external schema contract.
pub const SELECT_ALL: &str = "SELECT * FROM inventory";

/// A single bound value, in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterArg {
    Text(String),
    Float(f64),
    Timestamp(DateTime<Utc>),
}

/// A generated query and its ordered argument list.
///
/// An empty `args` vec is the sentinel for the empty filter: `sql` holds
/// the unfiltered select and callers must reject it before executing
/// (the builder itself never errors).
#[derive(Debug, Clone, PartialEq)]
pub struct FilterQuery {
    pub sql: String,
    pub args: Vec<FilterArg>,
}

impl FilterQuery {
    /// Returns true for the empty-filter sentinel.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }
}

/// Builds a parameterized select over the fields set in `filter`.
pub fn build_filter_query(filter: &ItemFilter) -> FilterQuery {
    let mut conditions: Vec<String> = Vec::new();
    let mut args: Vec<FilterArg> = Vec::new();

    if let Some(name) = &filter.name {
        args.push(FilterArg::Text(name.clone()));
        conditions.push(format!("name = ${}", args.len()));
    }

    if let Some(unit) = &filter.unit {
        args.push(FilterArg::Text(unit.clone()));
        conditions.push(format!("unit = ${}", args.len()));
    }

    if let Some(amount) = filter.amount {
        args.push(FilterArg::Float(amount));
        conditions.push(format!("amount = ${}", args.len()));
    }

    if let Some(expires_at) = filter.expires_at {
        args.push(FilterArg::Timestamp(expires_at));
        conditions.push(format!("expires_at = ${}", args.len()));
    }

    if conditions.is_empty() {
        return FilterQuery {
            sql: SELECT_ALL.to_string(),
            args,
        };
    }

    FilterQuery {
        sql: format!("{SELECT_ALL} WHERE {}", conditions.join(" AND ")),
        args,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_field_filter() {
        let filter = ItemFilter {
            name: Some("rice".to_string()),
            ..Default::default()
        };

        let query = build_filter_query(&filter);

        assert_eq!(query.sql, "SELECT * FROM inventory WHERE name = $1");
        assert_eq!(query.args, vec![FilterArg::Text("rice".to_string())]);
    }

    #[test]
    fn test_skipped_fields_leave_no_placeholder_gaps() {
        let filter = ItemFilter {
            name: Some("rice".to_string()),
            amount: Some(2.0),
            ..Default::default()
        };

        let query = build_filter_query(&filter);

        assert_eq!(
            query.sql,
            "SELECT * FROM inventory WHERE name = $1 AND amount = $2"
        );
        assert_eq!(
            query.args,
            vec![
                FilterArg::Text("rice".to_string()),
                FilterArg::Float(2.0),
            ]
        );
    }

    #[test]
    fn test_all_fields_in_fixed_order() {
        let expires_at: DateTime<Utc> = "2026-01-01T00:00:00Z".parse().unwrap();
        let filter = ItemFilter {
            name: Some("rice".to_string()),
            unit: Some("kg".to_string()),
            amount: Some(2.0),
            expires_at: Some(expires_at),
        };

        let query = build_filter_query(&filter);

        assert_eq!(
            query.sql,
            "SELECT * FROM inventory WHERE name = $1 AND unit = $2 AND amount = $3 AND expires_at = $4"
        );
        assert_eq!(query.args.len(), 4);
        assert_eq!(query.args[3], FilterArg::Timestamp(expires_at));
    }

    #[test]
    fn test_trailing_field_alone_gets_first_placeholder() {
        let expires_at: DateTime<Utc> = "2026-01-01T00:00:00Z".parse().unwrap();
        let filter = ItemFilter {
            expires_at: Some(expires_at),
            ..Default::default()
        };

        let query = build_filter_query(&filter);

        assert_eq!(query.sql, "SELECT * FROM inventory WHERE expires_at = $1");
        assert_eq!(query.args, vec![FilterArg::Timestamp(expires_at)]);
    }

    #[test]
    fn test_empty_filter_returns_sentinel() {
        let query = build_filter_query(&ItemFilter::default());

        assert!(query.is_empty());
        assert_eq!(query.sql, SELECT_ALL);
        assert!(query.args.is_empty());
    }

    #[test]
    fn test_builder_is_deterministic() {
        let filter = ItemFilter {
            unit: Some("kg".to_string()),
            amount: Some(0.5),
            ..Default::default()
        };

        assert_eq!(build_filter_query(&filter), build_filter_query(&filter));
    }
}
