//! Mapping between entity models and their SQLite tables.
//!
//! Every table carries the same bookkeeping columns (`id`, `created_at`,
//! `updated_at`, `hash` and, for soft-deletable entities, `deleted_at`);
//! a [`TableMapping`] describes the remaining domain columns and the
//! relationships the write path has to check.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteRow};
use sqlx::Sqlite;
use uuid::Uuid;
use warranty_core_db::models::{Auditable, EntityType};

use crate::utils::TryFromRow;

pub type SqliteQuery<'q> = Query<'q, Sqlite, SqliteArguments<'q>>;

/// Foreign key held by an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub column: &'static str,
    pub table: &'static str,
    pub entity_type: EntityType,
    /// Whether the referenced table has `deleted_at`
    pub soft_delete: bool,
}

/// Table whose rows block deleting the entity while they reference it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dependent {
    pub table: &'static str,
    pub column: &'static str,
    pub entity_type: EntityType,
    /// Dependent rows that are themselves soft-deleted do not block
    pub soft_delete: bool,
}

pub trait TableMapping:
    Auditable + TryFromRow<SqliteRow> + Clone + Serialize + Send + Sync + Unpin + 'static
{
    const TABLE: &'static str;

    /// Domain columns, in the order `bind_columns` binds them
    const COLUMNS: &'static [&'static str];

    const SOFT_DELETE: bool;

    const REFERENCES: &'static [Reference] = &[];

    const RESTRICTED_BY: &'static [Dependent] = &[];

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q>;

    /// Value of one of the `REFERENCES` columns
    fn reference_id(&self, column: &str) -> Option<Uuid>;

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        None
    }

    /// No-op for tables without `deleted_at`
    fn set_deleted_at(&mut self, _deleted_at: Option<DateTime<Utc>>) {}

    fn hash(&self) -> i64;

    fn set_hash(&mut self, hash: i64);
}

/// Bookkeeping columns present on the table of `T`
pub fn base_columns<T: TableMapping>() -> Vec<&'static str> {
    let mut columns = vec!["id", "created_at", "updated_at", "hash"];
    if T::SOFT_DELETE {
        columns.push("deleted_at");
    }
    columns
}

/// Every column a caller may filter `T` on
pub fn filterable_columns<T: TableMapping>() -> Vec<&'static str> {
    let mut columns = base_columns::<T>();
    columns.extend_from_slice(T::COLUMNS);
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use warranty_core_db::models::{Customer, PolicyCoveragePart, Vehicle};

    #[test]
    fn test_filterable_columns_follow_soft_delete() {
        let customer = filterable_columns::<Customer>();
        assert!(customer.contains(&"deleted_at"));
        assert!(customer.contains(&"email"));

        let coverage = filterable_columns::<PolicyCoveragePart>();
        assert!(!coverage.contains(&"deleted_at"));
        assert!(coverage.contains(&"part_id"));
    }

    #[test]
    fn test_vehicle_references() {
        let columns: Vec<_> = Vehicle::REFERENCES.iter().map(|r| r.column).collect();
        assert_eq!(columns, vec!["customer_id", "vehicle_model_id"]);
        assert!(Vehicle::RESTRICTED_BY.is_empty());
    }
}
