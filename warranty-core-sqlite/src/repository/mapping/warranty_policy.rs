use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};
use std::error::Error;
use uuid::Uuid;
use warranty_core_db::models::{EntityType, SoftDeletable, SoftDeleteState, WarrantyPolicy};

use crate::repository::table_mapping::{Dependent, Reference, SqliteQuery, TableMapping};
use crate::utils::{get_entity_meta, get_heapless_string, get_soft_delete_state, TryFromRow};

impl TryFromRow<SqliteRow> for WarrantyPolicy {
    fn try_from_row(row: &SqliteRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(WarrantyPolicy {
            meta: get_entity_meta(row)?,
            deletion: get_soft_delete_state(row)?,
            vehicle_model_id: row.try_get("vehicle_model_id")?,
            name: get_heapless_string(row, "name")?,
            duration_months: row.try_get("duration_months")?,
            mileage_limit: row.try_get("mileage_limit")?,
            hash: row.try_get("hash")?,
        })
    }
}

impl TableMapping for WarrantyPolicy {
    const TABLE: &'static str = "warranty_policy";
    const COLUMNS: &'static [&'static str] =
        &["vehicle_model_id", "name", "duration_months", "mileage_limit"];
    const SOFT_DELETE: bool = true;
    const REFERENCES: &'static [Reference] = &[Reference {
        column: "vehicle_model_id",
        table: "vehicle_model",
        entity_type: EntityType::VehicleModel,
        soft_delete: true,
    }];
    const RESTRICTED_BY: &'static [Dependent] = &[Dependent {
        table: "policy_coverage_part",
        column: "warranty_policy_id",
        entity_type: EntityType::PolicyCoveragePart,
        soft_delete: false,
    }];

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.vehicle_model_id)
            .bind(self.name.as_str())
            .bind(self.duration_months)
            .bind(self.mileage_limit)
    }

    fn reference_id(&self, column: &str) -> Option<Uuid> {
        match column {
            "vehicle_model_id" => Some(self.vehicle_model_id),
            _ => None,
        }
    }

    fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.get_deleted_at()
    }

    fn set_deleted_at(&mut self, deleted_at: Option<DateTime<Utc>>) {
        *self.deletion_mut() = SoftDeleteState::from_storage(deleted_at);
    }

    fn hash(&self) -> i64 {
        self.hash
    }

    fn set_hash(&mut self, hash: i64) {
        self.hash = hash;
    }
}
