use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};
use std::error::Error;
use uuid::Uuid;
use warranty_core_db::models::{EntityType, SoftDeletable, SoftDeleteState, VehicleModel};

use crate::repository::table_mapping::{Dependent, SqliteQuery, TableMapping};
use crate::utils::{
    get_entity_meta, get_heapless_string, get_optional_heapless_string, get_soft_delete_state,
    TryFromRow,
};

impl TryFromRow<SqliteRow> for VehicleModel {
    fn try_from_row(row: &SqliteRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(VehicleModel {
            meta: get_entity_meta(row)?,
            deletion: get_soft_delete_state(row)?,
            brand: get_heapless_string(row, "brand")?,
            model_name: get_heapless_string(row, "model_name")?,
            year: row.try_get("year")?,
            description: get_optional_heapless_string(row, "description")?,
            hash: row.try_get("hash")?,
        })
    }
}

impl TableMapping for VehicleModel {
    const TABLE: &'static str = "vehicle_model";
    const COLUMNS: &'static [&'static str] = &["brand", "model_name", "year", "description"];
    const SOFT_DELETE: bool = true;
    const RESTRICTED_BY: &'static [Dependent] = &[
        Dependent {
            table: "vehicle",
            column: "vehicle_model_id",
            entity_type: EntityType::Vehicle,
            soft_delete: true,
        },
        Dependent {
            table: "warranty_policy",
            column: "vehicle_model_id",
            entity_type: EntityType::WarrantyPolicy,
            soft_delete: true,
        },
    ];

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.brand.as_str())
            .bind(self.model_name.as_str())
            .bind(self.year)
            .bind(self.description.as_ref().map(|s| s.as_str()))
    }

    fn reference_id(&self, _column: &str) -> Option<Uuid> {
        None
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
