use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};
use std::error::Error;
use uuid::Uuid;
use warranty_core_db::models::{EntityType, SoftDeletable, SoftDeleteState, Vehicle};

use crate::repository::table_mapping::{Reference, SqliteQuery, TableMapping};
use crate::utils::{get_entity_meta, get_heapless_string, get_soft_delete_state, TryFromRow};

impl TryFromRow<SqliteRow> for Vehicle {
    fn try_from_row(row: &SqliteRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(Vehicle {
            meta: get_entity_meta(row)?,
            deletion: get_soft_delete_state(row)?,
            customer_id: row.try_get("customer_id")?,
            vehicle_model_id: row.try_get("vehicle_model_id")?,
            vin: get_heapless_string(row, "vin")?,
            license_plate: get_heapless_string(row, "license_plate")?,
            purchase_date: row.try_get("purchase_date")?,
            mileage: row.try_get("mileage")?,
            hash: row.try_get("hash")?,
        })
    }
}

impl TableMapping for Vehicle {
    const TABLE: &'static str = "vehicle";
    const COLUMNS: &'static [&'static str] = &[
        "customer_id",
        "vehicle_model_id",
        "vin",
        "license_plate",
        "purchase_date",
        "mileage",
    ];
    const SOFT_DELETE: bool = true;
    const REFERENCES: &'static [Reference] = &[
        Reference {
            column: "customer_id",
            table: "customer",
            entity_type: EntityType::Customer,
            soft_delete: true,
        },
        Reference {
            column: "vehicle_model_id",
            table: "vehicle_model",
            entity_type: EntityType::VehicleModel,
            soft_delete: true,
        },
    ];

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.customer_id)
            .bind(self.vehicle_model_id)
            .bind(self.vin.as_str())
            .bind(self.license_plate.as_str())
            .bind(self.purchase_date)
            .bind(self.mileage)
    }

    fn reference_id(&self, column: &str) -> Option<Uuid> {
        match column {
            "customer_id" => Some(self.customer_id),
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
