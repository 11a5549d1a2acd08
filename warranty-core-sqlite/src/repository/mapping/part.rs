use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};
use std::error::Error;
use uuid::Uuid;
use warranty_core_db::models::{EntityType, Part, SoftDeletable, SoftDeleteState};

use crate::repository::table_mapping::{Dependent, Reference, SqliteQuery, TableMapping};
use crate::utils::{
    get_decimal, get_entity_meta, get_heapless_string, get_soft_delete_state, TryFromRow,
};

impl TryFromRow<SqliteRow> for Part {
    fn try_from_row(row: &SqliteRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(Part {
            meta: get_entity_meta(row)?,
            deletion: get_soft_delete_state(row)?,
            part_category_id: row.try_get("part_category_id")?,
            part_number: get_heapless_string(row, "part_number")?,
            name: get_heapless_string(row, "name")?,
            unit_price: get_decimal(row, "unit_price")?,
            hash: row.try_get("hash")?,
        })
    }
}

impl TableMapping for Part {
    const TABLE: &'static str = "part";
    const COLUMNS: &'static [&'static str] =
        &["part_category_id", "part_number", "name", "unit_price"];
    const SOFT_DELETE: bool = true;
    const REFERENCES: &'static [Reference] = &[Reference {
        column: "part_category_id",
        table: "part_category",
        entity_type: EntityType::PartCategory,
        soft_delete: true,
    }];
    // Coverage links are not soft-deletable, any link blocks deletion
    const RESTRICTED_BY: &'static [Dependent] = &[Dependent {
        table: "policy_coverage_part",
        column: "part_id",
        entity_type: EntityType::PolicyCoveragePart,
        soft_delete: false,
    }];

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.part_category_id)
            .bind(self.part_number.as_str())
            .bind(self.name.as_str())
            .bind(self.unit_price.to_string())
    }

    fn reference_id(&self, column: &str) -> Option<Uuid> {
        match column {
            "part_category_id" => Some(self.part_category_id),
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
