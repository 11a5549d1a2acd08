use sqlx::{sqlite::SqliteRow, Row};
use std::error::Error;
use uuid::Uuid;
use warranty_core_db::models::{EntityType, PolicyCoveragePart};

use crate::repository::table_mapping::{Reference, SqliteQuery, TableMapping};
use crate::utils::{get_entity_meta, TryFromRow};

impl TryFromRow<SqliteRow> for PolicyCoveragePart {
    fn try_from_row(row: &SqliteRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(PolicyCoveragePart {
            meta: get_entity_meta(row)?,
            warranty_policy_id: row.try_get("warranty_policy_id")?,
            part_id: row.try_get("part_id")?,
            hash: row.try_get("hash")?,
        })
    }
}

impl TableMapping for PolicyCoveragePart {
    const TABLE: &'static str = "policy_coverage_part";
    const COLUMNS: &'static [&'static str] = &["warranty_policy_id", "part_id"];
    const SOFT_DELETE: bool = false;
    const REFERENCES: &'static [Reference] = &[
        Reference {
            column: "warranty_policy_id",
            table: "warranty_policy",
            entity_type: EntityType::WarrantyPolicy,
            soft_delete: true,
        },
        Reference {
            column: "part_id",
            table: "part",
            entity_type: EntityType::Part,
            soft_delete: true,
        },
    ];

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query.bind(self.warranty_policy_id).bind(self.part_id)
    }

    fn reference_id(&self, column: &str) -> Option<Uuid> {
        match column {
            "warranty_policy_id" => Some(self.warranty_policy_id),
            "part_id" => Some(self.part_id),
            _ => None,
        }
    }

    fn hash(&self) -> i64 {
        self.hash
    }

    fn set_hash(&mut self, hash: i64) {
        self.hash = hash;
    }
}
