use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row};
use std::error::Error;
use uuid::Uuid;
use warranty_core_db::models::{Customer, EntityType, SoftDeletable, SoftDeleteState};

use crate::repository::table_mapping::{Dependent, SqliteQuery, TableMapping};
use crate::utils::{
    get_entity_meta, get_heapless_string, get_optional_heapless_string, get_soft_delete_state,
    TryFromRow,
};

impl TryFromRow<SqliteRow> for Customer {
    fn try_from_row(row: &SqliteRow) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(Customer {
            meta: get_entity_meta(row)?,
            deletion: get_soft_delete_state(row)?,
            first_name: get_heapless_string(row, "first_name")?,
            last_name: get_heapless_string(row, "last_name")?,
            email: get_heapless_string(row, "email")?,
            phone: get_optional_heapless_string(row, "phone")?,
            address: get_optional_heapless_string(row, "address")?,
            hash: row.try_get("hash")?,
        })
    }
}

impl TableMapping for Customer {
    const TABLE: &'static str = "customer";
    const COLUMNS: &'static [&'static str] =
        &["first_name", "last_name", "email", "phone", "address"];
    const SOFT_DELETE: bool = true;
    const RESTRICTED_BY: &'static [Dependent] = &[Dependent {
        table: "vehicle",
        column: "customer_id",
        entity_type: EntityType::Vehicle,
        soft_delete: true,
    }];

    fn bind_columns<'q>(&'q self, query: SqliteQuery<'q>) -> SqliteQuery<'q> {
        query
            .bind(self.first_name.as_str())
            .bind(self.last_name.as_str())
            .bind(self.email.as_str())
            .bind(self.phone.as_ref().map(|s| s.as_str()))
            .bind(self.address.as_ref().map(|s| s.as_str()))
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
