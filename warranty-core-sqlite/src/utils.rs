use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use sqlx::{sqlite::SqliteRow, Row};
use std::error::Error;
use std::str::FromStr;
use uuid::Uuid;
use warranty_core_db::models::{EntityMeta, SoftDeleteState};

/// A trait for converting a database row into a model.
pub trait TryFromRow<R>: Sized {
    /// Performs the conversion.
    fn try_from_row(row: &R) -> Result<Self, Box<dyn Error + Send + Sync>>;
}

/// Retrieves a required `HeaplessString` from a row.
pub fn get_heapless_string<const N: usize>(
    row: &SqliteRow,
    col_name: &str,
) -> Result<HeaplessString<N>, Box<dyn Error + Send + Sync>> {
    let s: String = row.try_get(col_name)?;
    HeaplessString::from_str(&s).map_err(|_| {
        format!("Value for column '{col_name}' is too long (max {N} chars)").into()
    })
}

/// Retrieves an optional `HeaplessString` from a row.
pub fn get_optional_heapless_string<const N: usize>(
    row: &SqliteRow,
    col_name: &str,
) -> Result<Option<HeaplessString<N>>, Box<dyn Error + Send + Sync>> {
    let s: Option<String> = row.try_get(col_name)?;
    s.map(|val| HeaplessString::from_str(&val))
        .transpose()
        .map_err(|_| {
            format!("Value for column '{col_name}' is too long (max {N} chars)").into()
        })
}

/// Decimals are stored as TEXT to keep their scale.
pub fn get_decimal(row: &SqliteRow, col_name: &str) -> Result<Decimal, Box<dyn Error + Send + Sync>> {
    let s: String = row.try_get(col_name)?;
    Decimal::from_str(&s)
        .map_err(|e| format!("Value for column '{col_name}' is not a decimal: {e}").into())
}

/// Reads `id`, `created_at` and `updated_at`.
pub fn get_entity_meta(row: &SqliteRow) -> Result<EntityMeta, Box<dyn Error + Send + Sync>> {
    let id: Uuid = row.try_get("id")?;
    let created_at: DateTime<Utc> = row.try_get("created_at")?;
    let updated_at: Option<DateTime<Utc>> = row.try_get("updated_at")?;
    Ok(EntityMeta::from_storage(id, created_at, updated_at))
}

pub fn get_soft_delete_state(
    row: &SqliteRow,
) -> Result<SoftDeleteState, Box<dyn Error + Send + Sync>> {
    let deleted_at: Option<DateTime<Utc>> = row.try_get("deleted_at")?;
    Ok(SoftDeleteState::from_storage(deleted_at))
}
