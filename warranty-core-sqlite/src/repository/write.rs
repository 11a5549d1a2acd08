use chrono::{DateTime, Utc};
use sqlx::SqliteConnection;
use uuid::Uuid;
use warranty_core_api::{RepositoryError, RepositoryResult};
use warranty_core_db::models::EntityMeta;
use warranty_core_db::utils::hash_as_i64;

use super::table_mapping::{base_columns, TableMapping};
use crate::utils::{get_entity_meta, get_soft_delete_state};

/// Audit columns of a row as currently stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredAudit {
    pub meta: EntityMeta,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl StoredAudit {
    /// Replaces whatever audit state the caller's copy carries.
    pub fn apply_to<T: TableMapping>(&self, entity: &mut T) {
        *entity.meta_mut() = self.meta.clone();
        entity.set_deleted_at(self.deleted_at);
    }
}

pub async fn load_audit<T: TableMapping>(
    conn: &mut SqliteConnection,
    id: Uuid,
) -> RepositoryResult<Option<StoredAudit>> {
    let columns = if T::SOFT_DELETE {
        "id, created_at, updated_at, deleted_at"
    } else {
        "id, created_at, updated_at"
    };
    let sql = format!("SELECT {columns} FROM {} WHERE id = ?", T::TABLE);
    let Some(row) = sqlx::query(&sql).bind(id).fetch_optional(&mut *conn).await? else {
        return Ok(None);
    };

    let meta = get_entity_meta(&row).map_err(sqlx::Error::Decode)?;
    let deleted_at = if T::SOFT_DELETE {
        get_soft_delete_state(&row)
            .map_err(sqlx::Error::Decode)?
            .deleted_at()
    } else {
        None
    };
    Ok(Some(StoredAudit { meta, deleted_at }))
}

/// Recomputes the concurrency token over the entity with `hash` zeroed.
pub fn refresh_hash<T: TableMapping>(entity: &mut T) -> RepositoryResult<()> {
    entity.set_hash(0);
    let hash = hash_as_i64(&*entity).map_err(RepositoryError::Persistence)?;
    entity.set_hash(hash);
    Ok(())
}

pub async fn insert<T: TableMapping>(
    conn: &mut SqliteConnection,
    entity: &T,
) -> RepositoryResult<u64> {
    let columns: Vec<&str> = base_columns::<T>()
        .into_iter()
        .chain(T::COLUMNS.iter().copied())
        .collect();
    let placeholders = vec!["?"; columns.len()].join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        T::TABLE,
        columns.join(", "),
        placeholders
    );

    let meta = entity.meta();
    let mut query = sqlx::query(&sql)
        .bind(meta.id())
        .bind(meta.created_at())
        .bind(meta.updated_at())
        .bind(entity.hash());
    if T::SOFT_DELETE {
        query = query.bind(entity.deleted_at());
    }
    let result = entity.bind_columns(query).execute(&mut *conn).await?;
    Ok(result.rows_affected())
}

/// Writes every mutable column, guarded by the hash the entity was loaded with.
/// `created_at` is never part of the statement, and `deleted_at` only when
/// `write_deletion` is set.
pub async fn update<T: TableMapping>(
    conn: &mut SqliteConnection,
    entity: &T,
    expected_hash: i64,
    write_deletion: bool,
) -> RepositoryResult<u64> {
    let write_deletion = write_deletion && T::SOFT_DELETE;
    let mut assignments: Vec<String> = T::COLUMNS.iter().map(|c| format!("{c} = ?")).collect();
    assignments.push("updated_at = ?".to_string());
    assignments.push("hash = ?".to_string());
    if write_deletion {
        assignments.push("deleted_at = ?".to_string());
    }
    let sql = format!(
        "UPDATE {} SET {} WHERE id = ? AND hash = ?",
        T::TABLE,
        assignments.join(", ")
    );

    let mut query = entity
        .bind_columns(sqlx::query(&sql))
        .bind(entity.meta().updated_at())
        .bind(entity.hash());
    if write_deletion {
        query = query.bind(entity.deleted_at());
    }
    let result = query
        .bind(entity.get_id())
        .bind(expected_hash)
        .execute(&mut *conn)
        .await?;

    match result.rows_affected() {
        0 => Err(conflict(entity)),
        affected => Ok(affected),
    }
}

pub async fn delete<T: TableMapping>(
    conn: &mut SqliteConnection,
    entity: &T,
    expected_hash: i64,
) -> RepositoryResult<u64> {
    let sql = format!("DELETE FROM {} WHERE id = ? AND hash = ?", T::TABLE);
    let result = sqlx::query(&sql)
        .bind(entity.get_id())
        .bind(expected_hash)
        .execute(&mut *conn)
        .await?;

    match result.rows_affected() {
        0 => Err(conflict(entity)),
        affected => Ok(affected),
    }
}

pub fn not_found<T: TableMapping>(id: Uuid) -> RepositoryError {
    RepositoryError::NotFound {
        entity: T::ENTITY_TYPE.as_str(),
        id,
    }
}

fn conflict<T: TableMapping>(entity: &T) -> RepositoryError {
    RepositoryError::ConcurrencyConflict {
        entity: T::ENTITY_TYPE.as_str(),
        id: entity.get_id(),
    }
}
