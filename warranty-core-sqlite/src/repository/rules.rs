//! Relationship rules enforced before a write reaches the database.
//!
//! The schema's foreign keys only see physical rows. A soft-deleted parent
//! still satisfies them, and soft-deleting a parent never trips them, so both
//! directions are checked here against live rows.

use sqlx::{Row, SqliteConnection};
use uuid::Uuid;
use warranty_core_api::{RepositoryError, RepositoryResult};

use super::table_mapping::{Dependent, Reference, TableMapping};

/// Every referenced row must exist and be active.
pub async fn check_references<T: TableMapping>(
    conn: &mut SqliteConnection,
    entity: &T,
) -> RepositoryResult<()> {
    for reference in T::REFERENCES {
        let Some(id) = entity.reference_id(reference.column) else {
            continue;
        };
        if !reference_is_active(conn, reference, id).await? {
            return Err(RepositoryError::BusinessRuleViolation(format!(
                "{} {} references {} {} which does not exist or is deleted",
                T::ENTITY_TYPE,
                entity.get_id(),
                reference.entity_type,
                id
            )));
        }
    }
    Ok(())
}

/// Deleting the entity must not orphan active dependents.
pub async fn check_dependents<T: TableMapping>(
    conn: &mut SqliteConnection,
    entity: &T,
) -> RepositoryResult<()> {
    for dependent in T::RESTRICTED_BY {
        let count = count_dependents(conn, dependent, entity.get_id()).await?;
        if count > 0 {
            return Err(RepositoryError::BusinessRuleViolation(format!(
                "cannot delete {} {}: {} active {} record(s) reference it",
                T::ENTITY_TYPE,
                entity.get_id(),
                count,
                dependent.entity_type
            )));
        }
    }
    Ok(())
}

async fn reference_is_active(
    conn: &mut SqliteConnection,
    reference: &Reference,
    id: Uuid,
) -> RepositoryResult<bool> {
    let mut sql = format!("SELECT COUNT(*) FROM {} WHERE id = ?", reference.table);
    if reference.soft_delete {
        sql.push_str(" AND deleted_at IS NULL");
    }
    let row = sqlx::query(&sql).bind(id).fetch_one(&mut *conn).await?;
    let count: i64 = row.try_get(0)?;
    Ok(count > 0)
}

async fn count_dependents(
    conn: &mut SqliteConnection,
    dependent: &Dependent,
    id: Uuid,
) -> RepositoryResult<i64> {
    let mut sql = format!(
        "SELECT COUNT(*) FROM {} WHERE {} = ?",
        dependent.table, dependent.column
    );
    if dependent.soft_delete {
        sql.push_str(" AND deleted_at IS NULL");
    }
    let row = sqlx::query(&sql).bind(id).fetch_one(&mut *conn).await?;
    Ok(row.try_get(0)?)
}
