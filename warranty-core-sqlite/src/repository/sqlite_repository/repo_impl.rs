use sqlx::{QueryBuilder, Row, Sqlite};
use std::marker::PhantomData;
use uuid::Uuid;
use warranty_core_api::{RepositoryError, RepositoryResult};
use warranty_core_db::repository::{Condition, Criteria, CriteriaValue, Tracked};

use crate::executor::Executor;
use crate::repository::table_mapping::{filterable_columns, TableMapping};
use crate::unit_of_work::change_set::{ChangeSet, StagedWrite, Stamp, WriteOperation};

/// Which rows of a soft-deletable table a read sees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Visibility {
    Active,
    Deleted,
    All,
}

/// Repository for one entity type, bound to a unit of work.
///
/// Reads run immediately through the shared [`Executor`]; writes are staged
/// in the unit of work's [`ChangeSet`] until it saves.
pub struct SqliteRepository<T: TableMapping> {
    pub executor: Executor,
    changes: ChangeSet,
    _entity: PhantomData<fn() -> T>,
}

impl<T: TableMapping> SqliteRepository<T> {
    pub fn new(executor: Executor, changes: ChangeSet) -> Self {
        Self {
            executor,
            changes,
            _entity: PhantomData,
        }
    }

    pub(crate) fn stage(&self, operation: WriteOperation, stamp: Stamp<T>, entity: T) -> Tracked<T> {
        let write = StagedWrite::new(operation, stamp, entity);
        let handle = write.handle();
        self.changes.push(Box::new(write));
        handle
    }

    pub(crate) fn is_staged(&self, id: Uuid, operation: WriteOperation) -> bool {
        self.changes.contains(T::ENTITY_TYPE, id, operation)
    }

    pub(crate) async fn select(
        &self,
        visibility: Visibility,
        criteria: &Criteria,
        tail: Option<&str>,
    ) -> RepositoryResult<Vec<T>> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!("SELECT * FROM {}", T::TABLE));
        push_filter::<T>(&mut builder, visibility, criteria)?;
        if let Some(tail) = tail {
            builder.push(" ");
            builder.push(tail);
        }

        let rows = {
            let mut conn = self.executor.acquire().await?;
            builder.build().fetch_all(conn.connection()?).await?
        };

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(T::try_from_row(&row).map_err(sqlx::Error::Decode)?);
        }
        Ok(items)
    }

    pub(crate) async fn select_page(
        &self,
        visibility: Visibility,
        limit: usize,
        offset: usize,
    ) -> RepositoryResult<Vec<T>> {
        let mut builder = QueryBuilder::<Sqlite>::new(format!("SELECT * FROM {}", T::TABLE));
        push_filter::<T>(&mut builder, visibility, &Criteria::new())?;
        builder.push(" ORDER BY created_at, id LIMIT ");
        builder.push_bind(to_i64(limit));
        builder.push(" OFFSET ");
        builder.push_bind(to_i64(offset));

        let rows = {
            let mut conn = self.executor.acquire().await?;
            builder.build().fetch_all(conn.connection()?).await?
        };

        let mut items = Vec::with_capacity(rows.len());
        for row in rows {
            items.push(T::try_from_row(&row).map_err(sqlx::Error::Decode)?);
        }
        Ok(items)
    }

    pub(crate) async fn select_count(
        &self,
        visibility: Visibility,
        criteria: &Criteria,
    ) -> RepositoryResult<usize> {
        let mut builder =
            QueryBuilder::<Sqlite>::new(format!("SELECT COUNT(*) FROM {}", T::TABLE));
        push_filter::<T>(&mut builder, visibility, criteria)?;

        let row = {
            let mut conn = self.executor.acquire().await?;
            builder.build().fetch_one(conn.connection()?).await?
        };
        let count: i64 = row.try_get(0)?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// `WHERE` clause combining the soft-delete predicate with the caller's conditions.
fn push_filter<T: TableMapping>(
    builder: &mut QueryBuilder<'_, Sqlite>,
    visibility: Visibility,
    criteria: &Criteria,
) -> RepositoryResult<()> {
    if let Some(column) = criteria.unknown_column(&filterable_columns::<T>()) {
        return Err(RepositoryError::InvalidCriteria(format!(
            "unknown column '{column}' for {}",
            T::ENTITY_TYPE
        )));
    }

    builder.push(" WHERE 1 = 1");
    if T::SOFT_DELETE {
        match visibility {
            Visibility::Active => {
                builder.push(" AND deleted_at IS NULL");
            }
            Visibility::Deleted => {
                builder.push(" AND deleted_at IS NOT NULL");
            }
            Visibility::All => {}
        }
    }

    for condition in criteria.conditions() {
        builder.push(" AND ");
        match condition {
            Condition::Compare {
                column,
                comparison,
                value,
            } => {
                builder.push(*column);
                builder.push(" ");
                builder.push(comparison.as_sql());
                builder.push(" ");
                match value.clone() {
                    CriteriaValue::Uuid(v) => builder.push_bind(v),
                    CriteriaValue::Text(v) => builder.push_bind(v),
                    CriteriaValue::Integer(v) => builder.push_bind(v),
                    CriteriaValue::Timestamp(v) => builder.push_bind(v),
                    CriteriaValue::Date(v) => builder.push_bind(v),
                };
            }
            Condition::IsNull(column) => {
                builder.push(*column);
                builder.push(" IS NULL");
            }
            Condition::IsNotNull(column) => {
                builder.push(*column);
                builder.push(" IS NOT NULL");
            }
        }
    }
    Ok(())
}
