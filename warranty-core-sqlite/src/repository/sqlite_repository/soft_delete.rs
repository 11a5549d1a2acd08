use async_trait::async_trait;
use sqlx::Sqlite;
use uuid::Uuid;
use warranty_core_api::{RepositoryError, RepositoryResult};
use warranty_core_db::models::SoftDeletable;
use warranty_core_db::repository::{Criteria, SoftDeleteRepository, Tracked};

use super::repo_impl::{SqliteRepository, Visibility};
use crate::repository::rules;
use crate::repository::table_mapping::TableMapping;
use crate::unit_of_work::change_set::WriteOperation;

#[async_trait]
impl<T: TableMapping + SoftDeletable> SoftDeleteRepository<Sqlite, T> for SqliteRepository<T> {
    async fn get_by_id_including_deleted(&self, id: Uuid) -> RepositoryResult<Option<T>> {
        let criteria = Criteria::new().eq("id", id);
        let mut items = self.select(Visibility::All, &criteria, None).await?;
        Ok(items.pop())
    }

    async fn get_deleted(&self) -> RepositoryResult<Vec<T>> {
        self.select(Visibility::Deleted, &Criteria::new(), Some("ORDER BY deleted_at, id"))
            .await
    }

    async fn delete(&self, entity: T) -> RepositoryResult<Tracked<T>> {
        let id = entity.get_id();
        if entity.is_deleted() || self.is_staged(id, WriteOperation::SoftDelete) {
            return Err(RepositoryError::AlreadyDeleted {
                entity: T::ENTITY_TYPE.as_str(),
                id,
            });
        }

        {
            let mut conn = self.executor.acquire().await?;
            rules::check_dependents(conn.connection()?, &entity).await?;
        }

        Ok(self.stage(
            WriteOperation::SoftDelete,
            |interceptor, entity| interceptor.on_soft_delete(entity),
            entity,
        ))
    }

    async fn restore(&self, entity: T) -> RepositoryResult<Tracked<T>> {
        self.executor.ensure_open()?;
        let id = entity.get_id();
        if !entity.is_deleted() || self.is_staged(id, WriteOperation::Restore) {
            return Err(RepositoryError::NotDeleted {
                entity: T::ENTITY_TYPE.as_str(),
                id,
            });
        }

        Ok(self.stage(
            WriteOperation::Restore,
            |interceptor, entity| interceptor.on_restore(entity),
            entity,
        ))
    }
}
