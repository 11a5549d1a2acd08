use async_trait::async_trait;
use sqlx::Sqlite;
use uuid::Uuid;
use warranty_core_api::RepositoryResult;
use warranty_core_db::repository::{Criteria, FindById};

use super::repo_impl::{SqliteRepository, Visibility};
use crate::repository::table_mapping::TableMapping;

#[async_trait]
impl<T: TableMapping> FindById<Sqlite, T> for SqliteRepository<T> {
    async fn get_by_id(&self, id: Uuid) -> RepositoryResult<Option<T>> {
        let criteria = Criteria::new().eq("id", id);
        let mut items = self.select(Visibility::Active, &criteria, None).await?;
        Ok(items.pop())
    }
}
