use async_trait::async_trait;
use sqlx::Sqlite;
use uuid::Uuid;
use warranty_core_api::RepositoryResult;
use warranty_core_db::repository::{Criteria, ExistById};

use super::repo_impl::{SqliteRepository, Visibility};
use crate::repository::table_mapping::TableMapping;

#[async_trait]
impl<T: TableMapping> ExistById<Sqlite> for SqliteRepository<T> {
    async fn exists(&self, id: Uuid) -> RepositoryResult<bool> {
        let criteria = Criteria::new().eq("id", id);
        Ok(self.select_count(Visibility::Active, &criteria).await? > 0)
    }
}
