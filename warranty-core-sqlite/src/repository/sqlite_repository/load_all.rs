use async_trait::async_trait;
use sqlx::Sqlite;
use warranty_core_api::RepositoryResult;
use warranty_core_db::repository::{Criteria, LoadAll};

use super::repo_impl::{SqliteRepository, Visibility};
use crate::repository::table_mapping::TableMapping;

#[async_trait]
impl<T: TableMapping> LoadAll<Sqlite, T> for SqliteRepository<T> {
    async fn get_all(&self) -> RepositoryResult<Vec<T>> {
        self.select(Visibility::Active, &Criteria::new(), Some("ORDER BY created_at, id"))
            .await
    }

    async fn count(&self) -> RepositoryResult<usize> {
        self.select_count(Visibility::Active, &Criteria::new()).await
    }
}
