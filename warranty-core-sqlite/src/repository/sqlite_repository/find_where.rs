use async_trait::async_trait;
use sqlx::Sqlite;
use warranty_core_api::RepositoryResult;
use warranty_core_db::repository::{Criteria, FindWhere};

use super::repo_impl::{SqliteRepository, Visibility};
use crate::repository::table_mapping::TableMapping;

#[async_trait]
impl<T: TableMapping> FindWhere<Sqlite, T> for SqliteRepository<T> {
    async fn find(&self, criteria: Criteria) -> RepositoryResult<Vec<T>> {
        self.select(Visibility::Active, &criteria, Some("ORDER BY created_at, id"))
            .await
    }
}
