use async_trait::async_trait;
use sqlx::Sqlite;
use warranty_core_api::RepositoryResult;
use warranty_core_db::repository::{Criteria, LoadPage, Page, PageRequest};

use super::repo_impl::{SqliteRepository, Visibility};
use crate::repository::table_mapping::TableMapping;

#[async_trait]
impl<T: TableMapping> LoadPage<Sqlite, T> for SqliteRepository<T> {
    async fn get_page(&self, request: PageRequest) -> RepositoryResult<Page<T>> {
        let total = self.select_count(Visibility::Active, &Criteria::new()).await?;
        let items = self
            .select_page(Visibility::Active, request.limit, request.offset)
            .await?;
        Ok(Page::new(items, total, request.limit, request.offset))
    }
}
