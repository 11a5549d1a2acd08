use async_trait::async_trait;
use sqlx::Database;
use warranty_core_api::RepositoryResult;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for loading every active entity of a type
#[async_trait]
pub trait LoadAll<DB: Database, T: Identifiable>: Send + Sync {
    /// All non-deleted entities. Order is not guaranteed.
    async fn get_all(&self) -> RepositoryResult<Vec<T>>;

    /// Number of non-deleted entities
    async fn count(&self) -> RepositoryResult<usize>;
}
