use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;
use warranty_core_api::RepositoryResult;

/// Generic repository trait for checking whether an active entity exists
#[async_trait]
pub trait ExistById<DB: Database>: Send + Sync {
    /// Returns `true` when a row with this id exists and is not soft-deleted
    async fn exists(&self, id: Uuid) -> RepositoryResult<bool>;
}
