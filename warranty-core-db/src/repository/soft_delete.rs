use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;
use warranty_core_api::RepositoryResult;

use super::tracked::Tracked;
use crate::models::soft_deletable::SoftDeletable;

/// Repository operations that only exist for soft-deletable types, including
/// the explicit bypasses of the default `deleted_at IS NULL` filter.
#[async_trait]
pub trait SoftDeleteRepository<DB: Database, T: SoftDeletable>: Send + Sync {
    /// Like `get_by_id`, but also returns a soft-deleted row
    async fn get_by_id_including_deleted(&self, id: Uuid) -> RepositoryResult<Option<T>>;

    /// Every soft-deleted entity of this type
    async fn get_deleted(&self) -> RepositoryResult<Vec<T>>;

    /// Stage a logical deletion
    ///
    /// # Errors
    /// * `AlreadyDeleted` - the entity is deleted, or a delete for it is already staged
    /// * `BusinessRuleViolation` - live dependants restrict the deletion
    async fn delete(&self, entity: T) -> RepositoryResult<Tracked<T>>;

    /// Stage the restoration of a deleted entity
    ///
    /// # Errors
    /// * `NotDeleted` - the entity is active
    async fn restore(&self, entity: T) -> RepositoryResult<Tracked<T>>;
}
