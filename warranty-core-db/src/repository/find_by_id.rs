use async_trait::async_trait;
use sqlx::Database;
use uuid::Uuid;
use warranty_core_api::RepositoryResult;

use crate::models::identifiable::Identifiable;

/// Generic repository trait for finding entities by their ID
///
/// Soft-deleted rows are invisible to this trait: implementations for
/// soft-deletable types add `deleted_at IS NULL` to the lookup.
///
/// # Type Parameters
/// * `DB` - The database type (must implement sqlx::Database)
/// * `T` - The entity type that must implement Identifiable trait
#[async_trait]
pub trait FindById<DB: Database, T: Identifiable>: Send + Sync {
    /// Find an entity by its unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(T))` - The found entity
    /// * `Ok(None)` - If the entity does not exist or is soft-deleted
    /// * `Err` - An error if the query could not be executed
    async fn get_by_id(&self, id: Uuid) -> RepositoryResult<Option<T>>;
}
