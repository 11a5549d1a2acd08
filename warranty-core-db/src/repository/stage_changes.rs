use warranty_core_api::RepositoryResult;

use super::tracked::Tracked;
use crate::models::identifiable::Identifiable;

/// Staging half of a repository: records writes without touching the store.
///
/// Nothing staged here is visible to reads until the owning unit of work
/// saves its changes. The returned [`Tracked`] handle holds the persisted
/// state (stamped timestamps, new concurrency hash) once that save succeeds.
pub trait StageChanges<T: Identifiable>: Send + Sync {
    /// Stage an insert
    fn add(&self, entity: T) -> RepositoryResult<Tracked<T>>;

    /// Stage a modification of a previously loaded entity.
    ///
    /// Only domain columns are written. Audit timestamps and the deletion
    /// state are taken from the stored row; use `delete`/`restore` to change
    /// the latter. At save time a row that no longer exists fails with
    /// `NotFound`, one changed since it was loaded with `ConcurrencyConflict`.
    fn update(&self, entity: T) -> RepositoryResult<Tracked<T>>;

    /// Stage a physical removal. Soft-deletable types should use
    /// [`SoftDeleteRepository::delete`](super::soft_delete::SoftDeleteRepository::delete) instead.
    /// Saving fails with `NotFound` when the row is gone.
    fn remove(&self, entity: T) -> RepositoryResult<()>;
}
