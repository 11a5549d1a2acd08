//! Writes staged by repositories and flushed by [`UnitOfWork::save_changes`].
//!
//! [`UnitOfWork::save_changes`]: super::UnitOfWork::save_changes

use async_trait::async_trait;
use parking_lot::Mutex;
use sqlx::SqliteConnection;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;
use warranty_core_api::RepositoryResult;
use warranty_core_db::interceptor::TimestampInterceptor;
use warranty_core_db::models::EntityType;
use warranty_core_db::repository::Tracked;

use crate::repository::rules;
use crate::repository::table_mapping::TableMapping;
use crate::repository::write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOperation {
    Insert,
    Update,
    SoftDelete,
    Restore,
    /// Physical delete
    Remove,
}

/// Summary of one staged write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingChange {
    pub entity_type: EntityType,
    pub id: Uuid,
    pub operation: WriteOperation,
}

#[async_trait]
pub trait PendingWrite: Send + Sync {
    fn describe(&self) -> PendingChange;

    /// Stamps a fresh copy of the staged entity and writes it. Safe to call
    /// again after a failed attempt.
    async fn apply(
        &mut self,
        conn: &mut SqliteConnection,
        interceptor: &TimestampInterceptor,
    ) -> RepositoryResult<u64>;

    /// Hands the written entity to the caller's [`Tracked`] handle.
    fn publish(&mut self);
}

pub type Stamp<T> = fn(&TimestampInterceptor, &mut T) -> RepositoryResult<()>;

pub struct StagedWrite<T: TableMapping> {
    operation: WriteOperation,
    stamp: Stamp<T>,
    staged: T,
    handle: Tracked<T>,
    written: Option<T>,
}

impl<T: TableMapping> StagedWrite<T> {
    pub fn new(operation: WriteOperation, stamp: Stamp<T>, entity: T) -> Self {
        let handle = Tracked::new(entity.clone());
        Self {
            operation,
            stamp,
            staged: entity,
            handle,
            written: None,
        }
    }

    pub fn handle(&self) -> Tracked<T> {
        self.handle.clone()
    }
}

#[async_trait]
impl<T: TableMapping> PendingWrite for StagedWrite<T> {
    fn describe(&self) -> PendingChange {
        PendingChange {
            entity_type: T::ENTITY_TYPE,
            id: self.staged.get_id(),
            operation: self.operation,
        }
    }

    async fn apply(
        &mut self,
        conn: &mut SqliteConnection,
        interceptor: &TimestampInterceptor,
    ) -> RepositoryResult<u64> {
        let mut entity = self.staged.clone();
        let expected_hash = entity.hash();

        if self.operation != WriteOperation::Insert {
            // Audit state comes from the stored row, never from the caller's copy
            let id = entity.get_id();
            write::load_audit::<T>(conn, id)
                .await?
                .ok_or_else(|| write::not_found::<T>(id))?
                .apply_to(&mut entity);
        }

        match self.operation {
            WriteOperation::Insert | WriteOperation::Update | WriteOperation::Restore => {
                rules::check_references(conn, &entity).await?
            }
            WriteOperation::SoftDelete | WriteOperation::Remove => {
                rules::check_dependents(conn, &entity).await?
            }
        }

        if self.operation == WriteOperation::Remove {
            let affected = write::delete(conn, &entity, expected_hash).await?;
            self.written = Some(entity);
            return Ok(affected);
        }

        (self.stamp)(interceptor, &mut entity)?;
        write::refresh_hash(&mut entity)?;
        let affected = match self.operation {
            WriteOperation::Insert => write::insert(conn, &entity).await?,
            WriteOperation::Update => write::update(conn, &entity, expected_hash, false).await?,
            _ => write::update(conn, &entity, expected_hash, true).await?,
        };
        self.written = Some(entity);
        Ok(affected)
    }

    fn publish(&mut self) {
        if let Some(entity) = self.written.take() {
            self.handle.publish(entity);
        }
    }
}

/// Ordered list of staged writes shared by a unit of work and its repositories
#[derive(Clone, Default)]
pub struct ChangeSet {
    writes: Arc<Mutex<Vec<Box<dyn PendingWrite>>>>,
}

impl ChangeSet {
    pub fn push(&self, write: Box<dyn PendingWrite>) {
        self.writes.lock().push(write);
    }

    pub fn len(&self) -> usize {
        self.writes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.writes.lock().is_empty()
    }

    pub fn clear(&self) {
        self.writes.lock().clear();
    }

    pub fn describe(&self) -> Vec<PendingChange> {
        self.writes.lock().iter().map(|w| w.describe()).collect()
    }

    pub fn contains(&self, entity_type: EntityType, id: Uuid, operation: WriteOperation) -> bool {
        self.writes.lock().iter().any(|w| {
            let change = w.describe();
            change.entity_type == entity_type && change.id == id && change.operation == operation
        })
    }

    /// Moves every staged write into a batch. Unless the batch is completed,
    /// dropping it puts the writes back in front of anything staged meanwhile.
    pub fn take(&self) -> PendingBatch {
        let writes = std::mem::take(&mut *self.writes.lock());
        PendingBatch {
            writes,
            owner: self.clone(),
            completed: false,
        }
    }
}

impl fmt::Debug for ChangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeSet")
            .field("pending", &self.len())
            .finish()
    }
}

pub struct PendingBatch {
    writes: Vec<Box<dyn PendingWrite>>,
    owner: ChangeSet,
    completed: bool,
}

impl PendingBatch {
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn writes_mut(&mut self) -> &mut [Box<dyn PendingWrite>] {
        &mut self.writes
    }

    /// Publishes every written entity and drops the batch for good.
    pub fn complete(mut self) {
        for write in self.writes.iter_mut() {
            write.publish();
        }
        self.completed = true;
    }
}

impl Drop for PendingBatch {
    fn drop(&mut self) {
        if self.completed || self.writes.is_empty() {
            return;
        }
        let mut staged = self.owner.writes.lock();
        let newer = std::mem::take(&mut *staged);
        staged.append(&mut self.writes);
        staged.extend(newer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_utils::create_test_customer;

    fn staged_insert() -> Box<dyn PendingWrite> {
        Box::new(StagedWrite::new(
            WriteOperation::Insert,
            |interceptor, entity| {
                interceptor.on_insert(entity);
                Ok(())
            },
            create_test_customer("batch@x.com"),
        ))
    }

    #[test]
    fn test_dropped_batch_restores_writes_in_order() {
        let changes = ChangeSet::default();
        changes.push(staged_insert());
        let first = changes.describe()[0];

        let batch = changes.take();
        assert!(changes.is_empty());
        changes.push(staged_insert());
        drop(batch);

        let restored = changes.describe();
        assert_eq!(restored.len(), 2);
        assert_eq!(restored[0], first);
    }

    #[test]
    fn test_completed_batch_is_gone() {
        let changes = ChangeSet::default();
        changes.push(staged_insert());
        changes.take().complete();
        assert!(changes.is_empty());
    }

    #[test]
    fn test_contains_matches_operation() {
        let changes = ChangeSet::default();
        let write = staged_insert();
        let change = write.describe();
        changes.push(write);

        assert!(changes.contains(change.entity_type, change.id, WriteOperation::Insert));
        assert!(!changes.contains(change.entity_type, change.id, WriteOperation::SoftDelete));
    }
}
