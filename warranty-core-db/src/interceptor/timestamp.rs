//! Audit timestamp stamping for outgoing writes.
//!
//! A unit of work takes one [`TimestampInterceptor`] snapshot per commit and
//! runs every staged entity through it before the rows are written, so all
//! entities of a batch share the same instant. The interceptor is the only
//! code outside the models allowed to move `created_at`, `updated_at` and
//! `deleted_at`.

use chrono::{DateTime, Utc};
use warranty_core_api::{RepositoryError, RepositoryResult};

use super::clock::Clock;
use crate::models::{Auditable, SoftDeletable};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampInterceptor {
    now: DateTime<Utc>,
}

impl TimestampInterceptor {
    /// Reads the clock once; every entity stamped by this interceptor gets the same instant.
    pub fn snapshot(clock: &dyn Clock) -> Self {
        Self { now: clock.now() }
    }

    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    /// Newly inserted entity: both timestamps become `now`, whatever the caller set.
    pub fn on_insert<T: Auditable>(&self, entity: &mut T) {
        entity.meta_mut().stamp_created(self.now);
    }

    /// Modified entity: only `updated_at` moves. The storage layer loads the
    /// stored audit columns into `entity` before calling this and never writes
    /// `created_at` on update.
    pub fn on_update<T: Auditable>(&self, entity: &mut T) {
        entity.meta_mut().stamp_updated(self.now);
    }

    pub fn on_soft_delete<T: SoftDeletable>(&self, entity: &mut T) -> RepositoryResult<()> {
        if entity.is_deleted() {
            return Err(RepositoryError::AlreadyDeleted {
                entity: T::ENTITY_TYPE.as_str(),
                id: entity.get_id(),
            });
        }
        entity.deletion_mut().mark_deleted(self.now);
        self.on_update(entity);
        Ok(())
    }

    pub fn on_restore<T: SoftDeletable>(&self, entity: &mut T) -> RepositoryResult<()> {
        if !entity.is_deleted() {
            return Err(RepositoryError::NotDeleted {
                entity: T::ENTITY_TYPE.as_str(),
                id: entity.get_id(),
            });
        }
        entity.deletion_mut().clear();
        self.on_update(entity);
        Ok(())
    }
}
