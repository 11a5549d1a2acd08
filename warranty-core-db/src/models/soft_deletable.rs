use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::auditable::Auditable;

/// Logical deletion marker.
///
/// `deleted_at` is the only source of truth for "is deleted": `None` means
/// active, `Some(instant)` means logically deleted at that instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftDeleteState {
    deleted_at: Option<DateTime<Utc>>,
}

impl SoftDeleteState {
    pub fn active() -> Self {
        Self { deleted_at: None }
    }

    pub fn from_storage(deleted_at: Option<DateTime<Utc>>) -> Self {
        Self { deleted_at }
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    pub(crate) fn mark_deleted(&mut self, now: DateTime<Utc>) {
        self.deleted_at = Some(now);
    }

    pub(crate) fn clear(&mut self) {
        self.deleted_at = None;
    }
}

/// Capability of entities that are deleted logically rather than physically
pub trait SoftDeletable: Auditable {
    fn deletion(&self) -> &SoftDeleteState;

    fn deletion_mut(&mut self) -> &mut SoftDeleteState;

    fn is_deleted(&self) -> bool {
        self.deletion().is_deleted()
    }

    fn get_deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deletion().deleted_at()
    }
}
