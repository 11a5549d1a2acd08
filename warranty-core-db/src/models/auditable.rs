use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::entity_type::EntityType;
use super::identifiable::Identifiable;

/// Identity and audit timestamps shared by every persisted entity.
///
/// The fields are read-only outside this crate. The id and creation time are
/// assigned together at construction; afterwards only the
/// [`TimestampInterceptor`](crate::interceptor::TimestampInterceptor) moves
/// the timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMeta {
    id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl EntityMeta {
    /// Fresh identity for an entity that has never been persisted.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Rebuilds the metadata of a row read back from storage.
    pub fn from_storage(
        id: Uuid,
        created_at: DateTime<Utc>,
        updated_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id,
            created_at,
            updated_at,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub(crate) fn stamp_created(&mut self, now: DateTime<Utc>) {
        self.created_at = now;
        self.updated_at = Some(now);
    }

    /// Never moves `updated_at` backwards, nor below `created_at`.
    pub(crate) fn stamp_updated(&mut self, now: DateTime<Utc>) {
        let floor = self.updated_at.unwrap_or(self.created_at).max(self.created_at);
        self.updated_at = Some(now.max(floor));
    }
}

impl Default for EntityMeta {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for entities whose creation and modification times are tracked
pub trait Auditable: Identifiable {
    const ENTITY_TYPE: EntityType;

    fn meta(&self) -> &EntityMeta;

    fn meta_mut(&mut self) -> &mut EntityMeta;

    fn get_created_at(&self) -> DateTime<Utc> {
        self.meta().created_at()
    }

    fn get_updated_at(&self) -> Option<DateTime<Utc>> {
        self.meta().updated_at()
    }
}
