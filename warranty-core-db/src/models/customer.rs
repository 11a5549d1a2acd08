use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::auditable::{Auditable, EntityMeta};
use crate::models::entity_type::EntityType;
use crate::models::identifiable::Identifiable;
use crate::models::soft_deletable::{SoftDeletable, SoftDeleteState};

/// Database model for Customer
/// Owner of one or more vehicles covered by warranty policies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub meta: EntityMeta,
    pub deletion: SoftDeleteState,

    pub first_name: HeaplessString<50>,
    pub last_name: HeaplessString<50>,

    /// Unique among active customers
    pub email: HeaplessString<100>,
    pub phone: Option<HeaplessString<20>>,
    pub address: Option<HeaplessString<200>>,

    /// Hash of the entity with hash field set to 0
    /// - 0: for new entities not yet persisted
    /// - Non-zero: optimistic concurrency token of the stored row
    pub hash: i64,
}

impl Identifiable for Customer {
    fn get_id(&self) -> Uuid {
        self.meta.id()
    }
}

impl Auditable for Customer {
    const ENTITY_TYPE: EntityType = EntityType::Customer;

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta {
        &mut self.meta
    }
}

impl SoftDeletable for Customer {
    fn deletion(&self) -> &SoftDeleteState {
        &self.deletion
    }

    fn deletion_mut(&mut self) -> &mut SoftDeleteState {
        &mut self.deletion
    }
}
