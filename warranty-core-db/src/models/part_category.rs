use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::auditable::{Auditable, EntityMeta};
use crate::models::entity_type::EntityType;
use crate::models::identifiable::Identifiable;
use crate::models::soft_deletable::{SoftDeletable, SoftDeleteState};

/// Database model for PartCategory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartCategory {
    pub meta: EntityMeta,
    pub deletion: SoftDeleteState,

    pub name: HeaplessString<100>,
    pub description: Option<HeaplessString<255>>,

    pub hash: i64,
}

impl Identifiable for PartCategory {
    fn get_id(&self) -> Uuid {
        self.meta.id()
    }
}

impl Auditable for PartCategory {
    const ENTITY_TYPE: EntityType = EntityType::PartCategory;

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta {
        &mut self.meta
    }
}

impl SoftDeletable for PartCategory {
    fn deletion(&self) -> &SoftDeleteState {
        &self.deletion
    }

    fn deletion_mut(&mut self) -> &mut SoftDeleteState {
        &mut self.deletion
    }
}
