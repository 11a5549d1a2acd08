use heapless::String as HeaplessString;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::auditable::{Auditable, EntityMeta};
use crate::models::entity_type::EntityType;
use crate::models::identifiable::Identifiable;
use crate::models::soft_deletable::{SoftDeletable, SoftDeleteState};

/// Database model for Part
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub meta: EntityMeta,
    pub deletion: SoftDeleteState,

    /// References PartCategory.id
    pub part_category_id: Uuid,

    /// Manufacturer part number, unique among active parts
    pub part_number: HeaplessString<50>,
    pub name: HeaplessString<100>,
    pub unit_price: Decimal,

    pub hash: i64,
}

impl Identifiable for Part {
    fn get_id(&self) -> Uuid {
        self.meta.id()
    }
}

impl Auditable for Part {
    const ENTITY_TYPE: EntityType = EntityType::Part;

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta {
        &mut self.meta
    }
}

impl SoftDeletable for Part {
    fn deletion(&self) -> &SoftDeleteState {
        &self.deletion
    }

    fn deletion_mut(&mut self) -> &mut SoftDeleteState {
        &mut self.deletion
    }
}
