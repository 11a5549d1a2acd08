use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::auditable::{Auditable, EntityMeta};
use crate::models::entity_type::EntityType;
use crate::models::identifiable::Identifiable;
use crate::models::soft_deletable::{SoftDeletable, SoftDeleteState};

/// Database model for VehicleModel
/// A make/model/year combination; brand + model_name + year is unique among active rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleModel {
    pub meta: EntityMeta,
    pub deletion: SoftDeleteState,

    pub brand: HeaplessString<50>,
    pub model_name: HeaplessString<50>,
    pub year: i32,
    pub description: Option<HeaplessString<255>>,

    pub hash: i64,
}

impl Identifiable for VehicleModel {
    fn get_id(&self) -> Uuid {
        self.meta.id()
    }
}

impl Auditable for VehicleModel {
    const ENTITY_TYPE: EntityType = EntityType::VehicleModel;

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta {
        &mut self.meta
    }
}

impl SoftDeletable for VehicleModel {
    fn deletion(&self) -> &SoftDeleteState {
        &self.deletion
    }

    fn deletion_mut(&mut self) -> &mut SoftDeleteState {
        &mut self.deletion
    }
}
