use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::auditable::{Auditable, EntityMeta};
use crate::models::entity_type::EntityType;
use crate::models::identifiable::Identifiable;
use crate::models::soft_deletable::{SoftDeletable, SoftDeleteState};

/// Database model for WarrantyPolicy
/// Coverage terms offered for one vehicle model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarrantyPolicy {
    pub meta: EntityMeta,
    pub deletion: SoftDeleteState,

    /// References VehicleModel.id
    pub vehicle_model_id: Uuid,

    /// Unique per vehicle model among active policies
    pub name: HeaplessString<100>,
    pub duration_months: i32,

    /// Mileage cap of the coverage, `None` for unlimited
    pub mileage_limit: Option<i64>,

    pub hash: i64,
}

impl Identifiable for WarrantyPolicy {
    fn get_id(&self) -> Uuid {
        self.meta.id()
    }
}

impl Auditable for WarrantyPolicy {
    const ENTITY_TYPE: EntityType = EntityType::WarrantyPolicy;

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta {
        &mut self.meta
    }
}

impl SoftDeletable for WarrantyPolicy {
    fn deletion(&self) -> &SoftDeleteState {
        &self.deletion
    }

    fn deletion_mut(&mut self) -> &mut SoftDeleteState {
        &mut self.deletion
    }
}
