use chrono::NaiveDate;
use heapless::String as HeaplessString;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::auditable::{Auditable, EntityMeta};
use crate::models::entity_type::EntityType;
use crate::models::identifiable::Identifiable;
use crate::models::soft_deletable::{SoftDeletable, SoftDeleteState};

/// Database model for Vehicle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub meta: EntityMeta,
    pub deletion: SoftDeleteState,

    /// References Customer.id, must be an active customer when the vehicle is created
    pub customer_id: Uuid,

    /// References VehicleModel.id, must be active when the vehicle is created
    pub vehicle_model_id: Uuid,

    /// Vehicle identification number, unique among active vehicles
    pub vin: HeaplessString<17>,

    /// Unique among active vehicles
    pub license_plate: HeaplessString<20>,
    pub purchase_date: Option<NaiveDate>,
    pub mileage: i64,

    pub hash: i64,
}

impl Identifiable for Vehicle {
    fn get_id(&self) -> Uuid {
        self.meta.id()
    }
}

impl Auditable for Vehicle {
    const ENTITY_TYPE: EntityType = EntityType::Vehicle;

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta {
        &mut self.meta
    }
}

impl SoftDeletable for Vehicle {
    fn deletion(&self) -> &SoftDeleteState {
        &self.deletion
    }

    fn deletion_mut(&mut self) -> &mut SoftDeleteState {
        &mut self.deletion
    }
}
