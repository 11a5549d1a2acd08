use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::auditable::{Auditable, EntityMeta};
use crate::models::entity_type::EntityType;
use crate::models::identifiable::Identifiable;

/// Database model for PolicyCoveragePart
/// Links a warranty policy to a part it covers. Not soft-deletable: links are removed physically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyCoveragePart {
    pub meta: EntityMeta,

    /// References WarrantyPolicy.id
    pub warranty_policy_id: Uuid,

    /// References Part.id
    pub part_id: Uuid,

    pub hash: i64,
}

impl Identifiable for PolicyCoveragePart {
    fn get_id(&self) -> Uuid {
        self.meta.id()
    }
}

impl Auditable for PolicyCoveragePart {
    const ENTITY_TYPE: EntityType = EntityType::PolicyCoveragePart;

    fn meta(&self) -> &EntityMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut EntityMeta {
        &mut self.meta
    }
}
