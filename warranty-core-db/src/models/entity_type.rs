use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Customer,
    Vehicle,
    VehicleModel,
    PartCategory,
    Part,
    WarrantyPolicy,
    PolicyCoveragePart,
}

impl EntityType {
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }
}

impl From<EntityType> for &str {
    fn from(val: EntityType) -> Self {
        match val {
            EntityType::Customer => "Customer",
            EntityType::Vehicle => "Vehicle",
            EntityType::VehicleModel => "VehicleModel",
            EntityType::PartCategory => "PartCategory",
            EntityType::Part => "Part",
            EntityType::WarrantyPolicy => "WarrantyPolicy",
            EntityType::PolicyCoveragePart => "PolicyCoveragePart",
        }
    }
}

impl std::fmt::Display for EntityType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
