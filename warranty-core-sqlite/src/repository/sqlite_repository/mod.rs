pub mod exist_by_id;
pub mod find_by_id;
pub mod find_where;
pub mod load_all;
pub mod load_page;
pub mod repo_impl;
pub mod soft_delete;
pub mod stage_changes;

pub use repo_impl::SqliteRepository;

use warranty_core_db::models::{
    Customer, Part, PartCategory, PolicyCoveragePart, Vehicle, VehicleModel, WarrantyPolicy,
};

pub type CustomerRepository = SqliteRepository<Customer>;
pub type VehicleModelRepository = SqliteRepository<VehicleModel>;
pub type VehicleRepository = SqliteRepository<Vehicle>;
pub type PartCategoryRepository = SqliteRepository<PartCategory>;
pub type PartRepository = SqliteRepository<Part>;
pub type WarrantyPolicyRepository = SqliteRepository<WarrantyPolicy>;
pub type PolicyCoveragePartRepository = SqliteRepository<PolicyCoveragePart>;
