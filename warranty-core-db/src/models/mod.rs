pub mod auditable;
pub mod customer;
pub mod entity_type;
pub mod identifiable;
pub mod part;
pub mod part_category;
pub mod policy_coverage_part;
pub mod soft_deletable;
pub mod vehicle;
pub mod vehicle_model;
pub mod warranty_policy;

// Re-exports
pub use auditable::*;
pub use customer::*;
pub use entity_type::*;
pub use identifiable::*;
pub use part::*;
pub use part_category::*;
pub use policy_coverage_part::*;
pub use soft_deletable::*;
pub use vehicle::*;
pub use vehicle_model::*;
pub use warranty_policy::*;
