//! [`TableMapping`](super::table_mapping::TableMapping) and row decoding for each entity.

pub mod customer;
pub mod part;
pub mod part_category;
pub mod policy_coverage_part;
pub mod vehicle;
pub mod vehicle_model;
pub mod warranty_policy;
