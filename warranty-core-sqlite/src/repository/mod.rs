pub mod db_init;
pub mod mapping;
pub mod rules;
pub mod sqlite_repository;
pub mod table_mapping;
pub mod write;

#[cfg(test)]
pub mod test_utils;

pub use sqlite_repository::*;
pub use table_mapping::{Dependent, Reference, TableMapping};
