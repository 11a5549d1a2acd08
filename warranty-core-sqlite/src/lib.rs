//! SQLite implementation of the warranty persistence core: repositories with
//! soft delete, a unit of work with optimistic concurrency and the schema.

pub mod config;
pub mod executor;
pub mod repository;
pub mod store;
pub mod unit_of_work;
pub mod utils;

pub use config::{connect, ConfigError, StoreConfig};
pub use store::SqliteStore;
pub use unit_of_work::change_set::{PendingChange, WriteOperation};
pub use unit_of_work::UnitOfWork;

#[cfg(test)]
pub mod test_helper;
