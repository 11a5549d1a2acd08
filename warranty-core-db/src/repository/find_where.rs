use async_trait::async_trait;
use sqlx::Database;
use warranty_core_api::RepositoryResult;

use super::criteria::Criteria;
use crate::models::identifiable::Identifiable;

/// Generic repository trait for filtered queries
///
/// # Example
/// ```ignore
/// let vehicles = repo
///     .find(Criteria::new().eq("customer_id", customer_id).gte("mileage", 10_000))
///     .await?;
/// ```
#[async_trait]
pub trait FindWhere<DB: Database, T: Identifiable>: Send + Sync {
    /// All non-deleted entities matching every condition of `criteria`
    ///
    /// A condition on a column the entity does not have fails with
    /// `RepositoryError::InvalidCriteria`.
    async fn find(&self, criteria: Criteria) -> RepositoryResult<Vec<T>>;
}
