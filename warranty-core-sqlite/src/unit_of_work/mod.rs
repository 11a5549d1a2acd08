//! Unit of work: one logical business operation over the warranty store.
//!
//! Repositories obtained from a [`UnitOfWork`] share its connection state and
//! its change set. Reads are immediate; `add`, `update`, `remove`, `delete`
//! and `restore` only stage, and [`UnitOfWork::save_changes`] flushes
//! everything staged so far atomically.

pub mod change_set;

use sqlx::SqlitePool;
use std::sync::{Arc, OnceLock};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, warn};
use warranty_core_api::{ErrorKind, RepositoryError, RepositoryResult};
use warranty_core_db::interceptor::{Clock, SystemClock, TimestampInterceptor};

use crate::executor::Executor;
use crate::repository::table_mapping::TableMapping;
use crate::repository::{
    CustomerRepository, PartCategoryRepository, PartRepository, PolicyCoveragePartRepository,
    SqliteRepository, VehicleModelRepository, VehicleRepository, WarrantyPolicyRepository,
};
use change_set::{ChangeSet, PendingChange, PendingWrite};

pub struct UnitOfWork {
    executor: Executor,
    changes: ChangeSet,
    clock: Arc<dyn Clock>,
    customers: OnceLock<CustomerRepository>,
    vehicle_models: OnceLock<VehicleModelRepository>,
    vehicles: OnceLock<VehicleRepository>,
    part_categories: OnceLock<PartCategoryRepository>,
    parts: OnceLock<PartRepository>,
    warranty_policies: OnceLock<WarrantyPolicyRepository>,
    policy_coverage_parts: OnceLock<PolicyCoveragePartRepository>,
}

impl UnitOfWork {
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_clock(pool, Arc::new(SystemClock))
    }

    pub fn with_clock(pool: SqlitePool, clock: Arc<dyn Clock>) -> Self {
        Self {
            executor: Executor::new(pool),
            changes: ChangeSet::default(),
            clock,
            customers: OnceLock::new(),
            vehicle_models: OnceLock::new(),
            vehicles: OnceLock::new(),
            part_categories: OnceLock::new(),
            parts: OnceLock::new(),
            warranty_policies: OnceLock::new(),
            policy_coverage_parts: OnceLock::new(),
        }
    }

    fn repository<T: TableMapping>(&self) -> SqliteRepository<T> {
        SqliteRepository::new(self.executor.clone(), self.changes.clone())
    }

    pub fn customers(&self) -> &CustomerRepository {
        self.customers.get_or_init(|| self.repository())
    }

    pub fn vehicle_models(&self) -> &VehicleModelRepository {
        self.vehicle_models.get_or_init(|| self.repository())
    }

    pub fn vehicles(&self) -> &VehicleRepository {
        self.vehicles.get_or_init(|| self.repository())
    }

    pub fn part_categories(&self) -> &PartCategoryRepository {
        self.part_categories.get_or_init(|| self.repository())
    }

    pub fn parts(&self) -> &PartRepository {
        self.parts.get_or_init(|| self.repository())
    }

    pub fn warranty_policies(&self) -> &WarrantyPolicyRepository {
        self.warranty_policies.get_or_init(|| self.repository())
    }

    pub fn policy_coverage_parts(&self) -> &PolicyCoveragePartRepository {
        self.policy_coverage_parts.get_or_init(|| self.repository())
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    pub fn pending_changes(&self) -> Vec<PendingChange> {
        self.changes.describe()
    }

    pub fn discard_changes(&self) {
        self.changes.clear();
    }

    pub async fn is_transaction_active(&self) -> bool {
        self.executor.has_transaction().await
    }

    /// Flushes every staged write in staging order and returns the number of
    /// affected rows.
    ///
    /// Without an explicit transaction the flush runs in its own transaction;
    /// inside one it runs in a savepoint, so a failed flush leaves the
    /// explicit transaction as it was. On failure nothing is written and the
    /// staged writes are kept.
    pub async fn save_changes(&self) -> RepositoryResult<usize> {
        self.executor.ensure_open()?;
        let mut batch = self.changes.take();
        if batch.is_empty() {
            return Ok(0);
        }

        let interceptor = TimestampInterceptor::snapshot(self.clock.as_ref());
        match self.flush(batch.writes_mut(), &interceptor).await {
            Ok(affected) => {
                batch.complete();
                debug!(affected, "changes saved");
                Ok(affected as usize)
            }
            Err(err) => {
                log_failure(&err);
                Err(err)
            }
        }
    }

    /// [`save_changes`](Self::save_changes) that gives up with
    /// [`RepositoryError::Cancelled`] when `token` fires first. The
    /// interrupted flush is rolled back and the staged writes are kept.
    pub async fn save_changes_with_cancellation(
        &self,
        token: &CancellationToken,
    ) -> RepositoryResult<usize> {
        if token.is_cancelled() {
            return Err(RepositoryError::Cancelled);
        }
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!("save cancelled");
                Err(RepositoryError::Cancelled)
            }
            result = self.save_changes() => result,
        }
    }

    async fn flush(
        &self,
        writes: &mut [Box<dyn PendingWrite>],
        interceptor: &TimestampInterceptor,
    ) -> RepositoryResult<u64> {
        let mut conn = self.executor.acquire().await?;
        // BEGIN on a pooled connection, SAVEPOINT inside an explicit transaction
        let mut tx = sqlx::Connection::begin(conn.connection()?).await?;

        let mut affected = 0;
        for write in writes.iter_mut() {
            match write.apply(&mut tx, interceptor).await {
                Ok(rows) => affected += rows,
                Err(err) => {
                    if let Err(rollback_err) = tx.rollback().await {
                        error!(error = %rollback_err, "rollback after failed flush failed");
                    }
                    return Err(err);
                }
            }
        }

        tx.commit().await?;
        Ok(affected)
    }

    pub async fn begin_transaction(&self) -> RepositoryResult<()> {
        self.executor.ensure_open()?;
        let mut slot = self.executor.tx.lock().await;
        if slot.is_some() {
            return Err(RepositoryError::TransactionAlreadyActive);
        }
        *slot = Some(self.executor.pool().begin().await?);
        debug!("transaction started");
        Ok(())
    }

    /// Staged but unsaved writes are not part of the commit.
    pub async fn commit_transaction(&self) -> RepositoryResult<()> {
        self.executor.ensure_open()?;
        let transaction = self
            .executor
            .tx
            .lock()
            .await
            .take()
            .ok_or(RepositoryError::NoActiveTransaction)?;

        // A failed commit drops the still-open transaction, which rolls it back
        transaction.commit().await.map_err(|err| {
            error!(error = %err, "commit failed, transaction rolled back");
            RepositoryError::from(err)
        })?;
        debug!("transaction committed");
        Ok(())
    }

    pub async fn rollback_transaction(&self) -> RepositoryResult<()> {
        self.executor.ensure_open()?;
        let transaction = self.executor.tx.lock().await.take();
        if let Some(transaction) = transaction {
            transaction.rollback().await?;
            debug!("transaction rolled back");
        }
        Ok(())
    }

    /// Rolls back any open transaction and drops staged writes. Calling it
    /// again is a no-op; every other operation fails afterwards.
    pub async fn dispose(&self) -> RepositoryResult<()> {
        if !self.executor.release() {
            return Ok(());
        }
        self.changes.clear();
        let transaction = self.executor.tx.lock().await.take();
        if let Some(transaction) = transaction {
            transaction.rollback().await?;
            debug!("open transaction rolled back on dispose");
        }
        Ok(())
    }
}

fn log_failure(err: &RepositoryError) {
    match err.kind() {
        ErrorKind::ConcurrencyConflict => warn!(code = err.code(), error = %err, "save failed"),
        ErrorKind::Persistence => error!(code = err.code(), error = %err, "save failed"),
        _ => debug!(code = err.code(), error = %err, "save rejected"),
    }
}
