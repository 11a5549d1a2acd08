use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use warranty_core_api::{RepositoryError, RepositoryResult};

type TransactionSlot = Option<Transaction<'static, Sqlite>>;

/// Database access shared by a unit of work and all of its repositories.
///
/// Holds the pool and, while an explicit transaction is open, that
/// transaction. Every statement issued through [`Executor::acquire`] runs on
/// the open transaction if there is one, otherwise on a pooled connection.
#[derive(Clone)]
pub struct Executor {
    pool: SqlitePool,
    pub tx: Arc<Mutex<TransactionSlot>>,
    released: Arc<AtomicBool>,
}

impl Executor {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            tx: Arc::new(Mutex::new(None)),
            released: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Fails once the owning unit of work has been disposed.
    pub fn ensure_open(&self) -> RepositoryResult<()> {
        if self.released.load(Ordering::Acquire) {
            return Err(RepositoryError::Persistence(
                "unit of work has been disposed".to_string(),
            ));
        }
        Ok(())
    }

    /// Marks the executor released. Returns `false` if it already was.
    pub fn release(&self) -> bool {
        !self.released.swap(true, Ordering::AcqRel)
    }

    pub async fn has_transaction(&self) -> bool {
        self.tx.lock().await.is_some()
    }

    pub async fn acquire(&self) -> RepositoryResult<ExecutorConnection<'_>> {
        self.ensure_open()?;
        let guard = self.tx.lock().await;
        if guard.is_some() {
            return Ok(ExecutorConnection::Transaction(guard));
        }
        drop(guard);
        let conn = self.pool.acquire().await?;
        Ok(ExecutorConnection::Pooled(conn))
    }
}

/// Connection handed out by [`Executor::acquire`]
pub enum ExecutorConnection<'a> {
    Transaction(MutexGuard<'a, TransactionSlot>),
    Pooled(PoolConnection<Sqlite>),
}

impl ExecutorConnection<'_> {
    pub fn connection(&mut self) -> RepositoryResult<&mut SqliteConnection> {
        match self {
            ExecutorConnection::Transaction(guard) => {
                let transaction = guard.as_mut().ok_or_else(|| {
                    RepositoryError::Persistence("Transaction has been consumed".to_string())
                })?;
                Ok(&mut **transaction)
            }
            ExecutorConnection::Pooled(conn) => Ok(&mut **conn),
        }
    }
}
